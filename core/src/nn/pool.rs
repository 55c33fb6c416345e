use crate::nn::Module;
use crate::tensor::{Image, Result, TensorElem};
use convpool_kernels::ExecutionMode;

pub const DEFAULT_POOL_KERNEL: usize = 2;
pub const DEFAULT_POOL_STRIDE: usize = 2;

/// 2D Max Pooling Layer.
///
/// Defaults to a 2x2 window with stride 2, which halves each spatial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxPool2d {
    pub kernel_size: usize,
    pub stride: usize,
    pub mode: ExecutionMode,
}

impl MaxPool2d {
    /// Creates a new MaxPool2d layer.
    ///
    /// # Arguments
    ///
    /// * `kernel_size` - Side of the square pooling window.
    /// * `stride` - Stride of the pooling.
    ///
    /// Zero values are accepted here and rejected by [`MaxPool2d::forward`].
    pub fn new(kernel_size: usize, stride: usize) -> Self {
        Self {
            kernel_size,
            stride,
            mode: ExecutionMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Performs the forward pass.
    pub fn forward<T: TensorElem>(&self, input: &Image<T>) -> Result<Image<T>> {
        input.max_pool2d(self.kernel_size, self.stride, self.mode)
    }
}

impl Default for MaxPool2d {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_KERNEL, DEFAULT_POOL_STRIDE)
    }
}

impl<T: TensorElem> Module<T> for MaxPool2d {
    fn forward(&self, input: &Image<T>) -> Result<Image<T>> {
        MaxPool2d::forward(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::{Tensor, TensorError};

    #[test]
    fn test_maxpool2d_default() {
        let pool = MaxPool2d::default();
        assert_eq!(pool.kernel_size, 2);
        assert_eq!(pool.stride, 2);
        assert_eq!(pool.mode, ExecutionMode::Parallel);
    }

    #[test]
    fn test_maxpool2d_halves_spatial_axes() {
        let input = Tensor::<f32, 3>::zeros([16, 32, 32]);
        let out = MaxPool2d::default().forward(&input).unwrap();
        assert_eq!(out.shape(), &[16, 16, 16]);
    }

    #[test]
    fn test_maxpool2d_rejects_zero_stride() {
        let input = Tensor::<f32, 3>::zeros([1, 4, 4]);
        let pool = MaxPool2d::new(2, 0).with_mode(ExecutionMode::Sequential);
        assert_eq!(pool.forward(&input), Err(TensorError::InvalidStride(0)));
    }
}
