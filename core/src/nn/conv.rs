use crate::nn::Module;
use crate::tensor::{BiasVector, FilterBank, Image, Result, Tensor, TensorElem, TensorError};
use convpool_kernels::ExecutionMode;

/// Stride used by [`Conv2d::new`] and [`crate::convolve`] callers that take the default.
pub const DEFAULT_CONV_STRIDE: usize = 1;

/// 2D Convolution Layer.
///
/// Holds a filter bank and its bias and applies them to a `[channels, height, width]` image.
/// Each filter produces one output channel.
#[derive(Debug, Clone)]
pub struct Conv2d<T>
where
    T: TensorElem,
{
    pub filters: FilterBank<T>,
    pub bias: BiasVector<T>,
    pub stride: usize,
    pub mode: ExecutionMode,
}

impl<T> Conv2d<T>
where
    T: TensorElem,
{
    /// Creates a new Conv2d layer with stride 1 and parallel execution.
    ///
    /// # Arguments
    ///
    /// * `filters` - Weights of shape `[out_channels, in_channels, k, k]`.
    /// * `bias` - Offsets of shape `[out_channels]`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if the bias length differs from the filter count
    /// and `TensorError::UnsupportedShape` if the filters are not square.
    pub fn new(filters: FilterBank<T>, bias: BiasVector<T>) -> Result<Self> {
        let [out_channels, _, k_h, k_w] = *filters.shape();
        if bias.shape()[0] != out_channels {
            return Err(TensorError::ShapeMismatch {
                expected: vec![out_channels],
                got: vec![bias.shape()[0]],
            });
        }
        if k_h != k_w {
            return Err(TensorError::UnsupportedShape {
                shape: filters.shape().to_vec(),
                reason: "filters must be square",
            });
        }

        Ok(Self {
            filters,
            bias,
            stride: DEFAULT_CONV_STRIDE,
            mode: ExecutionMode::default(),
        })
    }

    /// Creates a layer whose filters and bias are all zero.
    ///
    /// Every output cell of such a layer is zero; it is mostly useful as a starting point
    /// for weights filled in by the caller.
    pub fn zeros(in_channels: usize, out_channels: usize, kernel_size: usize) -> Self {
        Self {
            filters: Tensor::zeros([out_channels, in_channels, kernel_size, kernel_size]),
            bias: Tensor::zeros([out_channels]),
            stride: DEFAULT_CONV_STRIDE,
            mode: ExecutionMode::default(),
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn in_channels(&self) -> usize {
        self.filters.shape()[1]
    }

    pub fn out_channels(&self) -> usize {
        self.filters.shape()[0]
    }

    pub fn kernel_size(&self) -> usize {
        self.filters.shape()[2]
    }

    /// Performs the forward pass.
    pub fn forward(&self, input: &Image<T>) -> Result<Image<T>> {
        input.conv2d(&self.filters, &self.bias, self.stride, self.mode)
    }
}

impl<T: TensorElem> Module<T> for Conv2d<T> {
    fn forward(&self, input: &Image<T>) -> Result<Image<T>> {
        Conv2d::forward(self, input)
    }
}
