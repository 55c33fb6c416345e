//! Sliding-window tensor operations.
//!
//! # Overview
//!
//! This module connects typed tensors to the flat-slice kernels in `convpool_kernels`:
//! - **Convolution**: a bank of filters slides over an image; each filter produces one
//!   output channel holding the full (channel, row, column) inner product plus its bias.
//! - **Max Pooling**: a square window slides over each channel independently and keeps the
//!   largest value it covers.
//!
//! Both operations share the same traversal: the window starts at the top-left corner and
//! steps by `stride` while it still fits, so leftover rows and columns are dropped and no
//! read ever leaves the image.
//!
//! # Parallelism
//!
//! > [!TIP]
//! > **Efficiency Note**: With `ExecutionMode::Parallel`, each output plane (one per filter or
//! > channel) is filled as a separate `rayon` task. For tiny images the scheduling overhead can
//! > outweigh the benefit; `ExecutionMode::Sequential` runs everything on the calling thread and
//! > produces bit-identical results.
//!
//! # Examples
//!
//! ```rust
//! use convpool::ExecutionMode;
//! use convpool::tensor::Tensor;
//!
//! let image = Tensor::<f32, 3>::from_fn([1, 4, 4], |[_, y, x]| (y * 4 + x) as f32);
//! let pooled = image.max_pool2d(2, 2, ExecutionMode::Parallel).unwrap();
//! assert_eq!(pooled.data(), &[5.0, 7.0, 13.0, 15.0]);
//! ```

use super::{BiasVector, FilterBank, Result, Tensor, TensorElem, TensorError};
use convpool_kernels::{ExecutionMode, KernelError, output_dim};

impl From<KernelError> for TensorError {
    fn from(e: KernelError) -> Self {
        match e {
            KernelError::ShapeMismatch { expected, got } => {
                TensorError::ShapeMismatch { expected, got }
            }
            KernelError::UnsupportedShape { shape, reason } => {
                TensorError::UnsupportedShape { shape, reason }
            }
            KernelError::InvalidStride(stride) => TensorError::InvalidStride(stride),
            KernelError::InvalidKernel(size) => TensorError::InvalidKernel(size),
        }
    }
}

impl<T> Tensor<T, 3>
where
    T: TensorElem,
{
    /// Performs multi-filter 2D Convolution.
    ///
    /// # Arguments
    ///
    /// * `filters` - Filter bank of shape `[num_filters, channels, k, k]`.
    /// * `bias` - Bias of shape `[num_filters]`.
    /// * `stride` - Stride of the convolution along both axes.
    /// * `mode` - Sequential or parallel execution over filters.
    ///
    /// # Returns
    ///
    /// A new tensor of shape `[num_filters, out, out]` where `out = (size - k) / stride + 1`.
    ///
    /// # Errors
    ///
    /// * `TensorError::ShapeMismatch` - channel counts differ, the bias length differs from
    ///   the filter count, or the filter is larger than the image.
    /// * `TensorError::UnsupportedShape` - the filter or the image is not square.
    /// * `TensorError::InvalidStride` - `stride` is zero.
    pub fn conv2d(
        &self,
        filters: &FilterBank<T>,
        bias: &BiasVector<T>,
        stride: usize,
        mode: ExecutionMode,
    ) -> Result<Tensor<T, 3>> {
        let out_data = convpool_kernels::cpu_conv2d(
            self.data(),
            filters.data(),
            bias.data(),
            self.shape(),
            filters.shape(),
            stride,
            mode,
        )?;

        let [_, in_h, _] = self.shape;
        let [num_filters, _, k, _] = *filters.shape();
        let out = output_dim(in_h, k, stride).unwrap_or(0);

        Tensor::new(out_data, [num_filters, out, out])
    }

    /// Performs 2D Max Pooling.
    ///
    /// # Arguments
    ///
    /// * `kernel_size` - Side of the square pooling window.
    /// * `stride` - Stride of the pooling along both axes.
    /// * `mode` - Sequential or parallel execution over channels.
    ///
    /// # Returns
    ///
    /// A new tensor of shape `[channels, out_h, out_w]`; each spatial axis is floored
    /// independently, so rectangular images are supported.
    ///
    /// # Errors
    ///
    /// * `TensorError::InvalidKernel` - `kernel_size` is zero.
    /// * `TensorError::InvalidStride` - `stride` is zero.
    /// * `TensorError::ShapeMismatch` - the window is larger than the image.
    pub fn max_pool2d(
        &self,
        kernel_size: usize,
        stride: usize,
        mode: ExecutionMode,
    ) -> Result<Tensor<T, 3>> {
        let out_data =
            convpool_kernels::cpu_max_pool2d(self.data(), self.shape(), kernel_size, stride, mode)?;

        let [channels, in_h, in_w] = self.shape;
        let out_h = output_dim(in_h, kernel_size, stride).unwrap_or(0);
        let out_w = output_dim(in_w, kernel_size, stride).unwrap_or(0);

        Tensor::new(out_data, [channels, out_h, out_w])
    }
}
