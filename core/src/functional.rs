//! Free-function entry points for the two forward-pass primitives.
//!
//! These are the crate's boundary: plain functions from borrowed tensors to a freshly
//! allocated tensor, running with the default [`ExecutionMode`]. Use the tensor methods
//! [`Tensor::conv2d`](crate::Tensor::conv2d) and
//! [`Tensor::max_pool2d`](crate::Tensor::max_pool2d) to pick the mode explicitly.
//!
//! ```rust
//! use convpool::{Tensor, convolve, maxpool};
//!
//! let image = Tensor::<f32, 3>::from_fn([1, 4, 4], |[_, y, x]| (y * 4 + x) as f32);
//! let filters = Tensor::<f32, 4>::ones([1, 1, 2, 2]);
//! let bias = Tensor::<f32, 1>::zeros([1]);
//!
//! let features = convolve(&image, &filters, &bias, 2).unwrap();
//! assert_eq!(features.data(), &[10.0, 18.0, 42.0, 50.0]);
//!
//! let pooled = maxpool(&image, 2, 2).unwrap();
//! assert_eq!(pooled.data(), &[5.0, 7.0, 13.0, 15.0]);
//! ```

use crate::tensor::{BiasVector, FilterBank, Image, Result, TensorElem};
use convpool_kernels::ExecutionMode;

/// Convolves `filters` over `image` with the given `stride`, adding one `bias` per filter.
///
/// Output shape is `[num_filters, out, out]` with `out = (size - k) / stride + 1`.
/// See [`Tensor::conv2d`](crate::Tensor::conv2d) for the error conditions.
pub fn convolve<T: TensorElem>(
    image: &Image<T>,
    filters: &FilterBank<T>,
    bias: &BiasVector<T>,
    stride: usize,
) -> Result<Image<T>> {
    image.conv2d(filters, bias, stride, ExecutionMode::default())
}

/// Downsamples every channel of `image` with a `kernel_size` window moved by `stride`.
///
/// Output shape is `[channels, (h - k) / s + 1, (w - k) / s + 1]`.
/// See [`Tensor::max_pool2d`](crate::Tensor::max_pool2d) for the error conditions.
pub fn maxpool<T: TensorElem>(image: &Image<T>, kernel_size: usize, stride: usize) -> Result<Image<T>> {
    image.max_pool2d(kernel_size, stride, ExecutionMode::default())
}
