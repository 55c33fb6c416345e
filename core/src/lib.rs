//! # convpool
//!
//! `convpool` is a pure Rust implementation of the two sliding-window primitives of a
//! convolutional network's forward pass: multi-filter 2D convolution and max pooling.
//!
//! Everything runs on the CPU. The heavy lifting lives in the `convpool_kernels` crate;
//! this crate adds typed tensors, error conversion and thin layer wrappers.
//!
//! ## Modules
//!
//! - [`mod@tensor`]: Row-major N-dimensional tensor plus the `conv2d` / `max_pool2d` methods.
//! - [`functional`]: The `convolve` and `maxpool` free functions.
//! - [`nn`]: `Conv2d` and `MaxPool2d` layers.
//!
//! ## Example
//!
//! ```rust
//! use convpool::nn::{Conv2d, MaxPool2d};
//! use convpool::tensor::Tensor;
//!
//! // 3-channel 8x8 image through a 3x3 conv with 4 filters, then 2x2 pooling
//! let image = Tensor::<f32, 3>::ones([3, 8, 8]);
//! let conv = Conv2d::<f32>::zeros(3, 4, 3);
//! let features = conv.forward(&image).unwrap();
//! assert_eq!(features.shape(), &[4, 6, 6]);
//!
//! let pooled = MaxPool2d::default().forward(&features).unwrap();
//! assert_eq!(pooled.shape(), &[4, 3, 3]);
//! ```

/// Macro for creating a Tensor with compile-time shape checking.
///
/// # Examples
///
/// ```rust
/// use convpool::tensor;
/// use convpool::tensor::Tensor;
///
/// // Works
/// let t = tensor!([1.0, 2.0, 3.0, 4.0], [1, 2, 2]);
///
/// // Fails to compile:
/// // let t = tensor!([1.0, 2.0, 3.0], [1, 2, 2]);
/// ```
#[macro_export]
macro_rules! tensor {
    ($data:expr, $shape:expr) => {{
        // Constants to force compile-time evaluation
        const DATA_LEN: usize = (&$data as &[_]).len();
        const SHAPE: [usize; (&$shape as &[_]).len()] = $shape;
        const EXPECTED_SIZE: usize = {
            let mut size = 1;
            let mut i = 0;
            while i < (&SHAPE as &[_]).len() {
                size *= SHAPE[i];
                i += 1;
            }
            size
        };

        // This assertion triggers a compile-time error if false
        const _: () = assert!(
            DATA_LEN == EXPECTED_SIZE,
            "Shape mismatch: data length does not match shape product"
        );

        // Safe to unwrap because we checked at compile time
        $crate::tensor::Tensor::new($data.to_vec(), $shape).unwrap()
    }};
}

pub mod functional;
pub mod nn;
pub mod tensor;

pub use convpool_kernels::ExecutionMode;
pub use functional::{convolve, maxpool};
pub use tensor::{BiasVector, FilterBank, Image, Result, Tensor, TensorElem, TensorError};
