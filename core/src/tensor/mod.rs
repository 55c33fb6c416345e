//! Core Tensor implementation.
//!
//! # What is a Tensor?
//!
//! A **Tensor** is a dense, rectangular multi-dimensional array. The sliding-window kernels
//! in this crate only ever see three kinds:
//!
//! - **Image** (rank 3): `[channels, height, width]`.
//! - **FilterBank** (rank 4): `[num_filters, channels_per_filter, filter_h, filter_w]`.
//! - **BiasVector** (rank 1): `[num_filters]`, one offset per filter.
//!
//! # How `convpool` Tensors Work
//!
//! A `Tensor` is defined by:
//! 1. **Data**: A flat vector of elements (usually `f32`).
//! 2. **Shape**: An array of dimensions (e.g., `[3, 32, 32]`).
//! 3. **Strides**: How to step through the flat data to traverse dimensions.
//!
//! The rank is a const generic, so handing a rank-4 tensor where an image is expected is a
//! compile error rather than a runtime one.
//!
//! ## Example: Creating and Inspecting a Tensor
//!
//! ```rust
//! use convpool::tensor::Tensor;
//!
//! // A single-channel 2x3 image
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let image = Tensor::<f32, 3>::new(data, [1, 2, 3]).unwrap();
//!
//! assert_eq!(image.shape(), &[1, 2, 3]);
//! assert_eq!(image.get([0, 1, 2]).unwrap(), 6.0);
//! ```
//!
//! > [!TIP]
//! > **Expert Note: Strides and Memory Layout**
//! > `convpool` uses **Row-Major** (C-style) layout. The last dimension changes the fastest
//! > in memory, so one image row is a contiguous slice and one channel is a contiguous plane.

use num_traits::{Num, NumAssign};
use std::fmt::Debug;
use thiserror::Error;

pub mod ops;

/// Error type for Tensor operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// The shape of the data does not match the expected shape.
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    /// An index is out of bounds for the given shape.
    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },
    /// The shape is valid but not one the kernels handle (e.g., a non-square filter).
    #[error("Unsupported shape {shape:?}: {reason}")]
    UnsupportedShape {
        shape: Vec<usize>,
        reason: &'static str,
    },
    /// A stride of zero was requested.
    #[error("Invalid stride {0}: stride must be at least 1")]
    InvalidStride(usize),
    /// A pooling window of size zero was requested.
    #[error("Invalid kernel size {0}: kernel size must be at least 1")]
    InvalidKernel(usize),
}

pub type Result<T> = std::result::Result<T, TensorError>;

/// Trait bound for elements that can be stored in a Tensor.
///
/// # Requirements
/// - `Copy + Clone`: Essential for efficient storage in contiguous memory (e.g., `Vec<T>`) and fast element access.
/// - `Num + ...`: Provides the multiply-accumulate used by convolution.
/// - `PartialOrd`: Provides the comparison used by max pooling.
/// - `Send + Sync`: Required for parallel execution via `rayon` in the kernels.
pub trait TensorElem:
    Num + NumAssign + Copy + Clone + Debug + Send + Sync + PartialOrd
{
}

impl<T> TensorElem for T where
    T: Num
        + NumAssign
        + Copy
        + Clone
        + Debug
        + Send
        + Sync
        + PartialOrd
{
}

/// The core Tensor struct.
///
/// Represents an N-dimensional array of elements, immutable once built: every kernel reads
/// its inputs through shared references and returns a freshly allocated tensor.
///
/// # Generics
///
/// - `T`: The element type (must implement `TensorElem`).
/// - `RANK`: The number of dimensions (const generic).
#[derive(Clone, PartialEq)]
pub struct Tensor<T, const RANK: usize>
where
    T: TensorElem,
{
    shape: [usize; RANK],
    strides: [usize; RANK],
    data: Vec<T>,
}

/// A rank-3 `[channels, height, width]` tensor.
pub type Image<T> = Tensor<T, 3>;

/// A rank-4 `[num_filters, channels_per_filter, filter_h, filter_w]` tensor.
pub type FilterBank<T> = Tensor<T, 4>;

/// A rank-1 `[num_filters]` tensor.
pub type BiasVector<T> = Tensor<T, 1>;

impl<T, const RANK: usize> Tensor<T, RANK>
where
    T: TensorElem,
{
    /// Creates a new Tensor from a vector of data and a shape.
    ///
    /// # Arguments
    ///
    /// * `data` - A flat vector containing the tensor elements.
    /// * `shape` - An array representing the dimensions of the tensor.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if the length of `data` does not match the product of `shape`,
    /// or if that product overflows `usize`.
    pub fn new(data: Vec<T>, shape: [usize; RANK]) -> Result<Self> {
        let Some(size) = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d)) else {
            return Err(TensorError::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        };
        if data.len() != size {
            return Err(TensorError::ShapeMismatch {
                expected: vec![size],
                got: vec![data.len()],
            });
        }

        Ok(Self {
            shape,
            strides: compute_strides(&shape),
            data,
        })
    }

    /// Creates a new Tensor filled with zeros.
    pub fn zeros(shape: [usize; RANK]) -> Self {
        Self::full(shape, T::zero())
    }

    /// Creates a new Tensor filled with ones.
    pub fn ones(shape: [usize; RANK]) -> Self {
        Self::full(shape, T::one())
    }

    /// Creates a new Tensor with every element set to `value`.
    pub fn full(shape: [usize; RANK], value: T) -> Self {
        let size: usize = shape.iter().product();
        Self {
            shape,
            strides: compute_strides(&shape),
            data: vec![value; size],
        }
    }

    /// Creates a new Tensor by evaluating `f` at every multi-index, in row-major order.
    ///
    /// ```rust
    /// use convpool::tensor::Tensor;
    ///
    /// let t = Tensor::<f32, 2>::from_fn([2, 3], |[r, c]| (r * 10 + c) as f32);
    /// assert_eq!(t.data(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    /// ```
    pub fn from_fn<F>(shape: [usize; RANK], mut f: F) -> Self
    where
        F: FnMut([usize; RANK]) -> T,
    {
        let strides = compute_strides(&shape);
        let size: usize = shape.iter().product();
        let data = (0..size)
            .map(|flat| {
                let mut index = [0; RANK];
                let mut rem = flat;
                for d in 0..RANK {
                    index[d] = rem / strides[d];
                    rem %= strides[d];
                }
                f(index)
            })
            .collect();

        Self {
            shape,
            strides,
            data,
        }
    }

    /// Returns the shape of the tensor.
    ///
    /// The shape is an array of length `RANK` representing the size of each dimension.
    pub const fn shape(&self) -> &[usize; RANK] {
        &self.shape
    }

    /// Returns the strides of the tensor.
    ///
    /// Strides represent the number of elements to skip in memory to move to the next element
    /// along a specific dimension.
    pub const fn strides(&self) -> &[usize; RANK] {
        &self.strides
    }

    /// Returns a reference to the underlying data as a slice.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the tensor and returns its flat row-major data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns the total number of elements in the tensor.
    ///
    /// This is equal to the product of the dimensions in the shape.
    pub const fn size(&self) -> usize {
        let mut size = 1;
        let mut i = 0;
        while i < RANK {
            size *= self.shape[i];
            i += 1;
        }
        size
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::IndexOutOfBounds` if any coordinate is outside its dimension.
    pub fn get(&self, index: [usize; RANK]) -> Result<T> {
        if index.iter().zip(&self.shape).any(|(i, dim)| i >= dim) {
            return Err(TensorError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.to_vec(),
            });
        }
        let offset: usize = index.iter().zip(&self.strides).map(|(i, s)| i * s).sum();
        Ok(self.data[offset])
    }
}

/// Computes the strides for a given shape.
///
/// Strides represent the number of elements to skip in memory to move to the next element
/// along a specific dimension. This implementation assumes a row-major (C-style) memory layout.
const fn compute_strides<const RANK: usize>(shape: &[usize; RANK]) -> [usize; RANK] {
    let mut strides = [0; RANK];
    let mut stride = 1;
    let mut i = RANK;
    while i > 0 {
        i -= 1;
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

impl<T, const RANK: usize> Debug for Tensor<T, RANK>
where
    T: TensorElem,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("data_len", &self.data.len())
            .finish()
    }
}
