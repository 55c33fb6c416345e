//! # convpool-kernels
//!
//! Flat-slice CPU kernels for the two sliding-window primitives of a CNN forward pass.
//!
//! Every kernel takes row-major data slices plus explicit shapes and returns a freshly
//! allocated `Vec<T>`. All validation runs before the output buffer is touched, so a
//! rejected call never yields partial results.

use num_traits::{Num, NumAssign};
use rayon::prelude::*;
use std::fmt::Debug;
use thiserror::Error;

pub mod cpu_conv2d;
pub mod cpu_pool;
pub mod window;

#[cfg(test)]
mod property_tests;

pub use cpu_conv2d::cpu_conv2d;
pub use cpu_pool::cpu_max_pool2d;
pub use window::{Window, output_dim, windows};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("Unsupported shape {shape:?}: {reason}")]
    UnsupportedShape {
        shape: Vec<usize>,
        reason: &'static str,
    },
    #[error("Invalid stride {0}: stride must be at least 1")]
    InvalidStride(usize),
    #[error("Invalid kernel size {0}: kernel size must be at least 1")]
    InvalidKernel(usize),
}

pub type Result<T> = std::result::Result<T, KernelError>;

/// Trait bound for elements that can be processed by kernels.
/// This mirrors `TensorElem` in the tensor crate to avoid circular dependencies.
pub trait KernelElem:
    Num + NumAssign + Copy + Clone + Debug + Send + Sync + PartialOrd
{
}

impl<T> KernelElem for T where
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

/// How a kernel distributes its output planes across threads.
///
/// Both kernels write disjoint output planes (one per filter or channel), so each plane
/// can be an independent task. The per-cell reduction order never changes, which keeps
/// the two modes bit-identical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Fill planes one after another on the calling thread.
    Sequential,
    /// Fill planes as `rayon` tasks, joined before the kernel returns.
    #[default]
    Parallel,
}

/// Splits `output` into planes of `plane_len` elements and runs `fill(index, plane)` on each.
pub(crate) fn for_each_plane<T, F>(output: &mut [T], plane_len: usize, mode: ExecutionMode, fill: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    // chunks_mut panics on a zero chunk size; an empty plane has nothing to fill
    if plane_len == 0 {
        return;
    }
    match mode {
        ExecutionMode::Sequential => output
            .chunks_mut(plane_len)
            .enumerate()
            .for_each(|(i, plane)| fill(i, plane)),
        ExecutionMode::Parallel => output
            .par_chunks_mut(plane_len)
            .enumerate()
            .for_each(|(i, plane)| fill(i, plane)),
    }
}

/// Checks that a flat buffer holds exactly as many elements as its shape describes.
pub(crate) fn check_len<T>(data: &[T], shape: &[usize]) -> Result<()> {
    // A shape whose element count overflows cannot describe any buffer
    let Some(size) = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d)) else {
        return Err(KernelError::ShapeMismatch {
            expected: shape.to_vec(),
            got: vec![data.len()],
        });
    };
    if data.len() != size {
        return Err(KernelError::ShapeMismatch {
            expected: vec![size],
            got: vec![data.len()],
        });
    }
    Ok(())
}
