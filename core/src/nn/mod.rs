//! Layer wrappers around the sliding-window tensor operations.
//!
//! Each layer owns its configuration (and, for convolution, its weights) and maps one
//! `[channels, height, width]` image to another. Chaining layers into a network is left
//! to the caller.

pub mod conv;
pub mod module;
pub mod pool;

pub use conv::{Conv2d, DEFAULT_CONV_STRIDE};
pub use module::Module;
pub use pool::{DEFAULT_POOL_KERNEL, DEFAULT_POOL_STRIDE, MaxPool2d};
