//! Sliding-window geometry shared by the convolution and pooling kernels.
//!
//! A window of `size × size` starts at the top-left corner of a plane and advances by
//! `stride` along each axis for as long as it still fits entirely inside the plane.
//! Rows or columns left over when the stride does not tile the plane exactly are skipped,
//! which is the same as the floor division in
//!
//! ```text
//! out_dim = (in_dim - size) / stride + 1
//! ```

/// Number of window positions along one axis.
///
/// Returns `None` when no position exists: a zero `window` or `stride`, or a window larger
/// than the axis.
///
/// ```rust
/// use convpool_kernels::output_dim;
///
/// assert_eq!(output_dim(4, 2, 2), Some(2));
/// assert_eq!(output_dim(5, 2, 2), Some(2)); // last column dropped
/// assert_eq!(output_dim(2, 3, 1), None);
/// ```
pub fn output_dim(input: usize, window: usize, stride: usize) -> Option<usize> {
    if window == 0 || stride == 0 || window > input {
        return None;
    }
    Some((input - window) / stride + 1)
}

/// One placement of the kernel over a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Row of the top-left input element.
    pub row: usize,
    /// Column of the top-left input element.
    pub col: usize,
    /// Output row this window reduces into.
    pub out_row: usize,
    /// Output column this window reduces into.
    pub out_col: usize,
    /// Side length of the square window.
    pub size: usize,
}

impl Window {
    /// Flat offset of the window's `(dy, dx)` element inside a row-major plane of width `width`.
    #[inline]
    pub fn offset(&self, dy: usize, dx: usize, width: usize) -> usize {
        (self.row + dy) * width + self.col + dx
    }
}

/// Iterator over every window position of a plane, in row-major output order.
#[derive(Clone, Debug)]
pub struct Windows {
    size: usize,
    stride: usize,
    out_w: usize,
    next: usize,
    len: usize,
}

/// Enumerates the window positions for a `height × width` plane.
///
/// Yields nothing when [`output_dim`] has no position along either axis.
pub fn windows(height: usize, width: usize, size: usize, stride: usize) -> Windows {
    let out_h = output_dim(height, size, stride).unwrap_or(0);
    let out_w = output_dim(width, size, stride).unwrap_or(0);
    Windows {
        size,
        stride,
        out_w,
        next: 0,
        len: out_h * out_w,
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.next >= self.len {
            return None;
        }
        let out_row = self.next / self.out_w;
        let out_col = self.next % self.out_w;
        self.next += 1;
        Some(Window {
            row: out_row * self.stride,
            col: out_col * self.stride,
            out_row,
            out_col,
            size: self.size,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows {}
