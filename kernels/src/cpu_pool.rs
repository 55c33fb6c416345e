use crate::window::{output_dim, windows};
use crate::{ExecutionMode, KernelElem, KernelError, Result, check_len, for_each_plane};

/// Performs 2D Max Pooling on CPU.
///
/// # Arguments
///
/// * `input` - Image data (flattened). Shape: `[channels, height, width]`
/// * `input_shape` - Shape of the image.
/// * `kernel_size` - Side of the square pooling window.
/// * `stride` - Step between window positions, shared by both spatial axes.
/// * `mode` - Whether channels are processed sequentially or as parallel tasks.
///
/// # Returns
///
/// A flattened vector containing the result of the max pooling.
/// Output shape: `[channels, out_h, out_w]`
///
/// Channels are reduced independently. Within a window the scan runs row-major from the
/// first element and only a strictly greater value replaces the running maximum.
pub fn cpu_max_pool2d<T: KernelElem>(
    input: &[T],
    input_shape: &[usize; 3],
    kernel_size: usize,
    stride: usize,
    mode: ExecutionMode,
) -> Result<Vec<T>> {
    let (out_h, out_w) = validate(input, input_shape, kernel_size, stride).inspect_err(|e| {
        tracing::debug!(?input_shape, kernel_size, stride, error = %e, "max_pool2d rejected")
    })?;

    let [channels, in_h, in_w] = *input_shape;
    let k = kernel_size;

    let mut output = vec![T::zero(); channels * out_h * out_w]; // Initialize, but will overwrite

    let in_stride_c = in_h * in_w;

    // Parallelize over channels
    for_each_plane(&mut output, out_h * out_w, mode, |c, plane| {
        let channel = &input[c * in_stride_c..(c + 1) * in_stride_c];

        for win in windows(in_h, in_w, k, stride) {
            let mut max_val = channel[win.offset(0, 0, in_w)];

            for ky in 0..k {
                for &val in &channel[win.offset(ky, 0, in_w)..win.offset(ky, k, in_w)] {
                    if val > max_val {
                        max_val = val;
                    }
                }
            }

            plane[win.out_row * out_w + win.out_col] = max_val;
        }
    });

    tracing::debug!(
        ?input_shape,
        kernel_size,
        stride,
        out_shape = ?[channels, out_h, out_w],
        "max_pool2d"
    );

    Ok(output)
}

fn validate<T>(
    input: &[T],
    input_shape: &[usize; 3],
    kernel_size: usize,
    stride: usize,
) -> Result<(usize, usize)> {
    check_len(input, input_shape)?;

    if kernel_size == 0 {
        return Err(KernelError::InvalidKernel(kernel_size));
    }
    if stride == 0 {
        return Err(KernelError::InvalidStride(stride));
    }

    let [_, in_h, in_w] = *input_shape;
    let too_small = || KernelError::ShapeMismatch {
        expected: vec![kernel_size, kernel_size], // Minimum height and width
        got: vec![in_h, in_w],
    };

    let out_h = output_dim(in_h, kernel_size, stride).ok_or_else(too_small)?;
    let out_w = output_dim(in_w, kernel_size, stride).ok_or_else(too_small)?;
    Ok((out_h, out_w))
}
