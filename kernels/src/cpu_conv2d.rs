use crate::window::{output_dim, windows};
use crate::{ExecutionMode, KernelElem, KernelError, Result, check_len, for_each_plane};

/// Performs a multi-filter 2D convolution on CPU.
///
/// # Arguments
///
/// * `input` - Image data (flattened). Shape: `[channels, height, width]`
/// * `weight` - Filter bank data (flattened). Shape: `[num_filters, channels, k, k]`
/// * `bias` - One offset per filter. Shape: `[num_filters]`
/// * `input_shape` - Shape of the image.
/// * `weight_shape` - Shape of the filter bank.
/// * `stride` - Step between window positions, shared by both spatial axes.
/// * `mode` - Whether filters are processed sequentially or as parallel tasks.
///
/// # Returns
///
/// A flattened vector of shape `[num_filters, out, out]` with
/// `out = (size - k) / stride + 1`.
///
/// Each output cell is the full inner product of the window with one filter across all
/// channels, accumulated channel by channel, then filter row, then filter column, with the
/// bias added last. The order is the same in both execution modes.
///
/// # Errors
///
/// * `InvalidStride` if `stride` is zero.
/// * `UnsupportedShape` if the filter or the image is not square, or the filter is empty.
/// * `ShapeMismatch` if a buffer length disagrees with its shape, the channel counts
///   differ, the bias length differs from the filter count, or the filter is larger
///   than the image.
pub fn cpu_conv2d<T: KernelElem>(
    input: &[T],
    weight: &[T],
    bias: &[T],
    input_shape: &[usize; 3],
    weight_shape: &[usize; 4],
    stride: usize,
    mode: ExecutionMode,
) -> Result<Vec<T>> {
    let out_dim = validate(input, weight, bias, input_shape, weight_shape, stride).inspect_err(
        |e| tracing::debug!(?input_shape, ?weight_shape, stride, error = %e, "conv2d rejected"),
    )?;

    let [in_channels, in_h, in_w] = *input_shape;
    let [out_channels, _, k, _] = *weight_shape;

    let mut output = vec![T::zero(); out_channels * out_dim * out_dim];

    // Strides for image access
    let in_stride_c = in_h * in_w;

    // Strides for weight access
    let w_stride_out = in_channels * k * k;
    let w_stride_in = k * k;

    // Parallelize over output channels: each filter owns one output plane
    for_each_plane(&mut output, out_dim * out_dim, mode, |f, plane| {
        let filter = &weight[f * w_stride_out..(f + 1) * w_stride_out];

        for win in windows(in_h, in_w, k, stride) {
            let mut sum = T::zero();

            for c in 0..in_channels {
                let channel = &input[c * in_stride_c..(c + 1) * in_stride_c];
                let kernel = &filter[c * w_stride_in..(c + 1) * w_stride_in];

                for ky in 0..k {
                    let row = &channel[win.offset(ky, 0, in_w)..win.offset(ky, k, in_w)];
                    let taps = &kernel[ky * k..(ky + 1) * k];
                    for (&x, &w) in row.iter().zip(taps) {
                        sum += x * w;
                    }
                }
            }

            plane[win.out_row * out_dim + win.out_col] = sum + bias[f];
        }
    });

    tracing::debug!(
        ?input_shape,
        ?weight_shape,
        stride,
        out_shape = ?[out_channels, out_dim, out_dim],
        "conv2d"
    );

    Ok(output)
}

/// Runs every precondition and returns the spatial output size.
fn validate<T>(
    input: &[T],
    weight: &[T],
    bias: &[T],
    input_shape: &[usize; 3],
    weight_shape: &[usize; 4],
    stride: usize,
) -> Result<usize> {
    check_len(input, input_shape)?;
    check_len(weight, weight_shape)?;

    if stride == 0 {
        return Err(KernelError::InvalidStride(stride));
    }

    let [in_channels, in_h, in_w] = *input_shape;
    let [out_channels, weight_in_channels, k_h, k_w] = *weight_shape;

    if k_h != k_w {
        return Err(KernelError::UnsupportedShape {
            shape: weight_shape.to_vec(),
            reason: "filters must be square",
        });
    }
    if k_h == 0 {
        return Err(KernelError::UnsupportedShape {
            shape: weight_shape.to_vec(),
            reason: "filters must not be empty",
        });
    }
    if in_h != in_w {
        return Err(KernelError::UnsupportedShape {
            shape: input_shape.to_vec(),
            reason: "convolution input must be square",
        });
    }

    if in_channels != weight_in_channels {
        return Err(KernelError::ShapeMismatch {
            expected: vec![in_channels],
            got: vec![weight_in_channels],
        });
    }
    if bias.len() != out_channels {
        return Err(KernelError::ShapeMismatch {
            expected: vec![out_channels],
            got: vec![bias.len()],
        });
    }

    output_dim(in_h, k_h, stride).ok_or_else(|| KernelError::ShapeMismatch {
        expected: vec![k_h], // Minimum size
        got: vec![in_h],
    })
}
