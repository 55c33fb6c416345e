//! Property-based tests for the sliding-window kernels
//!
//! These tests verify shape formulas and algebraic identities that should hold for all
//! valid inputs

use super::*;
use proptest::prelude::*;

/// Strategy for a square convolution problem: (channels, image size, filter size, stride)
fn conv_dims() -> impl Strategy<Value = (usize, usize, usize, usize)> {
    (1usize..4, 1usize..12, 1usize..5, 1usize..4)
        .prop_filter("filter must fit in image", |(_, size, k, _)| *k <= *size)
}

/// Strategy for a pooling problem: (channels, height, width, kernel, stride)
fn pool_dims() -> impl Strategy<Value = (usize, usize, usize, usize, usize)> {
    (1usize..4, 1usize..12, 1usize..12, 1usize..5, 1usize..4)
        .prop_filter("kernel must fit in image", |(_, h, w, k, _)| *k <= *h && *k <= *w)
}

fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| ((i * 7919) % 97) as f64 - 48.0).collect()
}

proptest! {
    /// Convolution output has one plane per filter of side (size - k) / stride + 1
    #[test]
    fn test_conv2d_output_len((channels, size, k, stride) in conv_dims(), filters in 0usize..4) {
        let input = vec![1.0f64; channels * size * size];
        let weight = vec![1.0f64; filters * channels * k * k];
        let bias = vec![0.0f64; filters];

        let out = cpu_conv2d(
            &input, &weight, &bias,
            &[channels, size, size], &[filters, channels, k, k],
            stride, ExecutionMode::Parallel,
        ).unwrap();

        let side = (size - k) / stride + 1;
        prop_assert_eq!(out.len(), filters * side * side);
    }

    /// Zero filters leave only the bias of each filter
    #[test]
    fn test_conv2d_zero_filters_yield_bias((channels, size, k, stride) in conv_dims()) {
        let input = ramp(channels * size * size);
        let weight = vec![0.0f64; 3 * channels * k * k];
        let bias = vec![-1.5, 0.0, 2.25];

        let out = cpu_conv2d(
            &input, &weight, &bias,
            &[channels, size, size], &[3, channels, k, k],
            stride, ExecutionMode::Parallel,
        ).unwrap();

        let plane = out.len() / 3;
        for (f, chunk) in out.chunks(plane).enumerate() {
            prop_assert!(chunk.iter().all(|&v| v == bias[f]));
        }
    }

    /// A 1x1 unit filter with stride 1 reproduces a single-channel image
    #[test]
    fn test_conv2d_unit_filter_identity(size in 1usize..16) {
        let input = ramp(size * size);
        let out = cpu_conv2d(
            &input, &[1.0], &[0.0],
            &[1, size, size], &[1, 1, 1, 1],
            1, ExecutionMode::Sequential,
        ).unwrap();
        prop_assert_eq!(out, input);
    }

    /// Execution mode never changes the result, bit for bit
    #[test]
    fn test_conv2d_modes_agree((channels, size, k, stride) in conv_dims()) {
        let input = ramp(channels * size * size);
        let weight: Vec<f64> = ramp(2 * channels * k * k).into_iter().map(|v| v / 7.0).collect();
        let bias = vec![0.1, -0.3];
        let shape = [channels, size, size];
        let wshape = [2, channels, k, k];

        let seq = cpu_conv2d(&input, &weight, &bias, &shape, &wshape, stride, ExecutionMode::Sequential).unwrap();
        let par = cpu_conv2d(&input, &weight, &bias, &shape, &wshape, stride, ExecutionMode::Parallel).unwrap();
        prop_assert_eq!(seq, par);
    }

    /// Pooling keeps the channel count and floors each spatial axis independently
    #[test]
    fn test_max_pool_output_len((channels, h, w, k, stride) in pool_dims()) {
        let input = ramp(channels * h * w);
        let out = cpu_max_pool2d(&input, &[channels, h, w], k, stride, ExecutionMode::Parallel).unwrap();

        let out_h = (h - k) / stride + 1;
        let out_w = (w - k) / stride + 1;
        prop_assert_eq!(out.len(), channels * out_h * out_w);
    }

    /// A 1x1 window with stride 1 is the identity
    #[test]
    fn test_max_pool_unit_identity(channels in 1usize..4, h in 1usize..10, w in 1usize..10) {
        let input = ramp(channels * h * w);
        let out = cpu_max_pool2d(&input, &[channels, h, w], 1, 1, ExecutionMode::Parallel).unwrap();
        prop_assert_eq!(out, input);
    }

    /// Every pooled value is an element of its channel and no smaller than the window origin
    #[test]
    fn test_max_pool_values_come_from_channel((channels, h, w, k, stride) in pool_dims()) {
        let input = ramp(channels * h * w);
        let out = cpu_max_pool2d(&input, &[channels, h, w], k, stride, ExecutionMode::Sequential).unwrap();

        let plane = out.len() / channels;
        for (c, pooled) in out.chunks(plane).enumerate() {
            let channel = &input[c * h * w..(c + 1) * h * w];
            for (win, &v) in windows(h, w, k, stride).zip(pooled) {
                prop_assert!(channel.contains(&v));
                prop_assert!(v >= channel[win.offset(0, 0, w)]);
            }
        }
    }
}
