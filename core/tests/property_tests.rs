//! Property-based tests for the tensor-level forward-pass API

use convpool::tensor::{Tensor, TensorError};
use convpool::{convolve, maxpool};
use proptest::prelude::*;

fn image(shape: [usize; 3]) -> Tensor<f64, 3> {
    Tensor::from_fn(shape, |[c, y, x]| ((c * 13 + y * 5 + x * 3) % 11) as f64 - 5.0)
}

proptest! {
    #[test]
    fn test_convolve_shape(
        channels in 1usize..4,
        filters in 1usize..5,
        size in 1usize..14,
        k in 1usize..6,
        stride in 1usize..5,
    ) {
        prop_assume!(k <= size);
        let img = image([channels, size, size]);
        let bank = Tensor::<f64, 4>::ones([filters, channels, k, k]);
        let bias = Tensor::<f64, 1>::zeros([filters]);

        let out = convolve(&img, &bank, &bias, stride).unwrap();

        let side = (size - k) / stride + 1;
        prop_assert_eq!(out.shape(), &[filters, side, side]);
    }

    #[test]
    fn test_maxpool_shape(
        channels in 1usize..4,
        h in 1usize..14,
        w in 1usize..14,
        k in 1usize..6,
        stride in 1usize..5,
    ) {
        prop_assume!(k <= h && k <= w);
        let img = image([channels, h, w]);

        let out = maxpool(&img, k, stride).unwrap();

        prop_assert_eq!(out.shape(), &[channels, (h - k) / stride + 1, (w - k) / stride + 1]);
    }

    #[test]
    fn test_convolve_rejects_any_channel_mismatch(
        img_channels in 1usize..5,
        filter_channels in 1usize..5,
    ) {
        prop_assume!(img_channels != filter_channels);
        let img = image([img_channels, 4, 4]);
        let bank = Tensor::<f64, 4>::ones([2, filter_channels, 2, 2]);
        let bias = Tensor::<f64, 1>::zeros([2]);

        let err = convolve(&img, &bank, &bias, 1);
        prop_assert_eq!(
            err,
            Err(TensorError::ShapeMismatch {
                expected: vec![img_channels],
                got: vec![filter_channels],
            })
        );
    }

    #[test]
    fn test_maxpool_never_below_any_window_element(
        h in 2usize..10,
        w in 2usize..10,
        stride in 1usize..3,
    ) {
        let img = image([1, h, w]);
        let out = maxpool(&img, 2, stride).unwrap();
        let [_, out_h, out_w] = *out.shape();

        for oy in 0..out_h {
            for ox in 0..out_w {
                let v = out.get([0, oy, ox]).unwrap();
                for dy in 0..2 {
                    for dx in 0..2 {
                        let x = img.get([0, oy * stride + dy, ox * stride + dx]).unwrap();
                        prop_assert!(v >= x);
                    }
                }
            }
        }
    }
}
