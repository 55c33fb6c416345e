use crate::tensor::{Image, Result, TensorElem};
use std::fmt::Debug;

/// A Module trait for image-to-image layers.
///
/// Both layers in this crate map a `[channels, height, width]` image to a new image, so the
/// trait captures exactly that. `Send + Sync` lets a layer be shared across threads for
/// concurrent inference on independent images.
pub trait Module<T: TensorElem>: Debug + Send + Sync {
    fn forward(&self, input: &Image<T>) -> Result<Image<T>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::{Conv2d, MaxPool2d};
    use crate::tensor::Tensor;

    #[derive(Debug)]
    struct MockModule;

    impl Module<f32> for MockModule {
        fn forward(&self, input: &Image<f32>) -> Result<Image<f32>> {
            Ok(input.clone())
        }
    }

    fn run<M: Module<f32>>(module: &M, input: &Image<f32>) -> Result<Image<f32>> {
        module.forward(input)
    }

    #[test]
    fn test_module_implementation() {
        let input = Tensor::<f32, 3>::ones([1, 2, 2]);
        let out = run(&MockModule, &input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_layers_are_modules() {
        let input = Tensor::<f32, 3>::ones([2, 4, 4]);

        let conv = Conv2d::<f32>::zeros(2, 3, 3);
        assert_eq!(run(&conv, &input).unwrap().shape(), &[3, 2, 2]);

        let pool = MaxPool2d::default();
        assert_eq!(run(&pool, &input).unwrap().shape(), &[2, 2, 2]);
    }
}
