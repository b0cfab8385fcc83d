#[cfg(test)]
mod tests {
    use burn::backend::{Autodiff, NdArray};
    use burn::module::AutodiffModule;
    use burn::tensor::{Distribution, Tensor};
    use ndarray::Array3;
    use syntax_vae::matrix::{MatrixMapper, MatrixMapperConfig};
    use syntax_vae::Error;

    type Backend = NdArray<f32>;
    type TrainBackend = Autodiff<NdArray<f32>>;

    fn to_array(t: Tensor<Backend, 3>) -> Array3<f32> {
        let [b, k, v] = t.dims();
        let data = t.into_data().to_vec::<f32>().unwrap();
        Array3::from_shape_vec((b, k, v), data).unwrap()
    }

    /// Every 2x2 minor of a rank <= 1 matrix vanishes
    fn max_minor(m: &Array3<f32>, batch: usize) -> f32 {
        let (_, rows, cols) = m.dim();
        let mut worst = 0.0f32;
        for i in 0..rows {
            for p in (i + 1)..rows {
                for j in 0..cols {
                    for q in (j + 1)..cols {
                        let minor = m[[batch, i, j]] * m[[batch, p, q]]
                            - m[[batch, i, q]] * m[[batch, p, j]];
                        worst = worst.max(minor.abs());
                    }
                }
            }
        }
        worst
    }

    #[test]
    fn test_mapper_output_shape() {
        let device = Default::default();
        let mapper = MatrixMapperConfig::new(24, 16, 7, 9).init::<Backend>(&device);

        for batch in [1, 4, 16] {
            let z = Tensor::<Backend, 2>::random([batch, 24], Distribution::Uniform(-1.0, 1.0), &device);
            assert_eq!(mapper.forward(z).unwrap().dims(), [batch, 7, 9]);
        }
    }

    #[test]
    fn test_mapper_matrices_are_rank_one() {
        let device = Default::default();
        let mapper = MatrixMapper::<Backend>::new(24, 16, 6, 8, 0.1, &device);

        let z = Tensor::<Backend, 2>::random([5, 24], Distribution::Uniform(-2.0, 2.0), &device);
        let m = to_array(mapper.forward(z).unwrap());

        for b in 0..5 {
            let scale = m
                .index_axis(ndarray::Axis(0), b)
                .iter()
                .fold(0.0f32, |acc, x| acc.max(x.abs()));
            let tolerance = 1e-5 * scale.max(1.0).powi(2);
            let worst = max_minor(&m, b);
            assert!(
                worst <= tolerance,
                "Batch {} has a non-vanishing minor: {} (tolerance {})",
                b,
                worst,
                tolerance
            );
        }
    }

    #[test]
    fn test_mapper_deterministic_in_eval() {
        let device = Default::default();
        let mapper = MatrixMapper::<Backend>::new(12, 8, 4, 4, 0.5, &device);

        let z = Tensor::<Backend, 2>::random([3, 12], Distribution::Uniform(-1.0, 1.0), &device);
        let first = mapper.forward(z.clone()).unwrap().into_data().to_vec::<f32>().unwrap();
        let second = mapper.forward(z).unwrap().into_data().to_vec::<f32>().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_mapper_dropout_active_in_training() {
        let device = Default::default();
        let mapper = MatrixMapper::<TrainBackend>::new(64, 64, 8, 8, 0.5, &device);

        let z = Tensor::<TrainBackend, 2>::ones([4, 64], &device);
        let first = mapper.forward(z.clone()).unwrap();
        let second = mapper.forward(z).unwrap();

        let diff = (first - second).abs().sum().into_scalar();
        assert!(diff > 0.0, "Dropout masks should differ between training calls");
    }

    #[test]
    fn test_valid_mapper_is_deterministic() {
        let device = Default::default();
        let mapper = MatrixMapper::<TrainBackend>::new(16, 16, 5, 6, 0.5, &device).valid();

        let z = Tensor::<Backend, 2>::random([3, 16], Distribution::Uniform(-1.0, 1.0), &device);
        let first = mapper.forward(z.clone()).unwrap().into_data().to_vec::<f32>().unwrap();
        let second = mapper.forward(z).unwrap().into_data().to_vec::<f32>().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_mapper_width_mismatch() {
        let device = Default::default();
        let mapper = MatrixMapper::<Backend>::new(16, 8, 4, 4, 0.1, &device);

        let z = Tensor::<Backend, 2>::zeros([2, 17], &device);
        match mapper.forward(z) {
            Err(Error::ShapeMismatch { expected, actual, .. }) => {
                assert_eq!(expected, "16");
                assert_eq!(actual, "17");
            }
            other => panic!("Expected a shape mismatch, got {:?}", other.map(|t| t.dims())),
        }
    }
}
