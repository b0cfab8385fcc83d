#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use burn::tensor::{Distribution, Int, Tensor};
    use syntax_vae::prelude::*;

    type Backend = NdArray<f32>;

    fn base_config(rnn_cell: &str) -> BaseRnnConfig {
        BaseRnnConfig::new(40, 16, 8, 24, rnn_cell.to_string())
    }

    #[test]
    fn test_supported_cells() {
        let device = Default::default();

        let lstm = base_config("lstm").init::<Backend>(&device).unwrap();
        assert_eq!(lstm.rnn_cell(), RnnCellKind::Lstm);

        let gru = base_config("GRU").init::<Backend>(&device).unwrap();
        assert_eq!(gru.rnn_cell(), RnnCellKind::Gru);
    }

    #[test]
    fn test_unsupported_cell() {
        let device = Default::default();
        let err = base_config("transformer").init::<Backend>(&device).unwrap_err();

        assert_eq!(err, Error::UnsupportedRnnCell("transformer".to_string()));
    }

    #[test]
    fn test_base_forward_not_implemented() {
        let device = Default::default();
        let base = base_config("lstm").init::<Backend>(&device).unwrap();

        let tokens = Tensor::<Backend, 2, Int>::zeros([2, 4], &device);
        let err = RecurrentNetwork::forward(&base, tokens).unwrap_err();

        assert_eq!(err, Error::NotImplemented("forward"));
    }

    #[test]
    fn test_symbols() {
        assert_eq!(BaseRnn::<Backend>::SYM_MASK, "MASK");
        assert_eq!(BaseRnn::<Backend>::SYM_EOS, "EOS");
    }

    #[test]
    fn test_encoder_rejects_unsupported_cell() {
        let device = Default::default();
        let result = EncoderRnn::<Backend>::new(&base_config("rnn"), &device);

        assert!(matches!(result, Err(Error::UnsupportedRnnCell(_))));
    }

    #[test]
    fn test_encoder_feeds_matrix_decoder() {
        let device = Default::default();

        for cell in ["lstm", "gru"] {
            let config = base_config(cell).with_n_layers(2).with_rnn_droprate(0.2);
            let encoder = EncoderRnn::<Backend>::new(&config, &device).unwrap();
            assert_eq!(encoder.base().rnn_droprate(), 0.2);

            let tokens = Tensor::<Backend, 2>::random([3, 6], Distribution::Uniform(0.0, 39.0), &device).int();
            let encoded = encoder.forward(tokens).unwrap();
            assert_eq!(encoded.hidden.dims(), [3, 24]);

            let decoder = MatrixDecoder::<Backend>::new(24, 16, 16, 40, 0.1, 0.1, &device);
            let logits = decoder.forward(encoded.hidden).unwrap();
            assert_eq!(logits.dims(), [3, 16, 40]);
        }
    }

    #[test]
    fn test_encoder_rejects_too_long_sequence() {
        let device = Default::default();
        let encoder = EncoderRnn::<Backend>::new(&base_config("gru"), &device).unwrap();

        let tokens = Tensor::<Backend, 2, Int>::zeros([1, 17], &device);
        assert!(matches!(
            encoder.forward(tokens).unwrap_err(),
            Error::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn test_encoder_rejects_unknown_token_id() {
        let device = Default::default();
        let config = BaseRnnConfig::new(20, 16, 8, 24, "lstm".to_string());
        let encoder = EncoderRnn::<Backend>::new(&config, &device).unwrap();

        let tokens = Tensor::<Backend, 2, Int>::from_ints([[1, 25, 3]], &device);
        assert_eq!(
            encoder.forward(tokens).unwrap_err(),
            Error::TokenOutOfRange {
                token: 25,
                vocab_size: 20
            }
        );
    }

    #[test]
    fn test_zero_layer_config_rejected() {
        let device = Default::default();
        let config = base_config("gru").with_n_layers(0);

        assert!(matches!(
            base_config("lstm").with_n_layers(0).init::<Backend>(&device),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            EncoderRnn::<Backend>::new(&config, &device),
            Err(Error::InvalidConfig(_))
        ));
    }
}
