//! Encoder to Matrix Decoder Example
//!
//! Encodes token sequences with a stacked GRU, then decodes the final
//! hidden state with a variational matrix decoder.

use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::tensor::{Int, Tensor};
use syntax_vae::prelude::*;

fn main() -> Result<()> {
    println!("=== Encode / Decode Example ===\n");

    type Backend = Autodiff<NdArray<f32>>;
    let device = Default::default();

    let vocab_size = 50;
    let max_len = 16;

    let rnn_config = BaseRnnConfig::new(vocab_size, max_len, 32, 64, "gru".to_string())
        .with_n_layers(2)
        .with_embed_droprate(0.1)
        .with_rnn_droprate(0.2);
    let encoder = EncoderRnn::<Backend>::new(&rnn_config, &device)?;

    // Encoder hidden state is split into [mean, log_var] halves of width 32
    let var_md = VarMdConfig::new(32, 32, 64, max_len, vocab_size).init::<Backend>(&device);

    let ids = [[4, 9, 17, 3, 3, 8], [12, 1, 1, 40, 7, 2], [5, 5, 5, 5, 5, 5], [30, 2, 0, 0, 0, 0]];
    let tokens = Tensor::<Backend, 2, Int>::from_ints(ids, &device);

    println!("Training mode (dropout + sampling):");
    let encoded = encoder.forward(tokens)?;
    let logits = var_md.sample(encoded.hidden)?;
    println!("  Encoder outputs: {:?}", encoded.outputs.dims());
    println!("  Logits:          {:?}", logits.dims());
    println!();

    println!("Evaluation mode (deterministic):");
    let encoder = encoder.valid();
    let var_md = var_md.valid();
    let encoded = encoder.forward(Tensor::from_ints(ids, &device))?;
    let tokens = var_md
        .decoder()
        .predict_tokens(var_md.reparameterizer().preprocess(encoded.hidden)?)?;
    println!("  Greedy tokens:   {:?}", tokens.dims());

    Ok(())
}
