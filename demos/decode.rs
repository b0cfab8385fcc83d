//! Matrix Decoder Example
//!
//! Decodes random latent vectors into token sequences and measures their
//! length up to the first end-of-sequence marker.

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use syntax_vae::prelude::*;

const EOS_ID: i64 = 2;

fn main() -> Result<()> {
    println!("=== Matrix Decoder Example ===\n");

    type Backend = NdArray<f32>;
    let device = Default::default();

    let config = MatrixDecoderConfig::new(32, 64, 12, 100);
    let decoder = config.init::<Backend>(&device);

    println!("Decoder created:");
    println!("  Latent width: {}", decoder.input_dim());
    println!("  Hidden width: {}", decoder.hidden_dim());
    println!("  Max length:   {}", decoder.max_len());
    println!("  Vocabulary:   {}", decoder.vocab_size());
    println!();

    let z = Tensor::<Backend, 2>::random([4, 32], Distribution::Normal(0.0, 1.0), &device);

    let control = decoder.control_matrix_mapper().forward(z.clone())?;
    let semantic = decoder.semantic_matrix_mapper().forward(z.clone())?;
    println!("Control matrix:  {:?}", control.dims());
    println!("Semantic matrix: {:?}", semantic.dims());

    let logits = decoder.forward(z.clone())?;
    println!("Logits:          {:?}", logits.dims());

    let tokens = decoder.predict_tokens(z)?;
    let lengths = sequence_lengths(tokens.clone(), EOS_ID)?;
    println!();
    println!("Greedy tokens:\n{}", tokens);
    println!("Lengths (EOS = {}): {}", EOS_ID, lengths);

    Ok(())
}
