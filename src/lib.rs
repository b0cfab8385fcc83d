//! # syntax-vae - Matrix decoders and recurrent blocks (Rust)
//!
//! Neural building blocks for a syntax-guided sequence VAE, using the Burn
//! framework.
//!
//! ## Features
//!
//! - **MatrixMapper**: feature vector → rank-1 matrix via key/value outer product
//! - **MatrixDecoder**: control × semantic matrices → per-position vocabulary logits
//! - **VarMd**: matrix decoder with a pluggable latent preprocessing stage
//! - **BaseRnn / EncoderRnn**: embedding + stacked LSTM/GRU encoders
//! - **find_val**: first-occurrence search for end-of-sequence markers
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::{Distribution, Tensor};
//! use syntax_vae::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let decoder = MatrixDecoder::<Backend>::new(32, 16, 10, 50, 0.1, 0.1, &device);
//! let z = Tensor::<Backend, 2>::random([4, 32], Distribution::Uniform(-1.0, 1.0), &device);
//!
//! let logits = decoder.forward(z).unwrap();
//! assert_eq!(logits.dims(), [4, 10, 50]);
//! ```
//!
//! ## Encoder to Decoder
//!
//! ```ignore
//! let config = BaseRnnConfig::new(vocab_size, max_len, 64, 128, "lstm".to_string());
//! let encoder = EncoderRnn::<Backend>::new(&config, &device)?;
//! let decoder = MatrixDecoder::<Backend>::new(128, 128, max_len, vocab_size, 0.1, 0.1, &device);
//!
//! let encoded = encoder.forward(tokens)?;
//! let logits = decoder.forward(encoded.hidden)?;
//! ```

pub mod cells;
pub mod error;
pub mod matrix;
pub mod rnn;
pub mod sequence;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::cells::{GRUCell, LSTMCell};
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{
        sequence_lengths, IdentityLatent, LatentPreprocessor, MatrixDecoder, MatrixDecoderConfig,
        MatrixMapper, MatrixMapperConfig, Reparameterize, VarMd, VarMdConfig,
    };
    pub use crate::rnn::{
        BaseRnn, BaseRnnConfig, EncoderOutput, EncoderRnn, RecurrentNetwork, RnnCellKind,
    };
    pub use crate::sequence::{find_val, find_val_along};
}
