//! # Recurrent Networks
//!
//! [`BaseRnn`] carries what every recurrent encoder/decoder of the model
//! shares: vocabulary and length limits, the embedding table, dropout rates
//! and the cell family. Concrete networks implement [`RecurrentNetwork`];
//! the base itself does not, and its `forward` fails with
//! [`Error::NotImplemented`](crate::Error::NotImplemented).
//!
//! ## Quick Start
//!
//! ```ignore
//! use syntax_vae::prelude::*;
//!
//! let config = BaseRnnConfig::new(vocab_size, max_len, 64, 128, "gru".to_string())
//!     .with_n_layers(2)
//!     .with_rnn_droprate(0.2);
//! let encoder = EncoderRnn::<Backend>::new(&config, &device)?;
//!
//! // tokens: [batch, seq_len] ids
//! let encoded = encoder.forward(tokens)?;
//! // encoded.outputs: [batch, seq_len, 128]
//! // encoded.hidden:  [batch, 128] -> feature vector for MatrixDecoder
//! ```
//!
//! ## Cell Selection
//!
//! `rnn_cell` is parsed case-insensitively into [`RnnCellKind`]; anything
//! other than `lstm` or `gru` is rejected with
//! [`Error::UnsupportedRnnCell`](crate::Error::UnsupportedRnnCell).
//! Inter-layer dropout only applies to stacks of two or more layers.

pub mod base;
pub mod encoder;

pub use base::{BaseRnn, BaseRnnConfig, RecurrentNetwork, RnnCellKind};
pub use encoder::{EncoderOutput, EncoderRnn};
