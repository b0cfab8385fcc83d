//! # Matrix Decoding
//!
//! Non-recurrent decoding through learned rank-1 matrix factorization.
//!
//! | Module | Input | Output |
//! |--------|-------|--------|
//! | [`MatrixMapper`] | `[batch, input_dim]` | `[batch, k_dim, v_dim]` |
//! | [`MatrixDecoder`] | `[batch, input_dim]` (×2) | `[batch, max_len, vocab_size]` |
//! | [`VarMd`] | `[batch, latent]` + [`LatentPreprocessor`] | `[batch, max_len, vocab_size]` |
//!
//! ## Rank-1 Matrices
//!
//! A mapper never materializes a `k_dim × v_dim` weight block. It predicts
//! a key vector and a value vector and returns their outer product:
//!
//! ```text
//! M[b] = k[b] ⊗ v[b]     rank(M[b]) <= 1
//! ```
//!
//! ## Training vs Evaluation
//!
//! Dropout follows Burn's convention: it is active on autodiff backends and
//! is the identity on the inner backend. Call
//! [`AutodiffModule::valid`](burn::module::AutodiffModule::valid) to get an
//! evaluation-mode decoder with deterministic outputs.
//!
//! ## Example
//!
//! ```ignore
//! use syntax_vae::prelude::*;
//!
//! let decoder = MatrixDecoderConfig::new(32, 16, 10, 50).init::<Backend>(&device);
//!
//! let z: Tensor<Backend, 2> = /* [4, 32] latent */;
//! let logits = decoder.forward(z.clone())?;       // [4, 10, 50]
//! let tokens = decoder.predict_tokens(z)?;        // [4, 10]
//! let lengths = sequence_lengths(tokens, EOS_ID)?; // [4]
//! ```

pub mod decoder;
pub mod feed_forward;
pub mod latent;
pub mod mapper;

pub use decoder::{sequence_lengths, MatrixDecoder, MatrixDecoderConfig, VarMd, VarMdConfig};
pub use feed_forward::FeedForward;
pub use latent::{IdentityLatent, LatentPreprocessor, Reparameterize};
pub use mapper::{MatrixMapper, MatrixMapperConfig};
