//! Base recurrent network
//!
//! Shared configuration and embedding table for the recurrent encoders and
//! decoders of the model. The recurrent computation itself lives in concrete
//! implementations of [`RecurrentNetwork`].

use std::fmt;
use std::str::FromStr;

use burn::config::Config;
use burn::module::{Ignored, Module};
use burn::nn::{Dropout, DropoutConfig, Embedding, EmbeddingConfig};
use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Int, Tensor};

use crate::error::Error;

/// Recurrent cell family
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RnnCellKind {
    Lstm,
    Gru,
}

impl FromStr for RnnCellKind {
    type Err = Error;

    /// Case-insensitive: `"lstm"`, `"LSTM"`, `"gru"`, `"GRU"`, ...
    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "lstm" => Ok(Self::Lstm),
            "gru" => Ok(Self::Gru),
            _ => Err(Error::UnsupportedRnnCell(s.to_string())),
        }
    }
}

impl fmt::Display for RnnCellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lstm => write!(f, "lstm"),
            Self::Gru => write!(f, "gru"),
        }
    }
}

/// Configuration for [`BaseRnn`]
#[derive(Config, Debug)]
pub struct BaseRnnConfig {
    /// Size of the vocabulary
    pub vocab_size: usize,
    /// Maximum allowed length of a processed sequence
    pub max_len: usize,
    /// Embedding width fed to the first recurrent layer
    pub input_size: usize,
    /// Number of features in the hidden state
    pub hidden_size: usize,
    /// Type of recurrent cell, `lstm` or `gru` (any case)
    pub rnn_cell: String,
    /// Dropout applied to the embedded input sequence
    #[config(default = "0.0")]
    pub embed_droprate: f64,
    /// Dropout between stacked recurrent layers
    #[config(default = "0.0")]
    pub rnn_droprate: f64,
    /// Number of recurrent layers
    #[config(default = "1")]
    pub n_layers: usize,
}

impl BaseRnnConfig {
    /// Initialize the shared base
    ///
    /// Fails with [`Error::UnsupportedRnnCell`] when `rnn_cell` is not a
    /// known cell family, and with [`Error::InvalidConfig`] when `n_layers`
    /// is 0.
    pub fn init<B: Backend>(&self, device: &B::Device) -> crate::error::Result<BaseRnn<B>> {
        let rnn_cell: RnnCellKind = self.rnn_cell.parse()?;
        if self.n_layers == 0 {
            return Err(Error::InvalidConfig(
                "n_layers must be at least 1".to_string(),
            ));
        }

        let rnn_droprate = if self.n_layers > 1 {
            self.rnn_droprate
        } else {
            if self.rnn_droprate > 0.0 {
                tracing::warn!(
                    rnn_droprate = self.rnn_droprate,
                    n_layers = self.n_layers,
                    "inter-layer dropout ignored for a single recurrent layer"
                );
            }
            0.0
        };

        tracing::debug!(
            vocab_size = self.vocab_size,
            max_len = self.max_len,
            hidden_size = self.hidden_size,
            n_layers = self.n_layers,
            rnn_cell = %rnn_cell,
            "initializing base rnn"
        );

        Ok(BaseRnn {
            embedding: EmbeddingConfig::new(self.vocab_size, self.input_size).init(device),
            embed_dropout: DropoutConfig::new(self.embed_droprate).init(),
            vocab_size: self.vocab_size,
            max_len: self.max_len,
            input_size: self.input_size,
            hidden_size: self.hidden_size,
            n_layers: self.n_layers,
            rnn_droprate,
            rnn_cell: Ignored(rnn_cell),
        })
    }
}

/// Shared state of every recurrent network
///
/// Not usable on its own: [`RecurrentNetwork::forward`] on a `BaseRnn`
/// returns [`Error::NotImplemented`].
#[derive(Module, Debug)]
pub struct BaseRnn<B: Backend> {
    embedding: Embedding<B>,
    embed_dropout: Dropout,
    vocab_size: usize,
    max_len: usize,
    input_size: usize,
    hidden_size: usize,
    n_layers: usize,
    rnn_droprate: f64,
    rnn_cell: Ignored<RnnCellKind>,
}

impl<B: Backend> BaseRnn<B> {
    /// Masking symbol
    pub const SYM_MASK: &'static str = "MASK";
    /// End-of-sequence symbol
    pub const SYM_EOS: &'static str = "EOS";

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn n_layers(&self) -> usize {
        self.n_layers
    }

    /// Effective inter-layer dropout (0 for a single layer)
    pub fn rnn_droprate(&self) -> f64 {
        self.rnn_droprate
    }

    pub fn rnn_cell(&self) -> RnnCellKind {
        self.rnn_cell.0
    }

    /// Embed a batch of token ids and apply the embedding dropout
    ///
    /// # Arguments
    /// * `tokens` - Token ids of shape `[batch, seq_len]`, `seq_len <= max_len`,
    ///   every id in `0..vocab_size`
    ///
    /// # Returns
    /// Tensor of shape `[batch, seq_len, input_size]`
    pub fn embed(&self, tokens: Tensor<B, 2, Int>) -> crate::error::Result<Tensor<B, 3>> {
        let [_, seq_len] = tokens.dims();
        if seq_len == 0 || seq_len > self.max_len {
            return Err(Error::shape_mismatch(
                "BaseRnn sequence length",
                format!("1..={}", self.max_len),
                seq_len,
            ));
        }
        self.check_tokens(&tokens)?;

        let embedded = self.embedding.forward(tokens);
        Ok(self.embed_dropout.forward(embedded))
    }

    /// Embedding lookups past the table panic inside the backend
    fn check_tokens(&self, tokens: &Tensor<B, 2, Int>) -> crate::error::Result<()> {
        let min = tokens.clone().min().into_scalar().elem::<i64>();
        let max = tokens.clone().max().into_scalar().elem::<i64>();

        for token in [min, max] {
            if token < 0 || token >= self.vocab_size as i64 {
                return Err(Error::TokenOutOfRange {
                    token,
                    vocab_size: self.vocab_size,
                });
            }
        }
        Ok(())
    }
}

/// Contract of the recurrent encoder/decoder family
pub trait RecurrentNetwork<B: Backend> {
    type Output;

    /// Shared configuration and embedding
    fn base(&self) -> &BaseRnn<B>;

    /// Run the network over a batch of token ids `[batch, seq_len]`
    ///
    /// Concrete networks override this; the default fails.
    fn forward(&self, tokens: Tensor<B, 2, Int>) -> crate::error::Result<Self::Output> {
        let _ = tokens;
        Err(Error::NotImplemented("forward"))
    }
}

impl<B: Backend> RecurrentNetwork<B> for BaseRnn<B> {
    type Output = Tensor<B, 3>;

    fn base(&self) -> &BaseRnn<B> {
        self
    }
}
