//! Matrix Mapper
//!
//! Maps a feature vector onto a `k_dim × v_dim` matrix through a learned
//! rank-1 factorization: two independent feed-forward branches produce a key
//! and a value vector, and their outer product is the matrix.

use burn::config::Config;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::feed_forward::FeedForward;
use crate::error::Error;

/// Configuration for [`MatrixMapper`]
#[derive(Config, Debug)]
pub struct MatrixMapperConfig {
    /// Width of the incoming feature vectors
    pub input_dim: usize,
    /// Bottleneck width of both branches
    pub hidden_dim: usize,
    /// Number of rows of the produced matrix
    pub k_dim: usize,
    /// Number of columns of the produced matrix
    pub v_dim: usize,
    /// Dropout probability inside both branches
    #[config(default = "0.1")]
    pub dropout: f64,
}

impl MatrixMapperConfig {
    /// Initialize a new matrix mapper
    pub fn init<B: Backend>(&self, device: &B::Device) -> MatrixMapper<B> {
        tracing::debug!(
            input_dim = self.input_dim,
            hidden_dim = self.hidden_dim,
            k_dim = self.k_dim,
            v_dim = self.v_dim,
            dropout = self.dropout,
            "initializing matrix mapper"
        );

        MatrixMapper {
            k_mapper: FeedForward::new(
                self.input_dim,
                self.hidden_dim,
                self.k_dim,
                self.dropout,
                true,
                device,
            ),
            v_mapper: FeedForward::new(
                self.input_dim,
                self.hidden_dim,
                self.v_dim,
                self.dropout,
                true,
                device,
            ),
            input_dim: self.input_dim,
            k_dim: self.k_dim,
            v_dim: self.v_dim,
        }
    }
}

/// Rank-1 matrix generator
///
/// ```text
/// k = W_k2 · drop(relu(W_k1 · drop(z)))   [batch, k_dim]
/// v = W_v2 · drop(relu(W_v1 · drop(z)))   [batch, v_dim]
/// M = k ⊗ v                               [batch, k_dim, v_dim]
/// ```
#[derive(Module, Debug)]
pub struct MatrixMapper<B: Backend> {
    k_mapper: FeedForward<B>,
    v_mapper: FeedForward<B>,
    input_dim: usize,
    k_dim: usize,
    v_dim: usize,
}

impl<B: Backend> MatrixMapper<B> {
    /// Create a new matrix mapper
    ///
    /// # Arguments
    /// * `input_dim` - Width of the feature vectors
    /// * `hidden_dim` - Bottleneck width of the key and value branches
    /// * `k_dim` - Rows of the produced matrix
    /// * `v_dim` - Columns of the produced matrix
    /// * `dropout` - Dropout probability (0.1 is the usual choice)
    /// * `device` - Device to create the module on
    pub fn new(
        input_dim: usize,
        hidden_dim: usize,
        k_dim: usize,
        v_dim: usize,
        dropout: f64,
        device: &B::Device,
    ) -> Self {
        MatrixMapperConfig::new(input_dim, hidden_dim, k_dim, v_dim)
            .with_dropout(dropout)
            .init(device)
    }

    /// Get input width
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Get number of rows of the produced matrices
    pub fn k_dim(&self) -> usize {
        self.k_dim
    }

    /// Get number of columns of the produced matrices
    pub fn v_dim(&self) -> usize {
        self.v_dim
    }

    fn check_input(&self, inputs: &Tensor<B, 2>) -> crate::error::Result<()> {
        let [_, width] = inputs.dims();
        if width != self.input_dim {
            return Err(Error::shape_mismatch(
                "MatrixMapper input width",
                self.input_dim,
                width,
            ));
        }
        Ok(())
    }

    /// Compute the key and value vectors without forming their product
    ///
    /// # Returns
    /// Tuple of (key `[batch, k_dim]`, value `[batch, v_dim]`)
    pub fn key_value(&self, inputs: Tensor<B, 2>) -> crate::error::Result<(Tensor<B, 2>, Tensor<B, 2>)> {
        self.check_input(&inputs)?;

        let k_vec = self.k_mapper.forward(inputs.clone());
        let v_vec = self.v_mapper.forward(inputs);
        Ok((k_vec, v_vec))
    }

    /// Map a batch of feature vectors to a batch of matrices
    ///
    /// # Arguments
    /// * `inputs` - Encoder output or latent variable of shape `[batch, input_dim]`
    ///
    /// # Returns
    /// Tensor of shape `[batch, k_dim, v_dim]`, rank ≤ 1 per batch element
    pub fn forward(&self, inputs: Tensor<B, 2>) -> crate::error::Result<Tensor<B, 3>> {
        let [batch_size, _] = inputs.dims();
        let (k_vec, v_vec) = self.key_value(inputs)?;

        // Column times row: [batch, k, 1] x [batch, 1, v]
        let post_k = k_vec.reshape([batch_size, self.k_dim, 1]);
        let post_v = v_vec.reshape([batch_size, 1, self.v_dim]);

        tracing::trace!(batch_size, k_dim = self.k_dim, v_dim = self.v_dim, "matrix mapper forward");
        Ok(post_k.matmul(post_v))
    }
}
