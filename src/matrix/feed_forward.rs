//! Two-layer feed-forward projection shared by the mappers and the word predictor.

use burn::module::Module;
use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Dropout → Linear → (ReLU) → Dropout → Linear
///
/// Both linear layers carry a bias. The ReLU between them is optional: the
/// matrix mapper branches use it, the decoder's word predictor does not.
/// Linear layers act on the last dimension, so the projection works on
/// `[batch, features]` as well as `[batch, rows, features]` tensors.
#[derive(Module, Debug)]
pub struct FeedForward<B: Backend> {
    input_dropout: Dropout,
    hidden: Linear<B>,
    hidden_dropout: Dropout,
    output: Linear<B>,
    relu: bool,
}

impl<B: Backend> FeedForward<B> {
    /// Create a new projection
    ///
    /// # Arguments
    /// * `input_dim` - Width of the incoming features
    /// * `hidden_dim` - Bottleneck width
    /// * `output_dim` - Width of the produced features
    /// * `dropout` - Dropout probability applied before each linear layer
    /// * `relu` - Whether to rectify the bottleneck activations
    pub fn new(
        input_dim: usize,
        hidden_dim: usize,
        output_dim: usize,
        dropout: f64,
        relu: bool,
        device: &B::Device,
    ) -> Self {
        let hidden = LinearConfig::new(input_dim, hidden_dim)
            .with_bias(true)
            .init(device);

        let output = LinearConfig::new(hidden_dim, output_dim)
            .with_bias(true)
            .init(device);

        Self {
            input_dropout: DropoutConfig::new(dropout).init(),
            hidden,
            hidden_dropout: DropoutConfig::new(dropout).init(),
            output,
            relu,
        }
    }

    /// Width expected on the last dimension of the input
    pub fn input_dim(&self) -> usize {
        self.hidden.weight.dims()[0]
    }

    /// Width produced on the last dimension of the output
    pub fn output_dim(&self) -> usize {
        self.output.weight.dims()[1]
    }

    pub fn forward<const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        let x = self.input_dropout.forward(input);
        let x = self.hidden.forward(x);
        let x = if self.relu { activation::relu(x) } else { x };
        let x = self.hidden_dropout.forward(x);
        self.output.forward(x)
    }
}
