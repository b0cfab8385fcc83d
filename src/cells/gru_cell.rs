use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Single-step GRU cell
///
/// With `x_* = W_x @ x + b_x` and `h_* = W_h @ h + b_h` split in three chunks:
/// - r = sigmoid(x_r + h_r)
/// - u = sigmoid(x_u + h_u)
/// - n = tanh(x_n + r * h_n)
/// - h' = (1 - u) * n + u * h
#[derive(Module, Debug)]
pub struct GRUCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    input_map: Linear<B>,     // input -> 3 * hidden_size
    recurrent_map: Linear<B>, // hidden -> 3 * hidden_size
}

impl<B: Backend> GRUCell<B> {
    /// Create a new GRU cell
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = LinearConfig::new(input_size, 3 * hidden_size)
            .with_bias(true)
            .init(device);

        // The recurrent bias sits inside the reset product for the candidate gate
        let recurrent_map = LinearConfig::new(hidden_size, 3 * hidden_size)
            .with_bias(true)
            .init(device);

        Self {
            input_size,
            hidden_size,
            input_map,
            recurrent_map,
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Zero hidden state for a batch
    pub fn init_state(&self, batch_size: usize, device: &B::Device) -> Tensor<B, 2> {
        Tensor::zeros([batch_size, self.hidden_size], device)
    }

    /// Advance one timestep
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `hidden_state` - Previous state of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// New hidden state of shape `[batch_size, hidden_size]`
    pub fn forward(&self, input: Tensor<B, 2>, hidden_state: Tensor<B, 2>) -> Tensor<B, 2> {
        let x_chunks = self.input_map.forward(input).chunk(3, 1);
        let h_chunks = self.recurrent_map.forward(hidden_state.clone()).chunk(3, 1);

        let reset = activation::sigmoid(x_chunks[0].clone() + h_chunks[0].clone());
        let update = activation::sigmoid(x_chunks[1].clone() + h_chunks[1].clone());
        let candidate = (x_chunks[2].clone() + reset * h_chunks[2].clone()).tanh();

        // (1 - u) * n + u * h  ==  n + u * (h - n)
        candidate.clone() + update * (hidden_state - candidate)
    }
}
