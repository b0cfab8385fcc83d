//! Recurrent Sequence Encoder
//!
//! Stacked LSTM or GRU encoder built on [`BaseRnn`]. Its final hidden state
//! is the feature vector consumed by the matrix decoder.

use burn::module::Module;
use burn::nn::{Dropout, DropoutConfig};
use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};

use super::base::{BaseRnn, BaseRnnConfig, RecurrentNetwork, RnnCellKind};
use crate::cells::{GRUCell, LSTMCell};
use crate::error::Result;

/// Output of [`EncoderRnn::forward`]
#[derive(Debug, Clone)]
pub struct EncoderOutput<B: Backend> {
    /// Top-layer hidden state at every step, `[batch, seq_len, hidden_size]`
    pub outputs: Tensor<B, 3>,
    /// Top-layer hidden state after the last step, `[batch, hidden_size]`
    pub hidden: Tensor<B, 2>,
}

/// Stacked recurrent encoder
///
/// Only the layer list matching [`BaseRnn::rnn_cell`] is populated.
#[derive(Module, Debug)]
pub struct EncoderRnn<B: Backend> {
    base: BaseRnn<B>,
    lstm_layers: Vec<LSTMCell<B>>,
    gru_layers: Vec<GRUCell<B>>,
    rnn_dropout: Dropout,
}

impl<B: Backend> EncoderRnn<B> {
    /// Create a new encoder
    ///
    /// Fails when the configured cell type is unsupported.
    pub fn new(config: &BaseRnnConfig, device: &B::Device) -> Result<Self> {
        let base = config.init::<B>(device)?;

        let layer_input_size = |layer: usize| {
            if layer == 0 {
                base.input_size()
            } else {
                base.hidden_size()
            }
        };

        let mut lstm_layers = Vec::new();
        let mut gru_layers = Vec::new();
        for layer in 0..base.n_layers() {
            match base.rnn_cell() {
                RnnCellKind::Lstm => lstm_layers.push(LSTMCell::new(
                    layer_input_size(layer),
                    base.hidden_size(),
                    device,
                )),
                RnnCellKind::Gru => gru_layers.push(GRUCell::new(
                    layer_input_size(layer),
                    base.hidden_size(),
                    device,
                )),
            }
        }

        let rnn_dropout = DropoutConfig::new(base.rnn_droprate()).init();

        Ok(Self {
            base,
            lstm_layers,
            gru_layers,
            rnn_dropout,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.base.hidden_size()
    }

    /// Run one layer over the whole sequence
    fn run_layer(&self, layer: usize, input: Tensor<B, 3>) -> (Tensor<B, 3>, Tensor<B, 2>) {
        let [batch_size, seq_len, _] = input.dims();
        let device = input.device();
        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);

        match self.base.rnn_cell() {
            RnnCellKind::Lstm => {
                let cell = &self.lstm_layers[layer];
                let mut state = cell.init_state(batch_size, &device);
                for t in 0..seq_len {
                    let step_input = input.clone().narrow(1, t, 1).squeeze_dims::<2>(&[1]);
                    state = cell.forward(step_input, state);
                    outputs.push(state.0.clone());
                }
            }
            RnnCellKind::Gru => {
                let cell = &self.gru_layers[layer];
                let mut hidden = cell.init_state(batch_size, &device);
                for t in 0..seq_len {
                    let step_input = input.clone().narrow(1, t, 1).squeeze_dims::<2>(&[1]);
                    hidden = cell.forward(step_input, hidden);
                    outputs.push(hidden.clone());
                }
            }
        }

        let last = outputs[seq_len - 1].clone();
        (Tensor::stack(outputs, 1), last)
    }
}

impl<B: Backend> RecurrentNetwork<B> for EncoderRnn<B> {
    type Output = EncoderOutput<B>;

    fn base(&self) -> &BaseRnn<B> {
        &self.base
    }

    /// Encode token ids of shape `[batch, seq_len]`
    fn forward(&self, tokens: Tensor<B, 2, Int>) -> Result<EncoderOutput<B>> {
        // embed() rejects empty and over-long sequences and unknown ids
        let embedded = self.base.embed(tokens)?;
        let [batch_size, _, _] = embedded.dims();
        let n_layers = self.base.n_layers();

        // BaseRnnConfig::init guarantees at least one layer
        let (mut outputs, mut hidden) = self.run_layer(0, embedded);
        for layer in 1..n_layers {
            let layer_input = self.rnn_dropout.forward(outputs);
            (outputs, hidden) = self.run_layer(layer, layer_input);
        }

        tracing::trace!(batch_size, n_layers, "encoder forward");
        Ok(EncoderOutput { outputs, hidden })
    }
}
