//! # Recurrent Cells
//!
//! Single-timestep cells used by [`EncoderRnn`](crate::rnn::EncoderRnn).
//! The cell family is picked once at construction through
//! [`RnnCellKind`](crate::rnn::RnnCellKind).
//!
//! | Cell | State | Gates |
//! |------|-------|-------|
//! | [`LSTMCell`] | `(hidden, cell)` | input, forget, candidate, output |
//! | [`GRUCell`] | `hidden` | reset, update, candidate |
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `input` | `[batch, input_size]` |
//! | `hidden_state` / `cell_state` | `[batch, hidden_size]` |

pub mod gru_cell;
pub mod lstm_cell;

pub use gru_cell::GRUCell;
pub use lstm_cell::LSTMCell;
