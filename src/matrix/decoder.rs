//! Matrix Decoder
//!
//! Non-recurrent decoder that turns one latent vector per sequence into
//! per-position vocabulary logits. A control matrix `R⁻¹` (max_len × max_len)
//! blends the rows of a semantic matrix `S` (max_len × hidden), and a shared
//! word predictor maps every blended row to the vocabulary.

use burn::config::Config;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};

use super::feed_forward::FeedForward;
use super::latent::{IdentityLatent, LatentPreprocessor, Reparameterize};
use super::mapper::MatrixMapper;
use crate::error::Error;
use crate::sequence::find_val;

/// Configuration for [`MatrixDecoder`]
#[derive(Config, Debug)]
pub struct MatrixDecoderConfig {
    /// Width of the latent / encoder feature vectors
    pub input_dim: usize,
    /// Hidden width of the mappers and of the word predictor
    pub hidden_dim: usize,
    /// Number of generated positions
    pub max_len: usize,
    /// Size of the output vocabulary
    pub vocab_size: usize,
    /// Dropout inside both matrix mappers
    #[config(default = "0.1")]
    pub dropm: f64,
    /// Dropout inside the word predictor
    #[config(default = "0.1")]
    pub dropo: f64,
}

impl MatrixDecoderConfig {
    /// Initialize a new matrix decoder
    pub fn init<B: Backend>(&self, device: &B::Device) -> MatrixDecoder<B> {
        tracing::debug!(
            input_dim = self.input_dim,
            hidden_dim = self.hidden_dim,
            max_len = self.max_len,
            vocab_size = self.vocab_size,
            "initializing matrix decoder"
        );

        let control_matrix_mapper = MatrixMapper::new(
            self.input_dim,
            self.hidden_dim,
            self.max_len,
            self.max_len,
            self.dropm,
            device,
        );
        let semantic_matrix_mapper = MatrixMapper::new(
            self.input_dim,
            self.hidden_dim,
            self.max_len,
            self.hidden_dim,
            self.dropm,
            device,
        );
        let word_predictor = FeedForward::new(
            self.hidden_dim,
            self.hidden_dim,
            self.vocab_size,
            self.dropo,
            false,
            device,
        );

        MatrixDecoder {
            control_matrix_mapper,
            semantic_matrix_mapper,
            word_predictor,
            input_dim: self.input_dim,
            hidden_dim: self.hidden_dim,
            max_len: self.max_len,
            vocab_size: self.vocab_size,
        }
    }
}

/// Matrix-factorized sequence decoder
///
/// ```text
/// R⁻¹ = control_mapper(z_c)     [batch, max_len, max_len]
/// S   = semantic_mapper(z_s)    [batch, max_len, hidden]
/// H   = R⁻¹ · S                 [batch, max_len, hidden]
/// out = word_predictor(H)       [batch, max_len, vocab]
/// ```
///
/// Row `i` of `H` is the mix of the rows of `S` weighted by row `i` of `R⁻¹`.
#[derive(Module, Debug)]
pub struct MatrixDecoder<B: Backend> {
    control_matrix_mapper: MatrixMapper<B>,
    semantic_matrix_mapper: MatrixMapper<B>,
    word_predictor: FeedForward<B>,
    input_dim: usize,
    hidden_dim: usize,
    max_len: usize,
    vocab_size: usize,
}

impl<B: Backend> MatrixDecoder<B> {
    /// Create a new matrix decoder
    ///
    /// # Arguments
    /// * `input_dim` - Width of the latent / feature vectors
    /// * `hidden_dim` - Hidden width
    /// * `max_len` - Number of generated positions
    /// * `vocab_size` - Output vocabulary size
    /// * `dropm` - Mapper dropout
    /// * `dropo` - Word predictor dropout
    /// * `device` - Device to create the module on
    pub fn new(
        input_dim: usize,
        hidden_dim: usize,
        max_len: usize,
        vocab_size: usize,
        dropm: f64,
        dropo: f64,
        device: &B::Device,
    ) -> Self {
        MatrixDecoderConfig::new(input_dim, hidden_dim, max_len, vocab_size)
            .with_dropm(dropm)
            .with_dropo(dropo)
            .init(device)
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Control mapper producing `[batch, max_len, max_len]` matrices
    pub fn control_matrix_mapper(&self) -> &MatrixMapper<B> {
        &self.control_matrix_mapper
    }

    /// Semantic mapper producing `[batch, max_len, hidden_dim]` matrices
    pub fn semantic_matrix_mapper(&self) -> &MatrixMapper<B> {
        &self.semantic_matrix_mapper
    }

    /// Product of the control and semantic matrices, one row per position
    ///
    /// # Returns
    /// Tensor of shape `[batch, max_len, hidden_dim]`
    pub fn decoder_init(
        &self,
        con_inputs: Tensor<B, 2>,
        sem_inputs: Tensor<B, 2>,
    ) -> crate::error::Result<Tensor<B, 3>> {
        let con_batch = con_inputs.dims()[0];
        let sem_batch = sem_inputs.dims()[0];
        if con_batch != sem_batch {
            return Err(Error::shape_mismatch(
                "MatrixDecoder semantic batch size",
                con_batch,
                sem_batch,
            ));
        }

        let con_mat = self.control_matrix_mapper.forward(con_inputs)?;
        let sem_mat = self.semantic_matrix_mapper.forward(sem_inputs)?;
        Ok(con_mat.matmul(sem_mat))
    }

    /// Decode separate control and semantic inputs
    ///
    /// # Arguments
    /// * `con_inputs` - Control source of shape `[batch, input_dim]`
    /// * `sem_inputs` - Semantic source of shape `[batch, input_dim]`
    ///
    /// # Returns
    /// Vocabulary logits of shape `[batch, max_len, vocab_size]`
    pub fn generate(&self, con_inputs: Tensor<B, 2>, sem_inputs: Tensor<B, 2>) -> crate::error::Result<Tensor<B, 3>> {
        let dec_init = self.decoder_init(con_inputs, sem_inputs)?;
        Ok(self.word_predictor.forward(dec_init))
    }

    /// Decode using the same vector as control and semantic source
    pub fn forward(&self, inputs: Tensor<B, 2>) -> crate::error::Result<Tensor<B, 3>> {
        self.generate(inputs.clone(), inputs)
    }

    /// Greedy token ids, the arg-max of [`forward`](Self::forward) per position
    ///
    /// # Returns
    /// Tensor of shape `[batch, max_len]`
    pub fn predict_tokens(&self, inputs: Tensor<B, 2>) -> crate::error::Result<Tensor<B, 2, Int>> {
        let logits = self.forward(inputs)?;
        Ok(logits.argmax(2).squeeze_dims::<2>(&[2]))
    }
}

/// Length of each decoded sequence, counting the first EOS marker
///
/// Rows without `eos_id` are given the full row length.
pub fn sequence_lengths<B: Backend>(tokens: Tensor<B, 2, Int>, eos_id: i64) -> crate::error::Result<Tensor<B, 1, Int>> {
    let [_, max_len] = tokens.dims();
    let (found, index) = find_val(tokens, eos_id)?;

    let found_len = found.clone().int() * (index + 1);
    let missing_len = found.bool_not().int() * (max_len as i64);
    Ok(found_len + missing_len)
}

/// Configuration for [`VarMd`]
#[derive(Config, Debug)]
pub struct VarMdConfig {
    /// Width of the vectors fed to the matrix mappers
    pub input_dim: usize,
    /// Width of the variational latent
    pub latent_dim: usize,
    pub hidden_dim: usize,
    pub max_len: usize,
    pub vocab_size: usize,
    #[config(default = "0.1")]
    pub dropm: f64,
    #[config(default = "0.1")]
    pub dropo: f64,
}

impl VarMdConfig {
    /// Initialize a new variational matrix decoder
    pub fn init<B: Backend>(&self, device: &B::Device) -> VarMd<B> {
        let decoder = MatrixDecoderConfig::new(
            self.input_dim,
            self.hidden_dim,
            self.max_len,
            self.vocab_size,
        )
        .with_dropm(self.dropm)
        .with_dropo(self.dropo)
        .init(device);

        VarMd {
            decoder,
            latent_dim: self.latent_dim,
        }
    }
}

/// Matrix decoder for variational latents
///
/// Wraps a [`MatrixDecoder`] and runs a [`LatentPreprocessor`] on the
/// incoming latent before matrix generation. With [`IdentityLatent`] it
/// behaves exactly like the wrapped decoder. [`sample`](Self::sample) reads
/// `[mean, log_var]` latents of width `2 * latent_dim`.
#[derive(Module, Debug)]
pub struct VarMd<B: Backend> {
    decoder: MatrixDecoder<B>,
    latent_dim: usize,
}

impl<B: Backend> VarMd<B> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input_dim: usize,
        latent_dim: usize,
        hidden_dim: usize,
        max_len: usize,
        vocab_size: usize,
        dropm: f64,
        dropo: f64,
        device: &B::Device,
    ) -> Self {
        VarMdConfig::new(input_dim, latent_dim, hidden_dim, max_len, vocab_size)
            .with_dropm(dropm)
            .with_dropo(dropo)
            .init(device)
    }

    pub fn latent_dim(&self) -> usize {
        self.latent_dim
    }

    /// Gaussian reparameterization emitting `latent_dim` features
    pub fn reparameterizer(&self) -> Reparameterize {
        Reparameterize::new(self.latent_dim)
    }

    /// The wrapped decoder
    pub fn decoder(&self) -> &MatrixDecoder<B> {
        &self.decoder
    }

    /// Preprocess both sources, then decode them
    pub fn generate_with<P: LatentPreprocessor<B>>(
        &self,
        preprocessor: &P,
        con_inputs: Tensor<B, 2>,
        sem_inputs: Tensor<B, 2>,
    ) -> crate::error::Result<Tensor<B, 3>> {
        let con = self.preprocess(preprocessor, con_inputs)?;
        let sem = self.preprocess(preprocessor, sem_inputs)?;
        self.decoder.generate(con, sem)
    }

    /// Preprocess a single latent once and use it as both sources
    pub fn forward_with<P: LatentPreprocessor<B>>(
        &self,
        preprocessor: &P,
        latent: Tensor<B, 2>,
    ) -> crate::error::Result<Tensor<B, 3>> {
        let z = self.preprocess(preprocessor, latent)?;
        self.decoder.forward(z)
    }

    /// Decode a `[batch, 2 * latent_dim]` latent through
    /// [`reparameterizer`](Self::reparameterizer)
    pub fn sample(&self, latent: Tensor<B, 2>) -> crate::error::Result<Tensor<B, 3>> {
        self.forward_with(&self.reparameterizer(), latent)
    }

    fn preprocess<P: LatentPreprocessor<B>>(
        &self,
        preprocessor: &P,
        latent: Tensor<B, 2>,
    ) -> crate::error::Result<Tensor<B, 2>> {
        let z = preprocessor.preprocess(latent)?;
        let [_, width] = z.dims();
        if width != self.decoder.input_dim() {
            return Err(Error::shape_mismatch(
                "VarMd preprocessed latent width",
                self.decoder.input_dim(),
                width,
            ));
        }
        Ok(z)
    }

    pub fn generate(&self, con_inputs: Tensor<B, 2>, sem_inputs: Tensor<B, 2>) -> crate::error::Result<Tensor<B, 3>> {
        self.generate_with(&IdentityLatent, con_inputs, sem_inputs)
    }

    pub fn forward(&self, inputs: Tensor<B, 2>) -> crate::error::Result<Tensor<B, 3>> {
        self.forward_with(&IdentityLatent, inputs)
    }
}
