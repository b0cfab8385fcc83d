//! Latent preprocessing stages applied before matrix generation.

use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Tensor};

use crate::error::{Error, Result};

/// A transformation applied to a latent batch before it reaches the mappers.
///
/// Implemented for [`IdentityLatent`], [`Reparameterize`] and any
/// `Fn(Tensor<B, 2>) -> Tensor<B, 2>` closure.
pub trait LatentPreprocessor<B: Backend> {
    /// Transform a latent batch of shape `[batch, features]`
    fn preprocess(&self, latent: Tensor<B, 2>) -> Result<Tensor<B, 2>>;
}

/// Pass-through stage
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLatent;

impl<B: Backend> LatentPreprocessor<B> for IdentityLatent {
    fn preprocess(&self, latent: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
        Ok(latent)
    }
}

impl<B, F> LatentPreprocessor<B> for F
where
    B: Backend,
    F: Fn(Tensor<B, 2>) -> Tensor<B, 2>,
{
    fn preprocess(&self, latent: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
        Ok(self(latent))
    }
}

/// Gaussian reparameterization
///
/// Reads `[batch, 2 * latent_dim]` as the concatenation `[mean, log_var]`
/// and emits `[batch, latent_dim]`:
///
/// ```text
/// z = mean + exp(0.5 * log_var) * ε,   ε ~ N(0, 1)
/// ```
///
/// Sampling only happens on autodiff (training) backends. On inference
/// backends the mean is returned so decoding stays deterministic.
#[derive(Debug, Clone, Copy)]
pub struct Reparameterize {
    latent_dim: usize,
}

impl Reparameterize {
    pub fn new(latent_dim: usize) -> Self {
        Self { latent_dim }
    }

    /// Width of the emitted latent
    pub fn latent_dim(&self) -> usize {
        self.latent_dim
    }
}

impl<B: Backend> LatentPreprocessor<B> for Reparameterize {
    fn preprocess(&self, latent: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
        let [_, width] = latent.dims();
        if width != 2 * self.latent_dim {
            return Err(Error::shape_mismatch(
                "Reparameterize input width",
                2 * self.latent_dim,
                width,
            ));
        }

        let mean = latent.clone().narrow(1, 0, self.latent_dim);
        if !B::ad_enabled() {
            return Ok(mean);
        }

        let log_var = latent.narrow(1, self.latent_dim, self.latent_dim);
        let eps = Tensor::random_like(&mean, Distribution::Normal(0.0, 1.0));
        Ok(mean + (log_var * 0.5).exp() * eps)
    }
}
