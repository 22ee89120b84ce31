//! Effect-size distributions for selected mutations.
//!
//! Each variant draws a selection coefficient `s`. For every variant except
//! [`EffectSizeModel::EyreWalker`] the trait effect of the new mutation is
//! `s` itself; the Eyre-Walker model derives a separate trait effect
//! `sign(s) * |s|^tau * 10^N(0, sigma)` from the drawn coefficient.

use rand::Rng;
use rand_distr::{Distribution, Exp, Gamma, Normal};
use serde::{Deserialize, Serialize};

use crate::errors::EffectSizeError;

use super::Region;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectSizeModel {
    /// Point mass at `s`.
    Constant { s: f64 },
    Uniform { lo: f64, hi: f64 },
    /// Exponential with the given mean; a negative mean gives negative draws.
    Exponential { mean: f64 },
    /// Gamma with the given mean and shape; the sign of `mean` is kept.
    Gamma { mean: f64, shape: f64 },
    /// Normal with mean zero.
    Gaussian { sd: f64 },
    /// Gamma-distributed `s` with the composite trait effect of
    /// Eyre-Walker (2010).
    EyreWalker {
        mean: f64,
        shape: f64,
        tau: f64,
        sigma: f64,
    },
}

impl EffectSizeModel {
    pub fn validate(&self) -> Result<(), EffectSizeError> {
        match *self {
            Self::Constant { s } => finite("constant", "s", s),
            Self::Uniform { lo, hi } => {
                finite("uniform", "lo", lo)?;
                finite("uniform", "hi", hi)?;
                if hi < lo {
                    return Err(invalid("uniform", "hi", hi));
                }
                Ok(())
            }
            Self::Exponential { mean } => {
                finite("exponential", "mean", mean)?;
                if mean == 0.0 {
                    return Err(invalid("exponential", "mean", mean));
                }
                Ok(())
            }
            Self::Gamma { mean, shape } => check_gamma("gamma", mean, shape),
            Self::Gaussian { sd } => {
                finite("gaussian", "sd", sd)?;
                if sd < 0.0 {
                    return Err(invalid("gaussian", "sd", sd));
                }
                Ok(())
            }
            Self::EyreWalker { mean, shape, tau, sigma } => {
                check_gamma("eyre_walker", mean, shape)?;
                finite("eyre_walker", "tau", tau)?;
                finite("eyre_walker", "sigma", sigma)?;
                if sigma < 0.0 {
                    return Err(invalid("eyre_walker", "sigma", sigma));
                }
                Ok(())
            }
        }
    }

    /// Draw a selection coefficient.
    ///
    /// Parameters are assumed valid (see [`validate`](Self::validate));
    /// draws from an invalid model return `0.0`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Constant { s } => s,
            Self::Uniform { lo, hi } => {
                if hi > lo {
                    rng.random_range(lo..hi)
                } else {
                    lo
                }
            }
            Self::Exponential { mean } => match Exp::new(1.0 / mean.abs()) {
                Ok(exp) => mean.signum() * exp.sample(rng),
                Err(_) => 0.0,
            },
            Self::Gamma { mean, shape } | Self::EyreWalker { mean, shape, .. } => {
                signed_gamma(mean, shape, rng)
            }
            Self::Gaussian { sd } => match Normal::new(0.0, sd) {
                Ok(normal) => normal.sample(rng),
                Err(_) => 0.0,
            },
        }
    }

    /// Draw `(selection_coefficient, trait_effect)` for a new mutation.
    pub fn sample_mutation<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let s = self.sample(rng);
        match *self {
            Self::EyreWalker { tau, sigma, .. } => (s, eyre_walker_effect(s, tau, sigma, rng)),
            _ => (s, s),
        }
    }
}

/// A selected region: where selected mutations arise and how their effects
/// are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedRegion {
    #[serde(flatten)]
    pub region: Region,
    pub effects: EffectSizeModel,
}

impl SelectedRegion {
    pub fn new(begin: f64, end: f64, weight: f64, effects: EffectSizeModel) -> Self {
        Self {
            region: Region::new(begin, end, weight),
            effects,
        }
    }
}

/// `sign(s) * |s|^tau * 10^N(0, sigma)`.
pub fn eyre_walker_effect<R: Rng + ?Sized>(s: f64, tau: f64, sigma: f64, rng: &mut R) -> f64 {
    let noise = match Normal::new(0.0, sigma) {
        Ok(normal) => normal.sample(rng),
        Err(_) => 0.0,
    };
    s.signum() * s.abs().powf(tau) * 10f64.powf(noise)
}

fn signed_gamma<R: Rng + ?Sized>(mean: f64, shape: f64, rng: &mut R) -> f64 {
    match Gamma::new(shape, mean.abs() / shape) {
        Ok(gamma) => mean.signum() * gamma.sample(rng),
        Err(_) => 0.0,
    }
}

fn check_gamma(distribution: &'static str, mean: f64, shape: f64) -> Result<(), EffectSizeError> {
    finite(distribution, "mean", mean)?;
    finite(distribution, "shape", shape)?;
    if mean == 0.0 {
        return Err(invalid(distribution, "mean", mean));
    }
    if shape <= 0.0 {
        return Err(invalid(distribution, "shape", shape));
    }
    Ok(())
}

fn finite(distribution: &'static str, parameter: &'static str, value: f64) -> Result<(), EffectSizeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(distribution, parameter, value))
    }
}

fn invalid(distribution: &'static str, parameter: &'static str, value: f64) -> EffectSizeError {
    EffectSizeError::InvalidParameter {
        distribution,
        parameter,
        value,
    }
}
