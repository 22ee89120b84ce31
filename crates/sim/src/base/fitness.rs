use serde::{Deserialize, Serialize};

/// A fitness value constrained to the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FitnessValue(f64);

impl FitnessValue {
    pub const LETHAL: Self = Self(0.0);

    /// Creates a new FitnessValue, clamping the input to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the inner f64 value.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Natural logarithm of a fitness value, kept in [-∞, 0.0].
///
/// Gaussian fitness functions are naturally expressed in log space, where a
/// large deviation from the optimum is just a large negative number instead
/// of an underflowed zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct LogFitnessValue(f64);

impl LogFitnessValue {
    /// Creates a new LogFitnessValue, clamping values above 0.0.
    pub fn new(log_value: f64) -> Self {
        Self(log_value.min(0.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Converts to the linear-scale fitness value.
    pub fn exp(self) -> FitnessValue {
        FitnessValue::new(self.0.exp())
    }
}
