use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Scalar nonlinearity shared by every neuron of a network.
///
/// Only the name is persisted with a network (see `Activation::name`), so a
/// loaded network gets its activation back by resolving that name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    Sigmoid,
    Tanh,
    ReLU,
    Identity,
    LeakyReLU { alpha: f64 },
}

impl Activation {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            Activation::Tanh => x.tanh(),
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
            Activation::Identity => x,
            Activation::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    /// Derivative evaluated at the pre-activation point `x`, not at `function(x)`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activation::Identity => 1.0,
            Activation::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
        }
    }

    /// The label stored in the persisted network.
    ///
    /// `LeakyReLU` keeps its slope in the label (`LeakyReLU(0.01)`) so the
    /// name alone is enough to rebuild the variant.
    pub fn name(&self) -> String {
        match self {
            Activation::Sigmoid => "Sigmoid".to_string(),
            Activation::Tanh => "Tanh".to_string(),
            Activation::ReLU => "ReLU".to_string(),
            Activation::Identity => "Identity".to_string(),
            Activation::LeakyReLU { alpha } => format!("LeakyReLU({alpha})"),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Activation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sigmoid" => Ok(Activation::Sigmoid),
            "Tanh" => Ok(Activation::Tanh),
            "ReLU" => Ok(Activation::ReLU),
            "Identity" => Ok(Activation::Identity),
            _ => {
                let alpha = s.strip_prefix("LeakyReLU(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .and_then(|alpha| alpha.parse::<f64>().ok())
                    .ok_or_else(|| Error::UnknownActivation(s.to_string()))?;
                Ok(Activation::LeakyReLU { alpha })
            }
        }
    }
}
