use std::f64::consts::E;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A differentiable squashing function shared by every neuron of a network.
///
/// `derivative` is expressed in terms of the function's own *output*: callers
/// pass the value `function(x)` already cached on the neuron, never `x`.
pub trait Activation: fmt::Debug + Send + Sync {
    fn function(&self, x: f64) -> f64;

    /// Slope of the function at the point whose output is `f`.
    fn derivative(&self, f: f64) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Logistic curve, range (0, 1).
    Sigmoid,
    /// Hyperbolic tangent, range (-1, 1).
    Tanh,
    /// `e^x / (1 + e^x)` paired with the tanh derivative `1 - f²`.
    ///
    /// Numerically a sigmoid forward with a mismatched slope. Kept so that
    /// networks trained with this historical formula can be reproduced.
    LogisticTanh,
    /// Hard step at zero. Its derivative is zero everywhere, so a threshold
    /// network never moves its weights under backpropagation.
    Threshold,
}

impl Activation for ActivationFunction {
    fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LogisticTanh => {
                let pow = E.powf(x);
                pow / (1.0 + pow)
            }
            ActivationFunction::Threshold => if x > 0.0 { 1.0 } else { 0.0 },
        }
    }

    fn derivative(&self, f: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => f * (1.0 - f),
            ActivationFunction::Tanh | ActivationFunction::LogisticTanh => 1.0 - f * f,
            ActivationFunction::Threshold => 0.0,
        }
    }
}
