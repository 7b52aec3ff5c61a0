use std::fmt;

use thiserror::Error;

/// Which fixed arity a caller-supplied sequence was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The network's external input count.
    Inputs,
    /// The first layer must have one neuron per external input.
    FirstLayer,
    /// The output layer's neuron count.
    Targets,
    /// Number of labels versus number of samples in a training set.
    Samples,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Arity::Inputs => "inputs",
            Arity::FirstLayer => "first layer",
            Arity::Targets => "targets",
            Arity::Samples => "samples",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("dimension mismatch for {what}: expected {expected} values, got {actual}")]
    DimensionMismatch {
        what: Arity,
        expected: usize,
        actual: usize,
    },
}

impl NetworkError {
    pub(crate) fn check(what: Arity, expected: usize, actual: usize) -> Result<(), NetworkError> {
        if expected == actual {
            Ok(())
        } else {
            Err(NetworkError::DimensionMismatch { what, expected, actual })
        }
    }
}
