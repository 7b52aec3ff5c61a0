use serde::{Deserialize, Serialize};

/// How a training round turns deltas into weight changes.
///
/// The two modes are different training algorithms and produce different
/// weights as soon as a network has more than one layer.
///
/// - `Streaming`     — layers are updated one at a time from the output
///   backwards. An upstream layer computes its deltas after the downstream
///   layer has already moved its weights, and hidden neurons re-run their
///   forward step while doing so.
/// - `RoundBuffered` — every delta is computed from the weights and values
///   of the round's forward pass, then all weight changes are committed
///   together. No neuron is re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    #[default]
    Streaming,
    RoundBuffered,
}
