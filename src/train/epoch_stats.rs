use serde::{Deserialize, Serialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop sends
/// one `EpochStats` at the end of every completed epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean squared error over the epoch, measured before each sample's update.
    pub train_loss: f64,
    /// Training rounds completed by the network so far.
    pub rounds: u64,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}
