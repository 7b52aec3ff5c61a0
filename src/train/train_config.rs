use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — number of full passes over the training data
/// - `payoff`      — reward scaling every update; `1.0` is plain backpropagation
/// - `progress_tx` — optional channel; one `EpochStats` is sent per completed
///                   epoch. The loop stops early once the receiver is dropped.
/// - `stop_flag`   — optional flag; when set from another thread the loop
///                   stops after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub payoff: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with payoff 1, no progress channel and no stop flag.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            payoff: 1.0,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
