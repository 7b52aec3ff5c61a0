use std::sync::atomic::Ordering;
use std::time::Instant;

use log::debug;

use crate::error::{Arity, NetworkError};
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_network;

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// loss of the last completed epoch.
///
/// Samples are presented in order, one training round each.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<f64, NetworkError> {
    NetworkError::check(Arity::Samples, inputs.len(), targets.len())?;

    let mut last_loss = 0.0;
    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        last_loss = train_network(network, inputs, targets, config.payoff)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        debug!(
            "epoch {}/{}: loss {:.6} ({} ms)",
            epoch, config.epochs, last_loss, elapsed_ms
        );

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                train_loss: last_loss,
                rounds: network.rounds(),
                elapsed_ms,
            };
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last_loss)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}
