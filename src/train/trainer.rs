use crate::error::{Arity, NetworkError};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;

/// One pass of online training over `inputs`, in order.
///
/// Returns the mean squared error of the outputs each round saw before its
/// own update.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    payoff: f64,
) -> Result<f64, NetworkError> {
    NetworkError::check(Arity::Samples, inputs.len(), targets.len())?;
    if inputs.is_empty() {
        return Ok(0.0);
    }

    let mut total_loss = 0.0;
    for (input, target) in inputs.iter().zip(targets) {
        let output = network.train_with_payoff(input, target, payoff)?;
        total_loss += MseLoss::loss(&output, target);
    }

    Ok(total_loss / inputs.len() as f64)
}
