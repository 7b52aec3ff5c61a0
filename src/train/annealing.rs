use rand::Rng;
use serde::{Deserialize, Serialize};

/// Decaying random perturbation for simulated annealing.
///
/// Each round a uniform sample in `[0, 1)` is drawn and kept only if it does
/// not exceed `initial_beta / (rounds * decay_rate)`; otherwise the amount is
/// zero. As rounds accumulate the ceiling shrinks and perturbations die out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annealing {
    pub initial_beta: f64,
    /// Between 0 and 1, exclusive. Higher values decay slower.
    pub decay_rate: f64,
}

impl Default for Annealing {
    fn default() -> Self {
        Annealing { initial_beta: 0.75, decay_rate: 0.95 }
    }
}

impl Annealing {
    /// Largest amount that can still be accepted after `rounds` rounds.
    pub fn ceiling(&self, rounds: u64) -> f64 {
        self.initial_beta / (rounds as f64 * self.decay_rate)
    }

    pub fn amount<R: Rng + ?Sized>(&self, rounds: u64, rng: &mut R) -> f64 {
        let d: f64 = rng.gen();
        if d > self.ceiling(rounds) {
            0.0
        } else {
            d
        }
    }
}
