use serde::{Deserialize, Serialize};

use crate::train::annealing::Annealing;
use crate::train::update_mode::UpdateMode;

/// Construction parameters of a `Network`.
///
/// Every field has a default, so a JSON file only needs to name the ones it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Learning rate.
    pub alpha: f64,
    /// Value of the bias input feeding every non-input layer.
    pub bias: f64,
    pub use_annealing: bool,
    pub annealing: Annealing,
    pub update_mode: UpdateMode,
    /// Starting weight of every bias connection.
    pub initial_bias_weight: f64,
    /// Other connections start uniformly in `[low, high)`.
    pub initial_weight_range: (f64, f64),
    /// Seed for the network's generator; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            alpha: 0.5,
            bias: 1.0,
            use_annealing: false,
            annealing: Annealing::default(),
            update_mode: UpdateMode::Streaming,
            initial_bias_weight: -1.0,
            initial_weight_range: (1.0, 2.0),
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_annealing(mut self, use_annealing: bool) -> Self {
        self.use_annealing = use_annealing;
        self
    }

    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkConfig` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
