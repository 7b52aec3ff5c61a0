pub mod activation;
pub mod error;
pub mod graph;
pub mod layers;
pub mod loss;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::{Activation, ActivationFunction};
pub use error::{Arity, NetworkError};
pub use graph::{Connection, ConnectionId, InputSource, Neuron, NeuronId, Source};
pub use layers::layer::Layer;
pub use network::{Network, NetworkConfig};
pub use train::{train_loop, train_network, Annealing, EpochStats, TrainConfig, UpdateMode};
