pub mod connection;
pub mod graph;
pub mod input;
pub mod neuron;

pub use connection::{Connection, ConnectionId, NeuronId, Source};
pub use graph::Graph;
pub use input::InputSource;
pub use neuron::Neuron;
