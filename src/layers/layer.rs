use crate::activation::Activation;
use crate::error::{Arity, NetworkError};
use crate::graph::{Graph, NeuronId};

/// An ordered group of neurons sharing the same fan-in.
///
/// The neurons themselves live in the network's `Graph`; a layer only keeps
/// their ids, in wiring order.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    neurons: Vec<NeuronId>,
    previous: Option<usize>,
}

impl Layer {
    pub(crate) fn new(name: String, neurons: Vec<NeuronId>, previous: Option<usize>) -> Layer {
        Layer { name, neurons, previous }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Index of the upstream layer, `None` for the input layer.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn is_input_layer(&self) -> bool {
        self.previous.is_none()
    }

    /// Must run after the previous layer's forward pass.
    pub fn forward_pass(&self, graph: &mut Graph, activation: &dyn Activation) {
        for &id in &self.neurons {
            graph.forward(id, activation);
        }
    }

    /// Cached neuron values, without recomputation.
    pub fn values(&self, graph: &Graph) -> Vec<f64> {
        self.neurons.iter().map(|&id| graph.neuron(id).value()).collect()
    }

    /// Assigns one target per neuron. Nothing is assigned on a length mismatch.
    pub fn set_targets(&self, graph: &mut Graph, targets: &[f64]) -> Result<(), NetworkError> {
        NetworkError::check(Arity::Targets, self.neurons.len(), targets.len())?;
        for (&id, &target) in self.neurons.iter().zip(targets) {
            graph.neuron_mut(id).target = Some(target);
        }
        Ok(())
    }

    pub fn clear_targets(&self, graph: &mut Graph) {
        for &id in &self.neurons {
            graph.neuron_mut(id).target = None;
        }
    }

    /// Updates the incoming weights of every neuron in this layer.
    pub fn backpropagate_layer(
        &self,
        graph: &mut Graph,
        activation: &dyn Activation,
        alpha: f64,
        payoff: f64,
        perturbation: &mut dyn FnMut() -> f64,
    ) {
        for &id in &self.neurons {
            graph.apply_update(id, activation, alpha, payoff, perturbation);
        }
    }
}
