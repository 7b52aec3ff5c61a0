use crate::activation::Activation;
use crate::graph::connection::{Connection, ConnectionId, NeuronId, Source};
use crate::graph::input::InputSource;
use crate::graph::neuron::Neuron;

/// Arena owning every value source, neuron and connection of a network.
///
/// Neurons refer to their edges by `ConnectionId` in both directions, so a
/// weight has exactly one home and backward traversal is an index lookup.
///
/// Only a `Network` builds and wires a graph, so every edge comes from layer
/// construction:
///
/// ```compile_fail
/// use ferrite_synapse::graph::Graph;
///
/// let graph = Graph::new(1, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) bias: InputSource,
    pub(crate) inputs: Vec<InputSource>,
    neurons: Vec<Neuron>,
    connections: Vec<Connection>,
}

impl Graph {
    pub(crate) fn new(num_inputs: usize, bias: f64) -> Graph {
        Graph {
            bias: InputSource::new(bias),
            inputs: vec![InputSource::default(); num_inputs],
            neurons: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub(crate) fn add_neuron(&mut self) -> NeuronId {
        self.neurons.push(Neuron::default());
        NeuronId(self.neurons.len() - 1)
    }

    /// Creates an edge and registers it with the destination, and with the
    /// source too when the source is a neuron.
    pub(crate) fn connect(&mut self, source: Source, destination: NeuronId, weight: f64) -> ConnectionId {
        let id = ConnectionId(self.connections.len());
        self.connections.push(Connection::new(source, destination, weight));
        self.neurons[destination.0].incoming.push(id);
        if let Source::Neuron(from) = source {
            self.neurons[from.0].outgoing.push(id);
        }
        id
    }

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        &self.neurons[id.0]
    }

    pub(crate) fn neuron_mut(&mut self, id: NeuronId) -> &mut Neuron {
        &mut self.neurons[id.0]
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.connections[id.0]
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub(crate) fn set_weight(&mut self, id: ConnectionId, weight: f64) {
        self.connections[id.0].weight = weight;
    }

    pub(crate) fn add_to_weight(&mut self, id: ConnectionId, amount: f64) {
        self.connections[id.0].weight += amount;
    }

    pub fn source_value(&self, source: Source) -> f64 {
        match source {
            Source::External(slot) => self.inputs[slot].get(),
            Source::Bias => self.bias.get(),
            Source::Neuron(id) => self.neurons[id.0].value(),
        }
    }

    pub fn weighted_input(&self, id: ConnectionId) -> f64 {
        let connection = &self.connections[id.0];
        self.source_value(connection.source()) * connection.weight
    }

    /// Recomputes a neuron's value from its incoming edges.
    ///
    /// Every source must already hold this round's value.
    pub fn forward(&mut self, id: NeuronId, activation: &dyn Activation) -> f64 {
        let sum: f64 = self.neurons[id.0]
            .incoming
            .iter()
            .map(|&c| self.weighted_input(c))
            .sum();
        let value = activation.function(sum);
        self.neurons[id.0].value.set(value);
        value
    }

    /// Backpropagated error signal of a neuron, reading the current weights.
    ///
    /// A hidden neuron recurses into its children and then re-runs its own
    /// `forward` before taking the derivative. During a streaming round the
    /// children's incoming weights may already have been updated, and the
    /// result reflects that.
    pub fn compute_delta(&mut self, id: NeuronId, activation: &dyn Activation) -> f64 {
        let neuron = &self.neurons[id.0];
        if let Some(target) = neuron.target {
            let value = neuron.value();
            return (target - value) * activation.derivative(value);
        }

        let outgoing = neuron.outgoing.clone();
        let mut weighted_deltas = 0.0;
        for c in outgoing {
            let child = self.connections[c.0].destination();
            weighted_deltas += self.compute_delta(child, activation) * self.connections[c.0].weight;
        }
        let refreshed = self.forward(id, activation);
        activation.derivative(refreshed) * weighted_deltas
    }

    /// Delta from cached values and already computed child deltas, indexed by
    /// `NeuronId`. Nothing is re-evaluated.
    pub fn buffered_delta(&self, id: NeuronId, activation: &dyn Activation, deltas: &[f64]) -> f64 {
        let neuron = &self.neurons[id.0];
        let value = neuron.value();
        if let Some(target) = neuron.target {
            return (target - value) * activation.derivative(value);
        }
        let weighted_deltas: f64 = neuron
            .outgoing
            .iter()
            .map(|&c| {
                let connection = &self.connections[c.0];
                deltas[connection.destination().0] * connection.weight
            })
            .sum();
        activation.derivative(value) * weighted_deltas
    }

    /// `w += payoff * alpha * delta * x + perturbation()` for every incoming edge.
    pub fn apply_update(
        &mut self,
        id: NeuronId,
        activation: &dyn Activation,
        alpha: f64,
        payoff: f64,
        perturbation: &mut dyn FnMut() -> f64,
    ) {
        let change = payoff * alpha * self.compute_delta(id, activation);
        let incoming = self.neurons[id.0].incoming.clone();
        for c in incoming {
            let x = self.source_value(self.connections[c.0].source());
            self.add_to_weight(c, change * x + perturbation());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use approx::assert_relative_eq;

    fn no_noise() -> impl FnMut() -> f64 {
        || 0.0
    }

    #[test]
    fn connect_registers_both_ends_for_neuron_sources() {
        let mut graph = Graph::new(1, 1.0);
        let a = graph.add_neuron();
        let b = graph.add_neuron();
        let from_input = graph.connect(Source::External(0), a, 1.0);
        let from_bias = graph.connect(Source::Bias, b, -1.0);
        let from_a = graph.connect(Source::Neuron(a), b, 0.5);

        assert_eq!(graph.neuron(a).incoming(), &[from_input]);
        assert_eq!(graph.neuron(a).outgoing(), &[from_a]);
        assert_eq!(graph.neuron(b).incoming(), &[from_bias, from_a]);
        assert!(graph.neuron(b).outgoing().is_empty());
        assert!(graph.connection(from_bias).is_bias());
    }

    #[test]
    fn forward_squashes_weighted_sum() {
        let mut graph = Graph::new(2, 1.0);
        let n = graph.add_neuron();
        graph.connect(Source::External(0), n, 2.0);
        graph.connect(Source::External(1), n, -1.0);
        graph.connect(Source::Bias, n, 0.5);
        graph.inputs[0].set(1.5);
        graph.inputs[1].set(4.0);

        let value = graph.forward(n, &ActivationFunction::Sigmoid);
        let expected = ActivationFunction::Sigmoid.function(3.0 - 4.0 + 0.5);
        assert_relative_eq!(value, expected);
        assert_relative_eq!(graph.neuron(n).value(), expected);
    }

    #[test]
    fn output_delta_uses_target_and_cached_value() {
        let mut graph = Graph::new(1, 1.0);
        let n = graph.add_neuron();
        graph.connect(Source::External(0), n, 1.0);
        graph.neuron_mut(n).value.set(0.75);
        graph.neuron_mut(n).target = Some(1.0);

        let delta = graph.compute_delta(n, &ActivationFunction::Sigmoid);
        assert_relative_eq!(delta, 0.25 * 0.75 * 0.25);
    }

    #[test]
    fn hidden_delta_sums_weighted_child_deltas() {
        let act = ActivationFunction::Sigmoid;
        let mut graph = Graph::new(1, 1.0);
        let hidden = graph.add_neuron();
        let out_a = graph.add_neuron();
        let out_b = graph.add_neuron();
        graph.connect(Source::External(0), hidden, 0.3);
        graph.connect(Source::Neuron(hidden), out_a, 2.0);
        graph.connect(Source::Neuron(hidden), out_b, -1.0);
        graph.inputs[0].set(1.0);
        for id in [hidden, out_a, out_b] {
            graph.forward(id, &act);
        }
        graph.neuron_mut(out_a).target = Some(1.0);
        graph.neuron_mut(out_b).target = Some(0.0);

        let delta_a = graph.compute_delta(out_a, &act);
        let delta_b = graph.compute_delta(out_b, &act);
        let h = graph.neuron(hidden).value();
        let expected = act.derivative(h) * (2.0 * delta_a - delta_b);

        let mut deltas = vec![0.0; graph.neuron_count()];
        deltas[out_a.0] = delta_a;
        deltas[out_b.0] = delta_b;
        assert_relative_eq!(graph.buffered_delta(hidden, &act, &deltas), expected);
        assert_relative_eq!(graph.compute_delta(hidden, &act), expected);
    }

    #[test]
    fn hidden_delta_re_evaluates_children_against_current_weights() {
        let act = ActivationFunction::Sigmoid;
        let mut graph = Graph::new(1, 1.0);
        let first = graph.add_neuron();
        let second = graph.add_neuron();
        let out = graph.add_neuron();
        graph.connect(Source::External(0), first, 0.5);
        let w_fs = graph.connect(Source::Neuron(first), second, 0.7);
        let w_so = graph.connect(Source::Neuron(second), out, 1.1);
        graph.inputs[0].set(1.0);
        for id in [first, second, out] {
            graph.forward(id, &act);
        }
        let cached_second = graph.neuron(second).value();
        graph.neuron_mut(out).target = Some(0.0);

        // The downstream edge moved after the forward pass.
        graph.set_weight(w_fs, -2.0);

        let v_first = graph.neuron(first).value();
        let v_out = graph.neuron(out).value();
        let delta_out = (0.0 - v_out) * act.derivative(v_out);
        let refreshed_second = act.function(-2.0 * v_first);
        let delta_second = act.derivative(refreshed_second) * delta_out * 1.1;
        let expected = act.derivative(v_first) * delta_second * -2.0;

        assert_relative_eq!(graph.compute_delta(first, &act), expected, epsilon = 1e-15);
        assert_relative_eq!(graph.neuron(second).value(), refreshed_second);
        assert!((refreshed_second - cached_second).abs() > 0.1);
        assert_eq!(graph.connection(w_so).weight(), 1.1);
    }

    #[test]
    fn apply_update_moves_every_incoming_weight() {
        let act = ActivationFunction::Sigmoid;
        let mut graph = Graph::new(1, 1.0);
        let n = graph.add_neuron();
        let wi = graph.connect(Source::External(0), n, 0.2);
        let wb = graph.connect(Source::Bias, n, -0.4);
        graph.inputs[0].set(2.0);
        let y = graph.forward(n, &act);
        graph.neuron_mut(n).target = Some(1.0);

        graph.apply_update(n, &act, 0.5, 1.0, &mut no_noise());

        let step = 0.5 * (1.0 - y) * act.derivative(y);
        assert_relative_eq!(graph.connection(wi).weight(), 0.2 + step * 2.0);
        assert_relative_eq!(graph.connection(wb).weight(), -0.4 + step);
    }

    #[test]
    fn perturbation_is_added_per_connection() {
        let act = ActivationFunction::Threshold;
        let mut graph = Graph::new(2, 1.0);
        let n = graph.add_neuron();
        let a = graph.connect(Source::External(0), n, 0.0);
        let b = graph.connect(Source::External(1), n, 0.0);
        graph.neuron_mut(n).target = Some(1.0);

        let mut calls = 0.0;
        graph.apply_update(n, &act, 0.5, 1.0, &mut || {
            calls += 1.0;
            calls
        });

        assert_eq!(graph.connection(a).weight(), 1.0);
        assert_eq!(graph.connection(b).weight(), 2.0);
    }
}
