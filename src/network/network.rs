use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::Activation;
use crate::error::{Arity, NetworkError};
use crate::graph::{Connection, ConnectionId, Graph, InputSource, Neuron, NeuronId, Source};
use crate::layers::layer::Layer;
use crate::network::config::NetworkConfig;
use crate::train::update_mode::UpdateMode;

/// A layered neuron graph trained one sample at a time.
///
/// A network owns its bias input, its external inputs, the ordered layers
/// and a seedable random generator used for initial weights and annealing.
/// It is a single mutable structure: callers sharing one across threads must
/// serialize access themselves.
#[derive(Debug)]
pub struct Network {
    graph: Graph,
    layers: Vec<Layer>,
    activation: Box<dyn Activation>,
    config: NetworkConfig,
    rng: StdRng,
    rounds: u64,
}

impl Network {
    /// Network with the default learning rate (0.5), bias (1) and no annealing.
    pub fn new(num_inputs: usize, activation: impl Activation + 'static) -> Network {
        Network::with_config(num_inputs, activation, NetworkConfig::default())
    }

    pub fn with_config(
        num_inputs: usize,
        activation: impl Activation + 'static,
        config: NetworkConfig,
    ) -> Network {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            "new network: {} inputs, {:?}, alpha {}, {:?}",
            num_inputs, activation, config.alpha, config.update_mode
        );
        Network {
            graph: Graph::new(num_inputs, config.bias),
            layers: Vec::new(),
            activation: Box::new(activation),
            config,
            rng,
            rounds: 0,
        }
    }

    /// Appends a layer and wires it to the current last layer.
    ///
    /// The first layer must have one neuron per external input; neuron `i`
    /// reads input `i` through a single connection and has no bias. Every
    /// later layer is fully connected to its predecessor plus the bias.
    pub fn add_layer(&mut self, size: usize, name: impl Into<String>) -> Result<(), NetworkError> {
        let previous = self.layers.len().checked_sub(1);
        if previous.is_none() {
            NetworkError::check(Arity::FirstLayer, self.num_inputs(), size)?;
        }
        let upstream: Vec<NeuronId> = previous
            .map(|index| self.layers[index].neurons().to_vec())
            .unwrap_or_default();

        let mut neurons = Vec::with_capacity(size);
        for i in 0..size {
            let id = self.graph.add_neuron();
            if previous.is_none() {
                let weight = self.initial_weight();
                self.graph.connect(Source::External(i), id, weight);
            } else {
                self.graph.connect(Source::Bias, id, self.config.initial_bias_weight);
                for &from in &upstream {
                    let weight = self.initial_weight();
                    self.graph.connect(Source::Neuron(from), id, weight);
                }
            }
            neurons.push(id);
        }

        let layer = Layer::new(name.into(), neurons, previous);
        debug!(
            "added layer `{}` #{}: {} neurons, fan-in {}",
            layer.name(),
            self.layers.len(),
            size,
            if previous.is_some() { upstream.len() + 1 } else { 1 }
        );
        self.layers.push(layer);
        Ok(())
    }

    fn initial_weight(&mut self) -> f64 {
        let (low, high) = self.config.initial_weight_range;
        low + (high - low) * self.rng.gen::<f64>()
    }

    /// Assigns the external inputs positionally. Nothing changes on a length
    /// mismatch.
    pub fn set_inputs(&mut self, values: &[f64]) -> Result<(), NetworkError> {
        NetworkError::check(Arity::Inputs, self.num_inputs(), values.len())?;
        for (input, &value) in self.graph.inputs.iter_mut().zip(values) {
            input.set(value);
        }
        Ok(())
    }

    /// Runs every layer in construction order and returns the output values.
    /// A network without layers returns an empty vector.
    pub fn forward(&mut self) -> Vec<f64> {
        for layer in &self.layers {
            layer.forward_pass(&mut self.graph, self.activation.as_ref());
        }
        self.outputs()
    }

    /// Output values from the last forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.layers
            .last()
            .map(|layer| layer.values(&self.graph))
            .unwrap_or_default()
    }

    /// One training round with payoff 1. See [`Network::train_with_payoff`].
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.train_with_payoff(input, target, 1.0)
    }

    /// Sets the inputs, runs a forward pass, and moves every weight towards
    /// `target` scaled by the learning rate and `payoff`.
    ///
    /// Both lengths are checked before anything is touched. Returns the
    /// outputs of the round's forward pass, i.e. before the update.
    pub fn train_with_payoff(
        &mut self,
        input: &[f64],
        target: &[f64],
        payoff: f64,
    ) -> Result<Vec<f64>, NetworkError> {
        NetworkError::check(Arity::Inputs, self.num_inputs(), input.len())?;
        let output_size = self.layers.last().map_or(0, Layer::len);
        NetworkError::check(Arity::Targets, output_size, target.len())?;

        self.rounds += 1;
        self.set_inputs(input)?;
        let outputs = self.forward();

        let Some(output_layer) = self.layers.last() else {
            return Ok(outputs);
        };
        output_layer.set_targets(&mut self.graph, target)?;

        let annealing = self.annealing_amount();
        match self.config.update_mode {
            UpdateMode::Streaming => self.backpropagate_streaming(payoff, annealing),
            UpdateMode::RoundBuffered => self.backpropagate_round_buffered(payoff, annealing),
        }

        if let Some(output_layer) = self.layers.last() {
            output_layer.clear_targets(&mut self.graph);
        }
        trace!(
            "round {}: payoff {}, annealing {:.4}, outputs {:?}",
            self.rounds,
            payoff,
            annealing,
            outputs
        );
        Ok(outputs)
    }

    /// Walks from the output layer back to the input layer, updating each
    /// layer's incoming weights before the next upstream layer computes its
    /// deltas.
    fn backpropagate_streaming(&mut self, payoff: f64, annealing: f64) {
        let alpha = self.config.alpha;
        let rng = &mut self.rng;
        let mut perturbation = move || perturb(&mut *rng, annealing);

        let mut cursor = self.layers.len().checked_sub(1);
        while let Some(index) = cursor {
            let layer = &self.layers[index];
            layer.backpropagate_layer(
                &mut self.graph,
                self.activation.as_ref(),
                alpha,
                payoff,
                &mut perturbation,
            );
            cursor = layer.previous();
        }
    }

    /// Computes every delta against the round's forward values, then commits
    /// all weight changes at once.
    fn backpropagate_round_buffered(&mut self, payoff: f64, annealing: f64) {
        let alpha = self.config.alpha;
        let activation = self.activation.as_ref();

        let mut deltas = vec![0.0; self.graph.neuron_count()];
        for layer in self.layers.iter().rev() {
            for &id in layer.neurons() {
                let delta = self.graph.buffered_delta(id, activation, &deltas);
                deltas[id.0] = delta;
            }
        }

        let changes: Vec<f64> = self
            .graph
            .connections()
            .iter()
            .map(|connection| {
                let change = payoff * alpha * deltas[connection.destination().0];
                change * self.graph.source_value(connection.source()) + perturb(&mut self.rng, annealing)
            })
            .collect();
        for (index, change) in changes.into_iter().enumerate() {
            self.graph.add_to_weight(ConnectionId(index), change);
        }
    }

    /// Random magnitude for simulated annealing that decays with completed
    /// rounds. Always zero when annealing is disabled.
    pub fn annealing_amount(&mut self) -> f64 {
        if !self.config.use_annealing {
            return 0.0;
        }
        self.config.annealing.amount(self.rounds, &mut self.rng)
    }

    pub fn num_inputs(&self) -> usize {
        self.graph.inputs.len()
    }

    pub fn inputs(&self) -> &[InputSource] {
        &self.graph.inputs
    }

    pub fn bias(&self) -> f64 {
        self.graph.bias.get()
    }

    pub fn set_bias(&mut self, value: f64) {
        self.graph.bias.set(value);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn output_layer(&self) -> Option<&Layer> {
        self.layers.last()
    }

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        self.graph.neuron(id)
    }

    pub fn connection(&self, id: ConnectionId) -> &Connection {
        self.graph.connection(id)
    }

    pub fn connections(&self) -> &[Connection] {
        self.graph.connections()
    }

    /// Overwrites one weight, e.g. when restoring a saved network.
    pub fn set_weight(&mut self, id: ConnectionId, weight: f64) {
        self.graph.set_weight(id, weight);
    }

    pub fn activation(&self) -> &dyn Activation {
        self.activation.as_ref()
    }

    pub fn alpha(&self) -> f64 {
        self.config.alpha
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.config.update_mode
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Number of training rounds started so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }
}

/// Per-connection annealing noise, `amount * U(-1, 1)`.
fn perturb(rng: &mut StdRng, amount: f64) -> f64 {
    if amount == 0.0 {
        0.0
    } else {
        amount * rng.gen_range(-1.0..1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;

    fn seeded(num_inputs: usize) -> Network {
        Network::with_config(
            num_inputs,
            ActivationFunction::Sigmoid,
            NetworkConfig::default().with_seed(42),
        )
    }

    #[test]
    fn first_layer_must_match_input_count() {
        let mut network = seeded(3);
        let err = network.add_layer(2, "input").unwrap_err();
        assert_eq!(
            err,
            NetworkError::DimensionMismatch { what: Arity::FirstLayer, expected: 3, actual: 2 }
        );
        assert!(network.layers().is_empty());
        assert!(network.connections().is_empty());
    }

    #[test]
    fn initial_weights_follow_config() {
        let mut network = seeded(2);
        network.add_layer(2, "input").unwrap();
        network.add_layer(1, "output").unwrap();
        for connection in network.connections() {
            if connection.is_bias() {
                assert_eq!(connection.weight(), -1.0);
            } else {
                assert!((1.0..2.0).contains(&connection.weight()));
            }
        }
    }

    #[test]
    fn same_seed_builds_same_weights() {
        let build = || {
            let mut network = seeded(2);
            network.add_layer(2, "input").unwrap();
            network.add_layer(3, "hidden").unwrap();
            network
                .connections()
                .iter()
                .map(Connection::weight)
                .collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn empty_network_forwards_nothing() {
        let mut network = seeded(0);
        assert!(network.forward().is_empty());
        assert_eq!(network.train(&[], &[]).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn annealing_amount_is_zero_when_disabled() {
        let mut network = seeded(1);
        network.add_layer(1, "input").unwrap();
        network.train(&[1.0], &[0.0]).unwrap();
        assert_eq!(network.annealing_amount(), 0.0);
    }

    #[test]
    fn rounds_count_started_training_rounds_only() {
        let mut network = seeded(1);
        network.add_layer(1, "input").unwrap();
        network.train(&[1.0], &[0.0]).unwrap();
        assert!(network.train(&[1.0, 2.0], &[0.0]).is_err());
        network.train(&[0.5], &[1.0]).unwrap();
        assert_eq!(network.rounds(), 2);
    }
}
