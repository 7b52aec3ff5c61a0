/// Index of a neuron in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId(pub usize);

/// Index of a connection in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub usize);

/// Where a connection reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// External input slot, by position.
    External(usize),
    Bias,
    Neuron(NeuronId),
}

/// Directed, weighted edge into a neuron.
///
/// Endpoints are fixed at construction; only `weight` ever changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    source: Source,
    destination: NeuronId,
    pub(crate) weight: f64,
}

impl Connection {
    pub(crate) fn new(source: Source, destination: NeuronId, weight: f64) -> Connection {
        Connection { source, destination, weight }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn destination(&self) -> NeuronId {
        self.destination
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_bias(&self) -> bool {
        self.source == Source::Bias
    }
}
