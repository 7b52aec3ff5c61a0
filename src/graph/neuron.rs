use crate::graph::connection::ConnectionId;
use crate::graph::input::InputSource;

/// A computing node. Its value lives in an `InputSource` facet so that
/// downstream connections read it the same way they read external inputs.
#[derive(Debug, Clone, Default)]
pub struct Neuron {
    pub(crate) value: InputSource,
    pub(crate) target: Option<f64>,
    pub(crate) incoming: Vec<ConnectionId>,
    pub(crate) outgoing: Vec<ConnectionId>,
}

impl Neuron {
    pub fn value(&self) -> f64 {
        self.value.get()
    }

    /// Training target; only present on output neurons during a training round.
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    pub fn incoming(&self) -> &[ConnectionId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[ConnectionId] {
        &self.outgoing
    }
}
