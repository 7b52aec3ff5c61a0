/// A named-by-position scalar feed: one external input slot, the bias, or the
/// value facet of a neuron.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSource {
    value: f64,
}

impl InputSource {
    pub fn new(value: f64) -> InputSource {
        InputSource { value }
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        self.value = value;
    }
}
