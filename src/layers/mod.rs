pub mod dense;
pub mod neuron;

pub use dense::{Execution, Layer};
pub use neuron::{Neuron, NeuronId};
