use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::layers::neuron::Neuron;

/// How the per-neuron work inside one layer is scheduled.
///
/// Both modes compute the same values bit for bit: forward neurons only
/// write their own state, and in the backward pass each predecessor's error
/// is summed by a single worker in downstream-neuron order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Sequential,
    Parallel,
}

/// An ordered group of neurons at the same depth. Fully connected to the
/// previous layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new(neurons: Vec<Neuron>) -> Layer {
        Layer { neurons }
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.out).collect()
    }

    pub fn zero_errors(&mut self) {
        for neuron in &mut self.neurons {
            neuron.error = 0.0;
        }
    }

    /// Forward step of the input layer. `input.len()` must equal `size()`.
    pub fn feed_input(&mut self, input: &[f64], activation: &Activation, execution: Execution) {
        match execution {
            Execution::Sequential => {
                for (neuron, &value) in self.neurons.iter_mut().zip(input) {
                    neuron.feed_value(value, activation);
                }
            }
            Execution::Parallel => {
                self.neurons.par_iter_mut().zip(input.par_iter())
                    .for_each(|(neuron, &value)| neuron.feed_value(value, activation));
            }
        }
    }

    /// Forward step of a hidden/output layer from an evaluated previous layer.
    pub fn feed_from(&mut self, previous: &Layer, activation: &Activation, execution: Execution) {
        match execution {
            Execution::Sequential => {
                for neuron in &mut self.neurons {
                    neuron.feed_from(&previous.neurons, activation);
                }
            }
            Execution::Parallel => {
                self.neurons.par_iter_mut()
                    .for_each(|neuron| neuron.feed_from(&previous.neurons, activation));
            }
        }
    }

    /// Output-layer error terms against `label`. Returns the example's loss,
    /// `Σ (label[j] - out[j])² / 2`. `label.len()` must equal `size()`.
    pub fn set_output_errors(&mut self, label: &[f64], activation: &Activation) -> f64 {
        self.neurons.iter_mut().zip(label)
            .map(|(neuron, &target)| neuron.set_output_error(target, activation))
            .sum()
    }

    /// Backward step: every neuron of this layer (whose errors are final)
    /// pushes its error into `previous` and updates its own weights.
    pub fn propagate(&mut self, previous: &mut Layer, activation: &Activation, execution: Execution) {
        match execution {
            Execution::Sequential => {
                for neuron in &mut self.neurons {
                    neuron.update(&mut previous.neurons, activation);
                }
            }
            Execution::Parallel => self.propagate_parallel(previous, activation),
        }
    }

    /// Parallel backward step, partitioned by predecessor: each worker owns one
    /// predecessor and sums the contributions of this layer's neurons into it,
    /// so no two workers ever write the same `error`. Weights are updated
    /// afterwards, each neuron touching only its own.
    ///
    /// Relies on the fully-connected layout kept by `Network::relink`:
    /// `inputs[k]` is neuron `k` of the previous layer.
    fn propagate_parallel(&mut self, previous: &mut Layer, activation: &Activation) {
        let downstream = &self.neurons;
        previous.neurons.par_iter_mut().enumerate().for_each(|(k, pred)| {
            let slope = activation.derivative(pred.input_sum);
            for neuron in downstream {
                pred.error += slope * neuron.error * neuron.weights[k];
            }
        });

        let upstream = &previous.neurons;
        self.neurons.par_iter_mut()
            .for_each(|neuron| neuron.apply_momentum(upstream));
    }
}
