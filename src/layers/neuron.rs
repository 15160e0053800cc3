use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::loss::squared_error::HalfSquaredError;
use crate::optim::momentum::momentum_delta;

/// Position of a neuron inside a network: `layers[layer].neurons[index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeuronId {
    pub layer: usize,
    pub index: usize,
}

/// One unit of a fully-connected network.
///
/// Only the static state is serialized. `input_sum`, `out` and `error` are
/// rewritten by every forward/backward pass, and `inputs` is rebuilt from
/// the layer layout by `Network::relink` after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    pub bias: f64,
    /// One weight per predecessor; input-layer neurons hold the single fixed weight `1.0`.
    pub weights: Vec<f64>,
    /// Last applied weight change, same length as `weights`.
    pub delta_weights: Vec<f64>,
    /// Stored and persisted but not part of the update rule.
    pub learning_rate: f64,
    pub momentum: f64,
    pub activation_name: String,

    /// Pre-activation sum of the last forward pass.
    #[serde(skip)]
    pub input_sum: f64,
    #[serde(skip)]
    pub out: f64,
    /// Error term accumulated during the last backward pass.
    #[serde(skip)]
    pub error: f64,
    /// Predecessors in the previous layer; `inputs[k]` feeds `weights[k]`.
    #[serde(skip)]
    pub inputs: Vec<NeuronId>,
}

impl Neuron {
    /// Input-layer neuron: passes its external input value through a fixed weight of `1.0`.
    pub fn passthrough(bias: f64, momentum: f64, learning_rate: f64, activation: &Activation) -> Neuron {
        Neuron {
            bias,
            weights: vec![1.0],
            delta_weights: vec![0.0],
            learning_rate,
            momentum,
            activation_name: activation.name(),
            input_sum: 0.0,
            out: 0.0,
            error: 0.0,
            inputs: Vec::new(),
        }
    }

    /// Neuron fed by every neuron in `inputs`, with weights taken from `weights`.
    pub fn connected(
        bias: f64,
        momentum: f64,
        learning_rate: f64,
        activation: &Activation,
        inputs: Vec<NeuronId>,
        weights: Vec<f64>,
    ) -> Neuron {
        debug_assert_eq!(inputs.len(), weights.len());
        Neuron {
            bias,
            delta_weights: vec![0.0; weights.len()],
            weights,
            learning_rate,
            momentum,
            activation_name: activation.name(),
            input_sum: 0.0,
            out: 0.0,
            error: 0.0,
            inputs,
        }
    }

    pub fn fan_in(&self) -> usize {
        self.inputs.len()
    }

    /// Forward step for an input-layer neuron.
    pub fn feed_value(&mut self, value: f64, activation: &Activation) {
        self.input_sum = -self.bias + self.weights[0] * value;
        self.out = activation.function(self.input_sum);
    }

    /// Forward step for a hidden/output neuron; `previous` is the already
    /// evaluated previous layer.
    pub fn feed_from(&mut self, previous: &[Neuron], activation: &Activation) {
        let mut sum = -self.bias;
        for (weight, source) in self.weights.iter().zip(&self.inputs) {
            sum += weight * previous[source.index].out;
        }
        self.input_sum = sum;
        self.out = activation.function(sum);
    }

    /// Output-layer error against one label value. Returns the half squared
    /// error this neuron contributes to the example's loss.
    pub fn set_output_error(&mut self, label: f64, activation: &Activation) -> f64 {
        self.error = activation.derivative(self.input_sum) * HalfSquaredError::signal(self.out, label);
        HalfSquaredError::term(self.out, label)
    }

    /// Pushes this neuron's (final) error back into its predecessors and
    /// applies the momentum update to its own weights.
    ///
    /// Each predecessor receives `f'(pred.In) * Error * weight[k]` computed
    /// with the weight as it was before this call changes it.
    pub fn update(&mut self, previous: &mut [Neuron], activation: &Activation) {
        for k in 0..self.inputs.len() {
            let pred = &mut previous[self.inputs[k].index];
            pred.error += activation.derivative(pred.input_sum) * self.error * self.weights[k];
            self.delta_weights[k] = momentum_delta(self.error, pred.out, self.momentum, self.delta_weights[k]);
            self.weights[k] += self.delta_weights[k];
        }
    }

    /// Weight half of `update`, for when predecessor errors have already been
    /// accumulated elsewhere.
    pub fn apply_momentum(&mut self, previous: &[Neuron]) {
        for k in 0..self.inputs.len() {
            let pred_out = previous[self.inputs[k].index].out;
            self.delta_weights[k] = momentum_delta(self.error, pred_out, self.momentum, self.delta_weights[k]);
            self.weights[k] += self.delta_weights[k];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ids(layer: usize, n: usize) -> Vec<NeuronId> {
        (0..n).map(|index| NeuronId { layer, index }).collect()
    }

    #[test]
    fn passthrough_has_single_unit_weight() {
        let n = Neuron::passthrough(1.0, 0.9, 0.0, &Activation::Sigmoid);
        assert_eq!(n.weights, vec![1.0]);
        assert_eq!(n.delta_weights, vec![0.0]);
        assert!(n.inputs.is_empty());
        assert_eq!(n.activation_name, "Sigmoid");
    }

    #[test]
    fn feed_from_subtracts_bias() {
        let act = Activation::Identity;
        let mut prev = vec![
            Neuron::passthrough(0.0, 0.9, 0.0, &act),
            Neuron::passthrough(0.0, 0.9, 0.0, &act),
        ];
        prev[0].feed_value(2.0, &act);
        prev[1].feed_value(3.0, &act);

        let mut n = Neuron::connected(1.0, 0.9, 0.0, &act, ids(0, 2), vec![0.5, 0.25]);
        n.feed_from(&prev, &act);
        assert_abs_diff_eq!(n.input_sum, -1.0 + 1.0 + 0.75);
        assert_abs_diff_eq!(n.out, n.input_sum);
    }

    #[test]
    fn update_uses_weight_before_change() {
        let act = Activation::Identity;
        let mut prev = vec![Neuron::passthrough(0.0, 0.9, 0.0, &act)];
        prev[0].feed_value(2.0, &act);

        let mut n = Neuron::connected(0.0, 0.9, 0.0, &act, ids(0, 1), vec![0.5]);
        n.delta_weights[0] = 0.1;
        n.error = 0.2;
        n.update(&mut prev, &act);

        // identity derivative is 1, so the predecessor sees error * old weight
        assert_abs_diff_eq!(prev[0].error, 0.2 * 0.5);
        assert_abs_diff_eq!(n.delta_weights[0], 0.2 * 2.0 + 0.9 * 0.1);
        assert_abs_diff_eq!(n.weights[0], 0.5 + 0.4 + 0.09);
    }

    #[test]
    fn output_error_and_loss() {
        let act = Activation::Sigmoid;
        let mut n = Neuron::connected(0.0, 0.9, 0.0, &act, ids(0, 1), vec![1.0]);
        n.input_sum = 0.0;
        n.out = 0.5;
        let loss = n.set_output_error(1.0, &act);
        assert_abs_diff_eq!(loss, 0.125);
        assert_abs_diff_eq!(n.error, 0.25 * 0.5);
    }
}
