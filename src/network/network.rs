use log::warn;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::layers::dense::{Execution, Layer};
use crate::layers::neuron::{Neuron, NeuronId};
use crate::network::spec::NetworkSpec;

/// A layered, fully-connected feed-forward network.
///
/// `layers[0]` is the input layer and the last layer is the output layer;
/// there are always at least two. The activation function is shared by all
/// neurons and is not serialized: after `load_json` it must be reattached
/// with `set_activation` (or `resolve_activation`) before the network can be
/// evaluated or trained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(skip)]
    activation: Option<Activation>,
    #[serde(skip)]
    execution: Execution,
}

impl Network {
    /// Builds a network with the default bias (1.0), momentum (0.9) and
    /// learning rate (0.0). Weights of non-input neurons are drawn uniformly
    /// from [0, 1) using `rng`.
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], activation: Activation, rng: &mut R) -> Result<Network> {
        NetworkSpec::new(layer_sizes.to_vec(), activation).build(rng)
    }

    pub(crate) fn from_layers(layers: Vec<Layer>, activation: Option<Activation>) -> Network {
        Network { layers, activation, execution: Execution::default() }
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Layer::size)
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.layers.get(id.layer)?.neurons.get(id.index)
    }

    pub fn activation(&self) -> Option<Activation> {
        self.activation
    }

    /// Attaches `activation` to every neuron. Required after loading.
    pub fn set_activation(&mut self, activation: Activation) {
        let name = activation.name();
        for neuron in self.layers.iter_mut().flat_map(|l| l.neurons.iter_mut()) {
            neuron.activation_name.clone_from(&name);
        }
        self.activation = Some(activation);
    }

    /// Reattaches the activation named in the neurons' stored
    /// `activation_name`. The first neuron's name wins if they disagree.
    pub fn resolve_activation(&mut self) -> Result<Activation> {
        let name = self.layers.iter()
            .flat_map(|l| l.neurons.iter())
            .map(|n| n.activation_name.as_str())
            .next()
            .ok_or(Error::NullActivation)?
            .to_string();

        let disagreeing = self.layers.iter()
            .flat_map(|l| l.neurons.iter())
            .filter(|n| n.activation_name != name)
            .count();
        if disagreeing > 0 {
            warn!("{disagreeing} neurons name an activation other than {name:?}; using {name:?}");
        }

        let activation: Activation = name.parse()?;
        self.set_activation(activation);
        Ok(activation)
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    pub fn set_execution(&mut self, execution: Execution) {
        self.execution = execution;
    }

    pub(crate) fn require_activation(&self) -> Result<Activation> {
        self.activation.ok_or(Error::NullActivation)
    }

    /// Runs `input` through the network and returns a copy of the output
    /// layer's values.
    ///
    /// Fails without touching any neuron if `input` does not match the input
    /// layer's size, or if no activation is attached.
    pub fn compute_output(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        let activation = self.require_activation()?;
        self.feed_forward(input, &activation);
        self.layers.last()
            .map(Layer::outputs)
            .ok_or_else(|| Error::Malformed("network has no layers".to_string()))
    }

    /// Also rejects a network whose `layers` were emptied or cut below an
    /// input and an output layer.
    pub(crate) fn check_input(&self, input: &[f64]) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(Error::Malformed(format!(
                "a network needs at least 2 layers, found {}", self.layers.len()
            )));
        }
        if input.len() != self.input_size() {
            return Err(Error::InputSizeMismatch {
                expected: self.input_size(),
                actual: input.len(),
            });
        }
        Ok(())
    }

    /// Forward pass, front to back. `input` must already be size-checked.
    pub(crate) fn feed_forward(&mut self, input: &[f64], activation: &Activation) {
        let execution = self.execution;
        self.layers[0].feed_input(input, activation, execution);
        for i in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            rest[0].feed_from(&done[i - 1], activation, execution);
        }
    }

    /// Checks the layer layout and rebuilds every neuron's predecessor list:
    /// `inputs[k]` of a neuron in layer `i > 0` becomes neuron `k` of layer
    /// `i - 1`. Input-layer neurons get no predecessors.
    pub fn relink(&mut self) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(Error::Malformed(format!(
                "a network needs at least 2 layers, found {}", self.layers.len()
            )));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.neurons.is_empty() {
                return Err(Error::Malformed(format!("layer {i} has no neurons")));
            }
            let fan_in = if i == 0 { 1 } else { self.layers[i - 1].size() };
            for (j, neuron) in layer.neurons.iter().enumerate() {
                if neuron.weights.len() != fan_in || neuron.delta_weights.len() != fan_in {
                    return Err(Error::Malformed(format!(
                        "neuron {j} of layer {i} has {} weights and {} delta weights, expected {fan_in}",
                        neuron.weights.len(),
                        neuron.delta_weights.len(),
                    )));
                }
            }
        }

        for neuron in &mut self.layers[0].neurons {
            neuron.inputs.clear();
        }
        for i in 1..self.layers.len() {
            let inputs: Vec<NeuronId> = (0..self.layers[i - 1].size())
                .map(|index| NeuronId { layer: i - 1, index })
                .collect();
            for neuron in &mut self.layers[i].neurons {
                neuron.inputs.clone_from(&inputs);
            }
        }
        Ok(())
    }
}
