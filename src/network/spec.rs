use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::layers::neuron::{Neuron, NeuronId};
use crate::network::network::Network;
use crate::optim::momentum::DEFAULT_MOMENTUM;

/// Construction parameters of a network, storable as JSON independently of
/// any trained weights.
///
/// `layers` lists neuron counts from input to output (at least two, none
/// zero). `bias`, `momentum` and `learning_rate` are copied into every
/// neuron; only the first two take part in evaluation and training.
/// Missing numeric fields fall back to 1.0, 0.9 and 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layers: Vec<usize>,
    pub activation: Activation,
    #[serde(default = "default_bias")]
    pub bias: f64,
    #[serde(default = "default_momentum")]
    pub momentum: f64,
    #[serde(default)]
    pub learning_rate: f64,
}

fn default_bias() -> f64 {
    1.0
}

fn default_momentum() -> f64 {
    DEFAULT_MOMENTUM
}

impl NetworkSpec {
    pub fn new(layers: Vec<usize>, activation: Activation) -> NetworkSpec {
        NetworkSpec {
            layers,
            activation,
            bias: default_bias(),
            momentum: default_momentum(),
            learning_rate: 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(Error::InvalidTopology(format!(
                "need an input and an output layer, got {} layer(s)", self.layers.len()
            )));
        }
        if let Some(i) = self.layers.iter().position(|&size| size == 0) {
            return Err(Error::InvalidTopology(format!("layer {i} has no neurons")));
        }
        Ok(())
    }

    /// Builds a fresh network. Every non-input neuron draws its own weights
    /// uniformly from [0, 1); input neurons get the fixed weight `1.0`.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        self.validate()?;
        let activation = &self.activation;

        let mut layers = Vec::with_capacity(self.layers.len());
        layers.push(Layer::new(
            (0..self.layers[0])
                .map(|_| Neuron::passthrough(self.bias, self.momentum, self.learning_rate, activation))
                .collect(),
        ));

        for i in 1..self.layers.len() {
            let fan_in = self.layers[i - 1];
            let neurons = (0..self.layers[i])
                .map(|_| {
                    let inputs = (0..fan_in).map(|index| NeuronId { layer: i - 1, index }).collect();
                    let weights = (0..fan_in).map(|_| rng.gen::<f64>()).collect();
                    Neuron::connected(self.bias, self.momentum, self.learning_rate, activation, inputs, weights)
                })
                .collect();
            layers.push(Layer::new(neurons));
        }

        Ok(Network::from_layers(layers, Some(self.activation)))
    }

    /// Writes the construction parameters to `path` as indented JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads parameters written by `save_json`, rejecting unusable topologies.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkSpec> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}
