use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::network::network::Network;

impl Network {
    /// Writes the static state of every neuron (bias, weights, delta weights,
    /// learning rate, momentum, activation name) to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        info!("saved network {:?} to {}", self.layer_sizes(), path.display());
        Ok(())
    }

    /// Reads a network written by `save_json` and rebuilds its predecessor
    /// links. The returned network has no activation attached; call
    /// `set_activation` or `resolve_activation` before using it.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut network: Network = serde_json::from_reader(reader)?;
        network.relink()?;
        info!("loaded network {:?} from {}", network.layer_sizes(), path.display());
        Ok(network)
    }
}
