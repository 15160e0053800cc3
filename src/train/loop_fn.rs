use std::time::Instant;

use log::{debug, info};

use crate::dataset::sample::Sample;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::trainer::train_epoch;

/// Trains `network` epoch after epoch until `callback` returns `false`.
///
/// `callback` receives each completed epoch's mean loss. There is no epoch
/// cap or convergence test; stopping is entirely up to the callback, which is
/// also the only point where training can be interrupted.
pub fn train_loop<F>(network: &mut Network, dataset: &[Sample], mut callback: F) -> Result<()>
where
    F: FnMut(f64) -> bool,
{
    train_with_stats(network, dataset, |stats| callback(stats.loss))
}

/// Same as `train_loop`, but the callback sees the full `EpochStats`.
pub fn train_with_stats<F>(network: &mut Network, dataset: &[Sample], mut callback: F) -> Result<()>
where
    F: FnMut(&EpochStats) -> bool,
{
    for epoch in 1.. {
        let t_start = Instant::now();
        let loss = train_epoch(network, dataset)?;
        let stats = EpochStats {
            epoch,
            loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        debug!("epoch {}: mean error {:.6} ({} ms)", stats.epoch, stats.loss, stats.elapsed_ms);

        if !callback(&stats) {
            info!("training stopped after {} epochs, mean error {:.6}", stats.epoch, stats.loss);
            break;
        }
    }
    Ok(())
}

impl Network {
    /// See `train_loop`.
    pub fn train<F>(&mut self, dataset: &[Sample], callback: F) -> Result<()>
    where
        F: FnMut(f64) -> bool,
    {
        train_loop(self, dataset, callback)
    }
}
