use serde::{Serialize, Deserialize};

/// Per-epoch training statistics handed to the `train_with_stats` callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// Count of completed epochs, starting at 1.
    pub epoch: usize,
    /// Mean loss over all examples of this epoch.
    pub loss: f64,
    /// Time spent training this epoch, in milliseconds.
    pub elapsed_ms: u64,
}
