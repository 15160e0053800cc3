pub mod error;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod dataset;

// Convenience re-exports
pub use error::{Error, Result};
pub use activation::activation::Activation;
pub use layers::dense::{Execution, Layer};
pub use layers::neuron::{Neuron, NeuronId};
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use dataset::sample::{load_dataset, save_dataset, Sample};
pub use train::epoch_stats::EpochStats;
pub use train::loop_fn::{train_loop, train_with_stats};
pub use train::trainer::{evaluate, train_epoch};
