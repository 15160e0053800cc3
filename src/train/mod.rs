pub mod trainer;
pub mod epoch_stats;
pub mod loop_fn;

pub use trainer::{evaluate, train_epoch, train_example};
pub use epoch_stats::EpochStats;
pub use loop_fn::{train_loop, train_with_stats};
