pub mod sample;

pub use sample::{load_dataset, save_dataset, Sample};
