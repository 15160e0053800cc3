pub mod momentum;

pub use momentum::{momentum_delta, DEFAULT_MOMENTUM};
