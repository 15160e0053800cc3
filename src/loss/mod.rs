pub mod squared_error;

pub use squared_error::HalfSquaredError;
