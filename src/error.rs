use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input layer size: {expected}; input vector size: {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("output layer size: {expected}; label vector size: {actual}")]
    LabelSizeMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Parse(serde_json::Error),

    /// The JSON parsed but does not describe a consistent network.
    #[error("malformed network: {0}")]
    Malformed(String),

    #[error("no activation function attached to the network")]
    NullActivation,

    #[error("unknown activation function: {0}")]
    UnknownActivation(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("dataset is empty")]
    EmptyDataset,
}

impl From<serde_json::Error> for Error {
    /// Reader/writer failures surface as `Io`, everything else as `Parse`.
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Parse(err)
        }
    }
}
