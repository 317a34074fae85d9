use thiserror::Error;
use tracker_traits::AdapterError;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("No track entry loaded for tracker {tracker}")]
    EntryNotLoaded { tracker: String },

    #[error("Unknown score format: {0}")]
    UnknownScoreFormat(String),

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
