use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::{mpsc, AcquireError};

use crate::index::Reviews;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),
    #[error("Invalid review ID {0:?}")]
    InvalidReviewId(String),
    #[error("Invalid results pattern {0:?}")]
    InvalidPattern(String),

    #[error("Index file {0} doesn't exist, build the index first.")]
    MissingIndex(PathBuf),
    #[error("Couldn't decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
    #[error("Worker pool was closed while acquiring a permit.")]
    RuntimeAcquire(#[from] AcquireError),
    #[error("Couldn't send a result through a channel.")]
    RuntimeSendError,

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<mpsc::error::SendError<(String, Reviews)>> for Error {
    fn from(_value: mpsc::error::SendError<(String, Reviews)>) -> Self {
        Error::RuntimeSendError
    }
}
