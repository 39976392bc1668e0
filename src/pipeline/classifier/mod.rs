pub mod types;
pub mod huggingface;
pub mod mock;

pub use types::*;
pub use huggingface::*;
pub use mock::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Classifier service is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Classifier returned no predictions")]
    EmptyResponse,
}
