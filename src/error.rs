use thiserror::Error;

/// Message shown to the user whenever a generation attempt fails.
pub const GENERATION_FAILED_MESSAGE: &str =
    "레시피를 생성하는 데 실패했습니다. 잠시 후 다시 시도해주세요.";

/// Errors surfaced by the recipe generator
#[derive(Error, Debug)]
pub enum ChefError {
    /// Missing credential, unknown provider, or otherwise unusable setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration sources could not be read or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A single generate call failed; the cause is kept as the error source
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    Generation(#[source] GenerationFailure),
}

impl ChefError {
    /// True for failures that end only the current attempt
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChefError::Generation(_))
    }
}

impl From<GenerationFailure> for ChefError {
    fn from(cause: GenerationFailure) -> Self {
        ChefError::Generation(cause)
    }
}

/// Underlying cause of a failed generate call, kept for diagnostics
#[derive(Error, Debug)]
pub enum GenerationFailure {
    /// Network or transport level failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response carried no text payload
    #[error("response contained no text payload")]
    MissingText,

    /// The text payload was not JSON matching the recipe shape
    #[error("malformed recipe JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// JSON parsed but the recipe is unusable
    #[error("invalid recipe: {0}")]
    InvalidShape(String),
}
