use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-wide error.
///
/// Keep this small and stable. Crates can define their own error types and map them into EngineError.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("window error: {0}")]
    Window(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("engine error: {0}")]
    Other(String),
}
