use thiserror::Error;

/// Error variants produced while rendering test sources.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodeGenError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid writer configuration: {message}")]
    InvalidConfig { message: String },
}
