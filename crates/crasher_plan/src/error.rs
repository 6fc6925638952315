use crasher_types::ClassName;
use std::fmt;
use thiserror::Error;

/// Construction-time failures. They abort building one node or block and are
/// never raised while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("plan index {index} is outside [0, {size})")]
    IndexOutOfRange { index: u64, size: u64 },
}

impl PlanError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        PlanError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn check_index(index: u64, size: u64) -> Result<(), Self> {
        if index < size {
            Ok(())
        } else {
            Err(PlanError::IndexOutOfRange { index, size })
        }
    }
}

/// A failure raised by code under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Type of the raised exception.
    pub exception: ClassName,
    /// Qualified name (`pkg.Type.method`) of the frame that raised it, when known.
    pub raised_in: Option<String>,
    pub message: String,
}

impl Failure {
    pub fn new(exception: ClassName, message: impl Into<String>) -> Self {
        Self {
            exception,
            raised_in: None,
            message: message.into(),
        }
    }

    pub fn raised_in(mut self, frame: impl Into<String>) -> Self {
        self.raised_in = Some(frame.into());
        self
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.exception.binary_name())?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(frame) = &self.raised_in {
            write!(f, " (at {frame})")?;
        }
        Ok(())
    }
}

/// Failures while evaluating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("{operation} raised {failure}")]
    Invocation { operation: String, failure: Failure },

    #[error("{operation} may not be invoked from the test context")]
    Access { operation: String },

    #[error("cannot instantiate {type_name}: {message}")]
    Instantiation { type_name: String, message: String },

    #[error("variable `{name}` is read before it is bound")]
    UnboundVariable { name: String },
}
