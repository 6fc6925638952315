use std::path::PathBuf;
use thiserror::Error;

/// A type name that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type name `{name}`: {reason}")]
pub struct TypeNameError {
    pub name: String,
    pub reason: String,
}

impl TypeNameError {
    pub fn new(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Failures while loading or querying a [`crate::TypeCatalog`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("failed to read catalogue {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("failed to parse catalogue: {message}")]
    Parse { message: String },

    #[error(transparent)]
    InvalidTypeName(#[from] TypeNameError),

    #[error("invalid entry for {type_name}: {message}")]
    InvalidEntry { type_name: String, message: String },

    #[error("type {type_name} is not in the catalogue")]
    UnknownType { type_name: String },
}
