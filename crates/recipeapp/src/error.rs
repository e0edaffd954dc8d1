use serde::Serialize;
use thiserror::Error;

/// Flat classification of a [`RecipeError`], for clients that branch on the
/// kind of failure rather than on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidArgument,
    Conflict,
    NotFound,
    ParseError,
    IoError,
}

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Could not parse '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl RecipeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecipeError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RecipeError::Conflict(_) => ErrorKind::Conflict,
            RecipeError::NotFound(_) => ErrorKind::NotFound,
            RecipeError::Parse { .. } => ErrorKind::ParseError,
            RecipeError::Io { .. } => ErrorKind::IoError,
        }
    }

    pub(crate) fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        RecipeError::Io {
            key: key.into(),
            source,
        }
    }

    pub(crate) fn parse(key: impl Into<String>, source: serde_json::Error) -> Self {
        RecipeError::Parse {
            key: key.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            RecipeError::NotFound("x".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            RecipeError::io("recipes", std::io::Error::other("disk")).kind(),
            ErrorKind::IoError
        );
    }

    #[test]
    fn io_message_names_the_key() {
        let err = RecipeError::io("recipes", std::io::Error::other("disk full"));
        let msg = err.to_string();
        assert!(msg.contains("recipes"));
        assert!(msg.contains("disk full"));
    }
}
