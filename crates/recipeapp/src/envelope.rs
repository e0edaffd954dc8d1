//! Uniform success/failure wrapper for clients that want a single shape.
//!
//! Rust callers work with [`crate::error::Result`] directly. Clients that
//! serialize responses (a web layer, `--json` output) convert a result into an
//! [`Envelope`] so they only ever branch on `success`.

use crate::error::{ErrorKind, RecipeError};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            kind: None,
            data: Some(data),
        }
    }

    pub fn failed(err: &RecipeError) -> Self {
        Self {
            success: false,
            message: Some(err.to_string()),
            kind: Some(err.kind()),
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> From<Result<T, RecipeError>> for Envelope<T> {
    fn from(result: Result<T, RecipeError>) -> Self {
        match result {
            Ok(data) => Envelope::ok(data),
            Err(e) => Envelope::failed(&e),
        }
    }
}
