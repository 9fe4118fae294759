use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A single rejected field of an article submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The name of the offending field, as it appears in the JSON body (e.g. `contentType`).
    pub field: String,
    /// A human-readable explanation.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors collected while validating an [`ArticleInput`](crate::ArticleInput).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.0
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Validation failed")?;
        for (i, error) in self.0.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { ", " })?;
            Display::fmt(error, f)?;
        }
        Ok(())
    }
}

/// A code that is not part of an enumerated vocabulary (languages, content types).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{code}'")]
pub struct UnknownCodeError {
    kind: &'static str,
    code: String,
}

impl UnknownCodeError {
    pub(crate) fn new(kind: &'static str, code: &str) -> Self {
        Self {
            kind,
            code: code.to_owned(),
        }
    }
}
