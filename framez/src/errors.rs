use std::borrow::Cow;

use thiserror::Error;

/// Top-level error type returned by framez backends and stores.
#[derive(Debug, Error)]
pub enum FramezError {
    /// The caller presented no identity.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The identity carries neither a token identifier nor a subject.
    #[error("missing token identifier")]
    MissingTokenIdentifier,

    /// The identity is valid but `store_user` has not been called for it yet.
    #[error("user not found; call store_user first")]
    UserNotRegistered,

    /// Target document was not found.
    #[error("{collection} not found: {id}")]
    NotFound { collection: &'static str, id: String },

    /// The caller is authenticated but may not perform the action.
    #[error("not authorized to {action}")]
    Unauthorized { action: &'static str },

    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// A unique index already maps the value to another document.
    #[error("unique constraint violation on index '{index}' (existing document '{existing_id}')")]
    UniqueViolation { index: String, existing_id: String },

    /// Underlying Redis command failed.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A stored document could not be (de)serialized.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("{message}")]
    Other { message: Cow<'static, str> },
}

impl FramezError {
    pub(crate) fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }

    /// Returns the validation issue codes carried by this error, if any.
    pub fn validation_codes(&self) -> Vec<&str> {
        match self {
            FramezError::Validation(err) => err.issues.iter().map(|issue| issue.code.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<serde_json::Error> for FramezError {
    fn from(err: serde_json::Error) -> Self {
        FramezError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Collection of validation issues encountered while preparing a mutation.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Detailed validation failure for a single field or logical path.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
