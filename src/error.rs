use thiserror::Error;

/// Rejected input to a [`Student`](crate::student::Student) constructor or mutator.
///
/// Validation always happens before any state is touched, so a returned
/// `ValidationError` means the entity is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("score {score} is outside the range 0-100")]
    ScoreOutOfRange { score: f64 },
    #[error("score \"{value}\" is not a number between 0 and 100")]
    NotANumber { value: String },
}

/// Outcome of a collection operation that did not go through.
///
/// A missing or duplicate id is an expected result, not a fault: callers
/// match on it and tell the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollectionError {
    #[error("student with id \"{0}\" is already registered")]
    DuplicateId(String),
    #[error("student with id \"{0}\" not found")]
    NotFound(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
