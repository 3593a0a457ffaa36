use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThesisError {
    #[error("Teacher not found: {0}")]
    TeacherNotFound(String),

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Status not found: {0}")]
    StatusNotFound(String),

    #[error("Document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Coarse classification of a [`ThesisError`], for callers that only need to
/// decide how to react (e.g. which message a chat front-end shows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    IoFailure,
    ParseError,
    InvalidState,
    InvalidInput,
}

impl ThesisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ThesisError::TeacherNotFound(_)
            | ThesisError::StudentNotFound(_)
            | ThesisError::StatusNotFound(_)
            | ThesisError::DocumentNotFound(_) => ErrorKind::NotFound,
            ThesisError::Conflict(_) => ErrorKind::Conflict,
            ThesisError::InvalidState(_) => ErrorKind::InvalidState,
            ThesisError::InvalidInput(_) => ErrorKind::InvalidInput,
            ThesisError::Io(_) | ThesisError::Store(_) => ErrorKind::IoFailure,
            ThesisError::Serialization(_) => ErrorKind::ParseError,
        }
    }
}

pub type Result<T> = std::result::Result<T, ThesisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            ThesisError::TeacherNotFound("A".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ThesisError::DocumentNotFound(PathBuf::from("x.json")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(ThesisError::Conflict("dup".into()).kind(), ErrorKind::Conflict);
        assert_eq!(
            ThesisError::Store("disk full".into()).kind(),
            ErrorKind::IoFailure
        );

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ThesisError::from(parse).kind(), ErrorKind::ParseError);
    }
}
