//! Error taxonomy for the ETL pipeline and dashboard.
//!
//! Every fallible operation in the crate surfaces a [`PipelineError`]. The
//! variants follow the failure domains of the pipeline: configuration,
//! connectivity, DDL, CSV/cell parsing, load-time constraint breaches, and
//! metric computation.

use std::fmt;

/// Error type for pipeline operations
#[derive(Debug, Clone)]
pub enum PipelineError {
    /// Required environment value missing or malformed
    Config(String),
    /// The relational store is unreachable or dropped the connection
    Connection(String),
    /// DDL statement failed
    Schema(String),
    /// Missing file, malformed CSV, or an unparseable cell
    Parse {
        context: String,
        reason: String,
    },
    /// Foreign-key or unique-key breach during load
    Constraint(String),
    /// Metric derivation failure; aggregate code degrades to zero instead of
    /// raising this, so it only appears if an invariant is broken upstream
    Computation(String),
}

impl PipelineError {
    /// Parse error with a source context (file path, column, row)
    pub fn parse(context: impl Into<String>, reason: impl Into<String>) -> Self {
        PipelineError::Parse {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(msg) => write!(f, "Configuration error: {}", msg),
            PipelineError::Connection(msg) => write!(f, "Connection error: {}", msg),
            PipelineError::Schema(msg) => write!(f, "Schema error: {}", msg),
            PipelineError::Parse { context, reason } => {
                write!(f, "Parse error in {}: {}", context, reason)
            }
            PipelineError::Constraint(msg) => write!(f, "Constraint violation: {}", msg),
            PipelineError::Computation(msg) => write!(f, "Computation error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<diesel::result::Error> for PipelineError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation => {
                    PipelineError::Constraint(info.message().to_string())
                }
                _ => PipelineError::Connection(info.message().to_string()),
            },
            other => PipelineError::Connection(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PipelineError {
    fn from(err: diesel::ConnectionError) -> Self {
        PipelineError::Connection(err.to_string())
    }
}

impl From<r2d2::Error> for PipelineError {
    fn from(err: r2d2::Error) -> Self {
        PipelineError::Connection(err.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = PipelineError::parse("column 'Price', row 3", "invalid float literal");
        assert_eq!(
            err.to_string(),
            "Parse error in column 'Price', row 3: invalid float literal"
        );
    }

    #[test]
    fn test_constraint_mapped_from_diesel_fk_violation() {
        let err: PipelineError = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            Box::new("Cannot add or update a child row".to_string()),
        )
        .into();

        assert!(matches!(err, PipelineError::Constraint(_)));
    }

    #[test]
    fn test_not_found_mapped_to_connection() {
        let err: PipelineError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, PipelineError::Connection(_)));
    }
}
