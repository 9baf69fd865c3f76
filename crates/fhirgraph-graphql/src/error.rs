//! Error types for GraphQL operations.
//!
//! Errors here are the ones that surface at the transport boundary; they
//! carry enough structure to produce an HTTP status, a GraphQL error code
//! and a FHIR OperationOutcome.

use std::fmt;

/// Errors that can occur during GraphQL operations.
#[derive(Debug)]
pub enum GraphQLError {
    /// Schema is still being built; the client should retry.
    SchemaInitializing,

    /// Schema build failed.
    SchemaBuildFailed(String),

    /// Invalid query or request shape.
    InvalidQuery(String),

    /// Resource not found.
    NotFound {
        /// Resource type.
        resource_type: String,
        /// Resource ID.
        resource_id: String,
    },

    /// Storage error.
    Storage(String),

    /// Internal server error.
    Internal(String),
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaInitializing => {
                write!(f, "GraphQL schema is initializing, please retry")
            }
            Self::SchemaBuildFailed(msg) => {
                write!(f, "failed to build GraphQL schema: {msg}")
            }
            Self::InvalidQuery(msg) => {
                write!(f, "invalid GraphQL request: {msg}")
            }
            Self::NotFound {
                resource_type,
                resource_id,
            } => {
                write!(f, "{resource_type}/{resource_id} not found")
            }
            Self::Storage(msg) => {
                write!(f, "storage error: {msg}")
            }
            Self::Internal(msg) => {
                write!(f, "internal error: {msg}")
            }
        }
    }
}

impl std::error::Error for GraphQLError {}

impl GraphQLError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SchemaInitializing => 503,
            Self::SchemaBuildFailed(_) => 500,
            Self::InvalidQuery(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Machine-readable code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaInitializing => "SCHEMA_INITIALIZING",
            Self::SchemaBuildFailed(_) => "SCHEMA_BUILD_FAILED",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Retry-After header value in seconds, if applicable.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::SchemaInitializing => Some(5),
            _ => None,
        }
    }

    /// Renders the error as a FHIR OperationOutcome.
    #[must_use]
    pub fn to_operation_outcome(&self) -> serde_json::Value {
        let severity = match self {
            Self::SchemaInitializing => "information",
            Self::NotFound { .. } => "warning",
            _ => "error",
        };

        let code = match self {
            Self::SchemaInitializing => "transient",
            Self::InvalidQuery(_) => "invalid",
            Self::NotFound { .. } => "not-found",
            Self::Storage(_) | Self::SchemaBuildFailed(_) | Self::Internal(_) => "exception",
        };

        serde_json::json!({
            "resourceType": "OperationOutcome",
            "issue": [{
                "severity": severity,
                "code": code,
                "diagnostics": self.to_string()
            }]
        })
    }
}

impl From<fhirgraph_storage::StorageError> for GraphQLError {
    fn from(err: fhirgraph_storage::StorageError) -> Self {
        match err {
            fhirgraph_storage::StorageError::NotFound { resource_type, id } => Self::NotFound {
                resource_type,
                resource_id: id,
            },
            other => Self::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GraphQLError::SchemaInitializing.status_code(), 503);
        assert_eq!(GraphQLError::InvalidQuery("x".into()).status_code(), 400);
        assert_eq!(
            GraphQLError::NotFound {
                resource_type: "Patient".into(),
                resource_id: "123".into()
            }
            .status_code(),
            404
        );
        assert_eq!(GraphQLError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_retry_after() {
        assert_eq!(GraphQLError::SchemaInitializing.retry_after(), Some(5));
        assert_eq!(GraphQLError::InvalidQuery("x".into()).retry_after(), None);
    }

    #[test]
    fn test_operation_outcome() {
        let err = GraphQLError::NotFound {
            resource_type: "Patient".into(),
            resource_id: "123".into(),
        };
        let outcome = err.to_operation_outcome();

        assert_eq!(outcome["resourceType"], "OperationOutcome");
        assert_eq!(outcome["issue"][0]["severity"], "warning");
        assert_eq!(outcome["issue"][0]["code"], "not-found");
    }

    #[test]
    fn test_from_storage_error() {
        let err: GraphQLError = fhirgraph_storage::StorageError::not_found("Patient", "1").into();
        assert!(matches!(err, GraphQLError::NotFound { .. }));

        let err: GraphQLError = fhirgraph_storage::StorageError::internal("boom").into();
        assert!(matches!(err, GraphQLError::Storage(_)));
    }
}
