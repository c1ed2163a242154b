use scylla::errors::{DbError, ExecutionError, RequestAttemptError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {message}")]
    Query { transient: bool, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClusterError {
    /// Transport-level failures worth another attempt. Logical errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClusterError::Query { transient: true, .. })
    }
}

impl From<ExecutionError> for ClusterError {
    fn from(err: ExecutionError) -> Self {
        ClusterError::Query {
            transient: is_transient(&err),
            message: err.to_string(),
        }
    }
}

fn is_transient(err: &ExecutionError) -> bool {
    match err {
        ExecutionError::RequestTimeout(_)
        | ExecutionError::EmptyPlan
        | ExecutionError::ConnectionPoolError(_) => true,
        ExecutionError::LastAttemptError(attempt) => match attempt {
            RequestAttemptError::BrokenConnectionError(_) => true,
            RequestAttemptError::DbError(db_error, _) => matches!(
                db_error,
                DbError::Unavailable { .. }
                    | DbError::Overloaded
                    | DbError::IsBootstrapping
                    | DbError::ReadTimeout { .. }
                    | DbError::WriteTimeout { .. }
            ),
            _ => false,
        },
        _ => false,
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Command error: {0}")]
    Command(String),
}

impl From<redis::RedisError> for CacheError {
    /// Unreachable nodes and sentinels that know no usable master are
    /// connection failures; replies the server sent back (auth, syntax) are not.
    fn from(err: redis::RedisError) -> Self {
        let no_master = matches!(
            err.kind(),
            redis::ErrorKind::MasterNameNotFoundBySentinel
                | redis::ErrorKind::NoValidReplicasFoundBySentinel
        );

        if no_master
            || err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Command(err.to_string())
        }
    }
}
