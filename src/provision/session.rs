//! The database session seam.
//!
//! The orchestrator never owns a connection: it drives a [`SqlSession`],
//! which the host wires to a real Postgres client. All four DDL statements
//! are executed inside the session's enclosing transaction; timeouts and
//! cancellation are the session provider's concern, not the orchestrator's.

use async_trait::async_trait;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors reported by a session implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The database rejected a statement.
    #[error("database error: {detail}")]
    Database { detail: String },

    /// The connection dropped mid-transaction.
    #[error("connection lost: {detail}")]
    ConnectionLost { detail: String },
}

/// A transactional database session that can run raw SQL.
///
/// `execute` runs one statement inside the session's current transaction;
/// `commit` and `rollback` end it. The orchestrator calls `rollback`
/// best-effort after a failed `execute` - an implementation whose rollback
/// also fails does not mask the original error.
#[async_trait]
pub trait SqlSession: Send {
    /// Execute one SQL statement inside the current transaction.
    async fn execute(&mut self, sql: &str) -> SessionResult<()>;

    /// Commit the current transaction.
    async fn commit(&mut self) -> SessionResult<()>;

    /// Roll back the current transaction.
    async fn rollback(&mut self) -> SessionResult<()>;
}
