//! View provisioning orchestration.
//!
//! Wraps an assembled SELECT into the transactional DDL sequence that
//! provisions a Postgres materialized view, and executes it through a
//! [`SqlSession`]. This is the only layer permitted to touch the database
//! transaction; everything below it is pure compilation.
//!
//! Two requests targeting the same `(schema, name)` pair are not mutually
//! excluded here - the database's own DDL locking is the sole serialization
//! mechanism. No retries: a failed attempt is reported once and the caller
//! must resubmit.

pub mod session;

pub use session::{SessionError, SessionResult, SqlSession};

use serde::Serialize;

use crate::ident::{IdentError, Identifier};
use crate::spec::ViewSpec;
use crate::sql::token::{Token, TokenStream};
use crate::sql::{self, BuildError};

/// Stored procedure used by the pre-compiled provisioning path.
const PROVISION_PROCEDURE: &str = "create_imat";

/// Result type for provisioning.
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Errors surfaced by the orchestrator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProvisionError {
    /// The view name or schema failed identifier validation. Raised before
    /// any SQL is assembled or executed.
    #[error(transparent)]
    Identifier(#[from] IdentError),

    /// The query spec failed to compile.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The database rejected the DDL sequence. The generated SELECT is
    /// carried along for auditability - the attempted SQL is never hidden
    /// from the caller. Not retried: re-running a failed DDL sequence
    /// without a fix may leave the schema half-provisioned.
    #[error("failed creating materialized view: {detail}")]
    Execution {
        detail: String,
        generated_sql: String,
    },
}

/// Successful provisioning outcome.
///
/// Serializes to the wire contract: `{"mv": "schema.name",
/// "generated_sql": "SELECT ..."}`. The generated SQL is part of the
/// external contract and is always surfaced for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    /// Fully qualified `schema.name` of the provisioned view.
    #[serde(rename = "mv")]
    pub view: String,
    /// The SELECT statement the view was created from.
    pub generated_sql: String,
}

/// Provision a materialized view from a compiled query spec.
///
/// Steps, as one logical unit against the session's transaction:
/// 1. Validate `view_schema` and `view_name` - request-level names are
///    strict identifiers, no qualification allowed.
/// 2. Assemble the SELECT from the query spec.
/// 3. Execute, in order: `CREATE SCHEMA IF NOT EXISTS`, `DROP MATERIALIZED
///    VIEW IF EXISTS ... CASCADE`, `CREATE MATERIALIZED VIEW ... WITH NO
///    DATA`, `REFRESH MATERIALIZED VIEW`.
/// 4. Commit; on any execution failure, roll back best-effort and surface
///    the database detail together with the generated SELECT.
///
/// The `DROP ... CASCADE` destroys dependent objects - an intentional,
/// documented destructive step; caller confirmation is an external concern.
/// Drop-if-exists also makes the sequence repeatable: re-submitting the same
/// spec succeeds and returns identical SQL.
pub async fn provision<S: SqlSession + ?Sized>(
    view: &ViewSpec,
    session: &mut S,
) -> ProvisionResult<ProvisionReport> {
    let schema = Identifier::validate(&view.view_schema)?;
    let name = Identifier::validate(&view.view_name)?;

    let generated_sql = sql::assemble(&view.query)?;

    for statement in ddl_statements(&schema, &name, &generated_sql) {
        if let Err(err) = session.execute(&statement).await {
            return Err(abort(session, err, &generated_sql).await);
        }
    }
    if let Err(err) = session.commit().await {
        return Err(abort(session, err, &generated_sql).await);
    }

    Ok(ProvisionReport {
        view: format!("{schema}.{name}"),
        generated_sql,
    })
}

/// Provision through the pre-existing `create_imat` stored procedure.
///
/// The simpler path: no query compilation, just two validated names passed
/// as quoted arguments. Shares the identifier contract with [`provision`];
/// the identifier grammar excludes quotes, so the rendered literals are
/// inert.
pub async fn provision_via_procedure<S: SqlSession + ?Sized>(
    view_name: &str,
    schema: &str,
    session: &mut S,
) -> ProvisionResult<ProvisionReport> {
    let name = Identifier::validate(view_name)?;
    let schema = Identifier::validate(schema)?;

    let call = procedure_call(&name, &schema);
    if let Err(err) = session.execute(&call).await {
        return Err(abort(session, err, &call).await);
    }
    if let Err(err) = session.commit().await {
        return Err(abort(session, err, &call).await);
    }

    Ok(ProvisionReport {
        view: format!("{schema}.{name}"),
        generated_sql: call,
    })
}

/// Roll back best-effort and build the execution error. A rollback failure
/// never masks the original database error.
async fn abort<S: SqlSession + ?Sized>(
    session: &mut S,
    err: SessionError,
    generated_sql: &str,
) -> ProvisionError {
    let _ = session.rollback().await;
    ProvisionError::Execution {
        detail: err.to_string(),
        generated_sql: generated_sql.to_string(),
    }
}

/// The four-statement DDL sequence, in execution order.
pub fn ddl_statements(schema: &Identifier, name: &Identifier, select: &str) -> Vec<String> {
    let mut create_schema = TokenStream::new();
    create_schema
        .push(Token::Create)
        .space()
        .push(Token::Schema)
        .space()
        .push(Token::If)
        .space()
        .push(Token::Not)
        .space()
        .push(Token::Exists)
        .space()
        .push(Token::Ident(schema.clone()));

    let mut drop_view = TokenStream::new();
    drop_view
        .push(Token::Drop)
        .space()
        .push(Token::Materialized)
        .space()
        .push(Token::View)
        .space()
        .push(Token::If)
        .space()
        .push(Token::Exists)
        .space()
        .append(&qualified(schema, name))
        .space()
        .push(Token::Cascade);

    let mut create_view = TokenStream::new();
    create_view
        .push(Token::Create)
        .space()
        .push(Token::Materialized)
        .space()
        .push(Token::View)
        .space()
        .append(&qualified(schema, name))
        .space()
        .push(Token::As)
        .space()
        .push(Token::Verbatim(select.to_string()))
        .space()
        .push(Token::WithNoData);

    let mut refresh = TokenStream::new();
    refresh
        .push(Token::Refresh)
        .space()
        .push(Token::Materialized)
        .space()
        .push(Token::View)
        .space()
        .append(&qualified(schema, name));

    vec![
        create_schema.serialize(),
        drop_view.serialize(),
        create_view.serialize(),
        refresh.serialize(),
    ]
}

fn qualified(schema: &Identifier, name: &Identifier) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Ident(schema.clone()))
        .push(Token::Dot)
        .push(Token::Ident(name.clone()));
    ts
}

fn procedure_call(name: &Identifier, schema: &Identifier) -> String {
    let mut ts = TokenStream::new();
    ts.push(Token::Select)
        .space()
        .push(Token::FunctionName(PROVISION_PROCEDURE.to_string()))
        .lparen()
        .push(Token::QuotedIdent(name.clone()))
        .comma()
        .space()
        .push(Token::QuotedIdent(schema.clone()))
        .rparen();
    ts.serialize()
}
