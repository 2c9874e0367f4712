//! # Viewsmith
//!
//! Compiles declarative JSON query specifications into SQL and provisions
//! Postgres materialized views from them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          JSON request (mv_name, select, from, ...)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [spec - decoded once, closed enums]
//! ┌─────────────────────────────────────────────────────────┐
//! │                QuerySpec / ViewSpec                      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql - expr / relation / group / assemble]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SELECT statement text                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [provision - transactional DDL]
//! ┌─────────────────────────────────────────────────────────┐
//! │   CREATE SCHEMA / DROP MV / CREATE MV / REFRESH MV       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Compilation is pure and stateless; the only blocking step is DDL
//! execution through the [`provision::SqlSession`] seam. Raw names reach SQL
//! text exclusively through [`ident::Identifier`] validation; the narrow set
//! of verbatim passthroughs (bare columns, function names, join-condition
//! expressions) is documented on [`sql::Token::Verbatim`].

pub mod config;
pub mod ident;
pub mod provision;
pub mod spec;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{ConfigError, ConnectionConfig};
    pub use crate::ident::{IdentError, Identifier};
    pub use crate::provision::{
        provision, provision_via_procedure, ProvisionError, ProvisionReport, SessionError,
        SqlSession,
    };
    pub use crate::spec::{
        AggregateColumn, FunctionArg, FunctionCall, GroupByItem, JoinClause, JoinCondition,
        JoinKind, QuerySpec, Relation, SelectItem, SpecError, ViewSpec,
    };
    pub use crate::sql::{assemble, BuildError, Token, TokenStream};
}

// Also export at crate root for convenience
pub use ident::{IdentError, Identifier};
pub use provision::{provision, provision_via_procedure, ProvisionError, ProvisionReport};
pub use spec::{QuerySpec, ViewSpec};
pub use sql::{assemble, BuildError};
