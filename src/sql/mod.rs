//! SQL generation module.
//!
//! Compiles the closed request model in [`crate::spec`] into a single SELECT
//! statement:
//!
//! - [`token`] - token types for SQL generation
//! - [`expr`] - select-item compilation (columns, aggregates, function calls)
//! - [`relation`] - FROM and JOIN compilation
//! - [`group`] - GROUP BY compilation
//! - [`assemble`] - statement assembly
//!
//! Compilation is pure, synchronous, and stateless between invocations. Any
//! single malformed item aborts the whole compilation; there are no partial
//! statements.

pub mod assemble;
pub mod expr;
pub mod group;
pub mod relation;
pub mod token;

#[cfg(test)]
pub mod test_utils;

pub use assemble::assemble;
pub use expr::compile_select_item;
pub use group::compile_group_by;
pub use relation::{compile_joins, compile_relation};
pub use token::{Token, TokenStream};

use crate::ident::IdentError;

/// Result type for statement compilation.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while compiling a query spec into SQL text.
///
/// All variants are recoverable by caller correction and are never retried
/// internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A select item failed to compile; `index` is its position in the
    /// select list.
    #[error("select item {index}: {source}")]
    SelectItem {
        index: usize,
        #[source]
        source: Box<BuildError>,
    },

    #[error("select list cannot be empty")]
    EmptySelect,

    /// `DISTINCT *` has no meaning for the supported aggregates.
    #[error("aggregate '*' cannot be combined with DISTINCT")]
    DistinctStar,

    /// A join carried no conditions; `relation` names the offending
    /// `schema.table` target.
    #[error("join {relation} must have at least one condition")]
    EmptyJoinConditions { relation: String },

    /// A GROUP BY function call had an empty argument list.
    #[error("function {function:?} in group_by must have args")]
    GroupByFunctionMissingArgs { function: String },

    /// A schema, table, alias, or select alias failed identifier validation.
    #[error(transparent)]
    Identifier(#[from] IdentError),
}
