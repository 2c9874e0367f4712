//! Statement assembly: one [`QuerySpec`] to one SELECT statement.

use crate::spec::QuerySpec;

use super::expr::compile_select_list;
use super::group::compile_group_by;
use super::relation::{compile_joins, compile_relation};
use super::token::{Token, TokenStream};
use super::BuildResult;

/// Assemble the full statement:
/// `SELECT <items> FROM <relation>[ <joins>][ GROUP BY <items>]`.
///
/// Pure string construction - no view names, no DDL, no trailing semicolon.
/// The join text is appended only when joins exist, and the `GROUP BY`
/// keyword is omitted entirely when the group list is empty.
pub fn assemble(spec: &QuerySpec) -> BuildResult<String> {
    let mut ts = TokenStream::new();

    ts.push(Token::Select)
        .space()
        .append(&compile_select_list(&spec.select)?)
        .space()
        .push(Token::From)
        .space()
        .append(&compile_relation(&spec.from)?);

    let joins = compile_joins(&spec.joins)?;
    if !joins.is_empty() {
        ts.space().append(&joins);
    }

    if let Some(group_by) = compile_group_by(&spec.group_by)? {
        ts.space().push(Token::GroupBy).space().append(&group_by);
    }

    Ok(ts.serialize())
}
