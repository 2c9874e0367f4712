//! Select-item compilation: one [`SelectItem`] to one SQL column expression.

use crate::ident::Identifier;
use crate::spec::{AggregateColumn, FunctionArg, FunctionCall, SelectItem};

use super::token::{Token, TokenStream};
use super::{BuildError, BuildResult};

/// Compile one select item into its SQL expression tokens.
///
/// - `Column` emits the raw column token unchanged. Columns may be qualified
///   (`t.amount`) and are deliberately not identifier-validated; see
///   [`Token::Verbatim`].
/// - `Aggregate` uppercases the function name and emits `FN(*)`,
///   `FN(column)`, or `FN(DISTINCT column)`. `DISTINCT` with `*` is rejected.
/// - `Call` emits `name(arg1, arg2, ...)` with the function name verbatim.
///
/// An alias, when present, must pass identifier validation and is appended
/// as ` AS alias`.
pub fn compile_select_item(item: &SelectItem) -> BuildResult<TokenStream> {
    let (mut ts, alias) = match item {
        SelectItem::Column { name, alias } => {
            let mut ts = TokenStream::new();
            ts.push(Token::Verbatim(name.clone()));
            (ts, alias)
        }

        SelectItem::Aggregate {
            function,
            column,
            distinct,
            alias,
        } => {
            let mut ts = TokenStream::new();
            ts.push(Token::FunctionName(function.to_uppercase()));
            ts.lparen();
            match column {
                AggregateColumn::Star => {
                    if *distinct {
                        return Err(BuildError::DistinctStar);
                    }
                    ts.push(Token::Star);
                }
                AggregateColumn::Expr(column) => {
                    if *distinct {
                        ts.push(Token::Distinct).space();
                    }
                    ts.push(Token::Verbatim(column.clone()));
                }
            }
            ts.rparen();
            (ts, alias)
        }

        SelectItem::Call { function, alias } => (compile_call(function), alias),
    };

    if let Some(alias) = alias {
        let alias = Identifier::validate(alias)?;
        ts.space().push(Token::As).space().push(Token::Ident(alias));
    }

    Ok(ts)
}

/// Compile the whole select list, joined with `, `.
///
/// A single malformed item aborts the compilation; the error carries the
/// item's position in the list.
pub fn compile_select_list(items: &[SelectItem]) -> BuildResult<TokenStream> {
    if items.is_empty() {
        return Err(BuildError::EmptySelect);
    }
    let mut ts = TokenStream::new();
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            ts.comma().space();
        }
        let item = compile_select_item(item).map_err(|source| BuildError::SelectItem {
            index,
            source: Box::new(source),
        })?;
        ts.append(&item);
    }
    Ok(ts)
}

/// Render a generic function call: `name(arg1, arg2, ...)`.
///
/// The function name and column arguments are verbatim (privileged input);
/// literal arguments are their bare string form. Shared with GROUP BY
/// compilation.
pub(crate) fn compile_call(call: &FunctionCall) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::FunctionName(call.name.clone()));
    ts.lparen();
    for (i, arg) in call.args.iter().enumerate() {
        if i > 0 {
            ts.comma().space();
        }
        let text = match arg {
            FunctionArg::Column(column) => column,
            FunctionArg::Literal(literal) => literal,
        };
        ts.push(Token::Verbatim(text.clone()));
    }
    ts.rparen();
    ts
}
