//! GROUP BY compilation.

use crate::spec::GroupByItem;

use super::expr::compile_call;
use super::token::{Token, TokenStream};
use super::{BuildError, BuildResult};

/// Compile the GROUP BY items, joined with `, `.
///
/// Returns `None` for an empty list: the assembler must omit the `GROUP BY`
/// keyword entirely rather than emit a dangling clause. Column items are
/// verbatim tokens; function items reuse the select-list call rendering, but
/// an empty argument list is a hard error here.
pub fn compile_group_by(items: &[GroupByItem]) -> BuildResult<Option<TokenStream>> {
    if items.is_empty() {
        return Ok(None);
    }

    let mut ts = TokenStream::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            ts.comma().space();
        }
        match item {
            GroupByItem::Column(column) => {
                ts.push(Token::Verbatim(column.clone()));
            }
            GroupByItem::Call(call) => {
                if call.args.is_empty() {
                    return Err(BuildError::GroupByFunctionMissingArgs {
                        function: call.name.clone(),
                    });
                }
                ts.append(&compile_call(call));
            }
        }
    }

    Ok(Some(ts))
}
