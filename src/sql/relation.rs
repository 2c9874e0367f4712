//! FROM and JOIN compilation.

use crate::ident::Identifier;
use crate::spec::{JoinClause, Relation};

use super::token::{Token, TokenStream};
use super::{BuildError, BuildResult};

/// Compile a FROM or JOIN target into `schema.table[ alias]`.
///
/// Schema, table, and alias all pass identifier validation; unlike select
/// columns, relation names never carry qualification of their own.
pub fn compile_relation(relation: &Relation) -> BuildResult<TokenStream> {
    let schema = Identifier::validate(&relation.schema)?;
    let table = Identifier::validate(&relation.table)?;

    let mut ts = TokenStream::new();
    ts.push(Token::Ident(schema))
        .push(Token::Dot)
        .push(Token::Ident(table));

    if let Some(alias) = &relation.alias {
        let alias = Identifier::validate(alias)?;
        ts.space().push(Token::Ident(alias));
    }

    Ok(ts)
}

/// Compile the join list into `KIND JOIN schema.table[ alias] ON cond [AND cond]...`
/// clauses, concatenated with a single space in input order.
///
/// Join order is preserved as given: it affects the execution plan but not
/// result correctness for the inner/left joins used here. Condition
/// expressions are copied verbatim (see [`Token::Verbatim`]) and AND-joined;
/// OR is not part of the grammar.
pub fn compile_joins(joins: &[JoinClause]) -> BuildResult<TokenStream> {
    let mut ts = TokenStream::new();

    for (i, join) in joins.iter().enumerate() {
        if i > 0 {
            ts.space();
        }

        let relation = compile_relation(&join.relation)?;
        if join.conditions.is_empty() {
            return Err(BuildError::EmptyJoinConditions {
                relation: relation.serialize(),
            });
        }

        ts.push(Token::JoinKind(join.kind))
            .space()
            .push(Token::Join)
            .space()
            .append(&relation)
            .space()
            .push(Token::On)
            .space();

        for (c, cond) in join.conditions.iter().enumerate() {
            if c > 0 {
                ts.space().push(Token::And).space();
            }
            ts.push(Token::Verbatim(cond.left.clone()))
                .space()
                .push(Token::Verbatim(cond.op.clone()))
                .space()
                .push(Token::Verbatim(cond.right.clone()));
        }
    }

    Ok(ts)
}
