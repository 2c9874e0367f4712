//! Test utilities for SQL emission validation.
//!
//! Provides round-trip validation of generated statements using sqlparser-rs:
//! an assembled SELECT that Postgres' grammar cannot parse is a bug even if
//! every unit assertion passes.

use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

/// Validates that a SQL string parses under the Postgres grammar.
///
/// Note: sqlparser-rs does not understand `CREATE MATERIALIZED VIEW ... WITH
/// NO DATA` or `REFRESH MATERIALIZED VIEW`, so the DDL sequence cannot be
/// validated this way - only assembled SELECTs.
pub fn validate_sql(sql: &str) -> Result<(), String> {
    Parser::parse_sql(&PostgreSqlDialect {}, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL: {e}\nSQL: {sql}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM users").unwrap();
        validate_sql("SELECT region, SUM(amount) AS total FROM public.sales GROUP BY region")
            .unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        assert!(validate_sql("SELEC * FORM users").is_err());
    }
}
