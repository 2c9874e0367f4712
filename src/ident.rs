//! SQL identifier validation.
//!
//! Every schema, table, alias, and view name that is interpolated literally
//! into generated SQL must pass through [`Identifier::validate`]. The
//! resulting [`Identifier`] is the only sanctioned channel for turning a raw
//! request string into SQL-safe text without escaping.
//!
//! This is deliberately NOT applied to bare column tokens, function names, or
//! join-condition expressions, which are accepted verbatim (see the security
//! warnings on [`crate::sql::Token::Verbatim`]).

use once_cell::sync::Lazy;
use regex::Regex;

/// Accepted identifier grammar: leading letter or underscore, then letters,
/// digits, or underscores. Rejects whitespace, quotes, and all SQL
/// punctuation by construction.
static IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Result type for identifier validation.
pub type IdentResult<T> = Result<T, IdentError>;

/// Error raised when a raw name fails the identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
    /// The raw value did not match `^[A-Za-z_][A-Za-z0-9_]*$` or was empty.
    #[error("invalid identifier: {raw:?}")]
    InvalidIdentifier { raw: String },
}

/// A validated SQL identifier.
///
/// Opaque wrapper around the accepted string. Once constructed it may be
/// spliced into SQL text verbatim; there is no other way to obtain one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate a raw name against the identifier grammar.
    ///
    /// Returns the frozen [`Identifier`] on success; the returned text is
    /// byte-identical to the input.
    pub fn validate(raw: &str) -> IdentResult<Identifier> {
        if IDENT_RE.is_match(raw) {
            Ok(Identifier(raw.to_string()))
        } else {
            Err(IdentError::InvalidIdentifier {
                raw: raw.to_string(),
            })
        }
    }

    /// The validated text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        for raw in ["users", "sales_2024", "_private", "Tenant", "a"] {
            let ident = Identifier::validate(raw).unwrap();
            assert_eq!(ident.as_str(), raw);
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Identifier::validate("").is_err());
    }

    #[test]
    fn test_rejects_leading_digit() {
        assert!(Identifier::validate("1users").is_err());
    }

    #[test]
    fn test_rejects_sql_punctuation() {
        for raw in [
            "users;",
            "users table",
            "users'",
            "\"users\"",
            "a.b",
            "x; DROP TABLE users;--",
            "fn()",
        ] {
            assert!(
                Identifier::validate(raw).is_err(),
                "expected rejection: {raw:?}"
            );
        }
    }

    #[test]
    fn test_validated_text_is_unchanged() {
        let ident = Identifier::validate("rev_by_month").unwrap();
        assert_eq!(format!("{ident}"), "rev_by_month");
        assert_eq!(&*ident, "rev_by_month");
    }
}
