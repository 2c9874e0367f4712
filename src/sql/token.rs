//! SQL tokens - the atomic units of SQL output.
//!
//! Tokens keep keyword spelling, spacing, and the verbatim trust boundary in
//! one place: every statement the crate emits is a serialized [`TokenStream`].

use crate::ident::Identifier;

/// SQL token - every element that can appear in a generated statement.
///
/// Adding a new variant here will cause compile errors everywhere it needs to
/// be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Join,
    On,
    And,
    As,
    Distinct,
    GroupBy,
    Create,
    Drop,
    Schema,
    Materialized,
    View,
    If,
    Not,
    Exists,
    Cascade,
    Refresh,
    WithNoData,

    /// Join kind keyword (INNER, LEFT, RIGHT, FULL, CROSS).
    JoinKind(crate::spec::JoinKind),

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LParen,
    RParen,
    Space,

    /// A validated identifier. Emitted unquoted: the [`Identifier`] grammar
    /// already excludes everything that would need escaping.
    Ident(Identifier),

    /// A single-quoted string literal holding a validated identifier, for
    /// passing names as arguments to a stored procedure. The identifier
    /// grammar excludes quotes, so the literal is inert.
    QuotedIdent(Identifier),

    /// Aggregate or generic function name. Rendered as-is; aggregate names
    /// are uppercased before they become tokens.
    FunctionName(String),

    // === Escape Hatch ===
    /// Expression text passed directly to output without validation.
    ///
    /// # Security Warning
    ///
    /// This variant is the compiler's deliberate trust-boundary widening:
    /// bare column tokens, function-call arguments, and join-condition
    /// expressions are copied verbatim so that qualified references
    /// (`t.amount`) and vendor expressions keep working. Callers must treat
    /// everything that reaches this variant as privileged input. Names that
    /// land in identifier position (schemas, tables, aliases, view names)
    /// must use [`Token::Ident`] instead.
    Verbatim(String),
}

impl Token {
    /// Serialize this token to its SQL text.
    pub fn serialize(&self) -> String {
        match self {
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Join => "JOIN".into(),
            Token::On => "ON".into(),
            Token::And => "AND".into(),
            Token::As => "AS".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::Create => "CREATE".into(),
            Token::Drop => "DROP".into(),
            Token::Schema => "SCHEMA".into(),
            Token::Materialized => "MATERIALIZED".into(),
            Token::View => "VIEW".into(),
            Token::If => "IF".into(),
            Token::Not => "NOT".into(),
            Token::Exists => "EXISTS".into(),
            Token::Cascade => "CASCADE".into(),
            Token::Refresh => "REFRESH".into(),
            Token::WithNoData => "WITH NO DATA".into(),
            Token::JoinKind(kind) => kind.keyword().into(),

            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Space => " ".into(),

            Token::Ident(ident) => ident.as_str().into(),
            Token::QuotedIdent(ident) => format!("'{ident}'"),
            Token::FunctionName(name) => name.clone(),
            Token::Verbatim(text) => text.clone(),
        }
    }
}

/// A stream of tokens that serializes to one SQL statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Whether the stream holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(Token::serialize).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::JoinKind;

    #[test]
    fn test_keyword_serialize() {
        assert_eq!(Token::Select.serialize(), "SELECT");
        assert_eq!(Token::GroupBy.serialize(), "GROUP BY");
        assert_eq!(Token::WithNoData.serialize(), "WITH NO DATA");
        assert_eq!(Token::JoinKind(JoinKind::Full).serialize(), "FULL");
    }

    #[test]
    fn test_ident_serialize_unquoted() {
        let ident = Identifier::validate("sales").unwrap();
        assert_eq!(Token::Ident(ident.clone()).serialize(), "sales");
        assert_eq!(Token::QuotedIdent(ident).serialize(), "'sales'");
    }

    #[test]
    fn test_token_stream() {
        let mut ts = TokenStream::new();
        ts.push(Token::Select)
            .space()
            .push(Token::Verbatim("t.amount".into()))
            .space()
            .push(Token::From)
            .space()
            .push(Token::Ident(Identifier::validate("sales").unwrap()));

        assert_eq!(ts.serialize(), "SELECT t.amount FROM sales");
    }

    #[test]
    fn test_empty_stream() {
        let ts = TokenStream::new();
        assert!(ts.is_empty());
        assert_eq!(ts.serialize(), "");
    }
}
