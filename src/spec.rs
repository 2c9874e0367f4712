//! Request-boundary data model for view provisioning.
//!
//! The inbound JSON payload is decoded exactly once into the closed types in
//! this module; the compilers in [`crate::sql`] then match exhaustively. This
//! replaces duck-typed "which keys are present" branching with a fallible
//! conversion at the boundary, so a request can never match zero or multiple
//! select-item shapes ambiguously.
//!
//! All values are transient: constructed fresh per request, consumed once by
//! the compiler and orchestrator, never persisted. A re-submission recompiles
//! from scratch.

use serde::Deserialize;
use serde_json::Value;

/// Errors raised while decoding a request payload into the closed model.
///
/// These surface through serde as deserialization errors; they are always
/// recoverable by caller correction and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("unknown select item shape: expected one of column / aggregate / function")]
    UnknownSelectItem,

    #[error("unknown group_by item shape: expected column or function")]
    UnknownGroupByItem,

    #[error("unsupported join type: {raw:?}")]
    UnsupportedJoinKind { raw: String },

    #[error("aggregate item must have a column")]
    MissingAggregateColumn,

    #[error("function must have a name")]
    MissingFunctionName,

    #[error("unsupported function argument: {detail}")]
    UnsupportedFunctionArg { detail: String },
}

// =============================================================================
// Select items
// =============================================================================

/// One item of the SELECT list.
///
/// Decode priority mirrors the declared shape priority: a bare `column` key
/// (with neither `aggregate` nor `function` present) wins first, then
/// `aggregate`, then `function`. Anything else is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSelectItem")]
pub enum SelectItem {
    /// Plain column token, emitted verbatim. May be qualified (`t.amount`);
    /// bare columns are NOT identifier-validated — a deliberate widening of
    /// the trust boundary relative to view/schema/alias names.
    Column { name: String, alias: Option<String> },

    /// Aggregate call: `SUM(amount)`, `COUNT(*)`, `COUNT(DISTINCT region)`.
    Aggregate {
        /// Aggregate function name; uppercased at emission.
        function: String,
        column: AggregateColumn,
        distinct: bool,
        alias: Option<String>,
    },

    /// Generic function call, e.g. `date_trunc(month, created_at)`.
    Call {
        function: FunctionCall,
        alias: Option<String>,
    },
}

/// The argument of an aggregate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateColumn {
    /// The literal `*` token; only legal for non-distinct aggregates.
    Star,
    /// A column expression, emitted verbatim.
    Expr(String),
}

/// A generic function call with ordered arguments.
///
/// The function name is taken verbatim (not validated) to allow
/// vendor-specific functions. This is the primary injection-risk surface of
/// the compiler: callers must treat function names as privileged input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<FunctionArg>,
}

/// One argument of a generic function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionArg {
    /// Object argument `{"column": "..."}`; the column text is emitted
    /// verbatim (may be qualified).
    Column(String),
    /// Scalar JSON argument, rendered as its bare string form (`"month"` →
    /// `month`, `7` → `7`). No quoting is added.
    Literal(String),
}

impl FunctionArg {
    fn from_value(value: &Value) -> Result<FunctionArg, SpecError> {
        match value {
            Value::Object(map) => match map.get("column") {
                Some(Value::String(column)) => Ok(FunctionArg::Column(column.clone())),
                _ => Err(SpecError::UnsupportedFunctionArg {
                    detail: "object argument must carry a string 'column' key".into(),
                }),
            },
            Value::String(s) => Ok(FunctionArg::Literal(s.clone())),
            Value::Number(n) => Ok(FunctionArg::Literal(n.to_string())),
            Value::Bool(b) => Ok(FunctionArg::Literal(b.to_string())),
            Value::Null | Value::Array(_) => Err(SpecError::UnsupportedFunctionArg {
                detail: "argument must be a scalar or a {\"column\": ...} object".into(),
            }),
        }
    }
}

/// Wire shape of a select item before shape dispatch.
#[derive(Debug, Deserialize)]
struct RawSelectItem {
    column: Option<String>,
    aggregate: Option<String>,
    distinct: Option<bool>,
    function: Option<RawFunctionCall>,
    alias: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFunctionCall {
    name: Option<String>,
    #[serde(default)]
    args: Vec<Value>,
}

impl TryFrom<RawFunctionCall> for FunctionCall {
    type Error = SpecError;

    fn try_from(raw: RawFunctionCall) -> Result<FunctionCall, SpecError> {
        let name = raw.name.ok_or(SpecError::MissingFunctionName)?;
        let args = raw
            .args
            .iter()
            .map(FunctionArg::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FunctionCall { name, args })
    }
}

impl TryFrom<RawSelectItem> for SelectItem {
    type Error = SpecError;

    fn try_from(raw: RawSelectItem) -> Result<SelectItem, SpecError> {
        // First match wins: plain column, then aggregate, then function call.
        match raw {
            RawSelectItem {
                column: Some(name),
                aggregate: None,
                function: None,
                alias,
                distinct: _,
            } => Ok(SelectItem::Column { name, alias }),

            RawSelectItem {
                aggregate: Some(function),
                column,
                distinct,
                alias,
                function: _,
            } => {
                let column = match column {
                    Some(ref c) if c == "*" => AggregateColumn::Star,
                    Some(c) => AggregateColumn::Expr(c),
                    None => return Err(SpecError::MissingAggregateColumn),
                };
                Ok(SelectItem::Aggregate {
                    function,
                    column,
                    distinct: distinct.unwrap_or(false),
                    alias,
                })
            }

            RawSelectItem {
                function: Some(function),
                alias,
                ..
            } => Ok(SelectItem::Call {
                function: function.try_into()?,
                alias,
            }),

            _ => Err(SpecError::UnknownSelectItem),
        }
    }
}

// =============================================================================
// Relations and joins
// =============================================================================

/// A FROM or JOIN target: `schema.table` with an optional alias.
///
/// All three names are identifier-validated by the relation compiler before
/// they reach SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relation {
    #[serde(default = "default_schema")]
    pub schema: String,
    pub table: String,
    pub alias: Option<String>,
}

fn default_schema() -> String {
    "public".to_string()
}

/// Join kind keyword. Defaults to INNER when the request omits `type`.
///
/// Closed set: the kind lands in SQL keyword position, so arbitrary text is
/// rejected at decode rather than uppercased into the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    /// The SQL keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
            JoinKind::Cross => "CROSS",
        }
    }
}

impl TryFrom<String> for JoinKind {
    type Error = SpecError;

    fn try_from(raw: String) -> Result<JoinKind, SpecError> {
        match raw.to_uppercase().as_str() {
            "INNER" => Ok(JoinKind::Inner),
            "LEFT" => Ok(JoinKind::Left),
            "RIGHT" => Ok(JoinKind::Right),
            "FULL" => Ok(JoinKind::Full),
            "CROSS" => Ok(JoinKind::Cross),
            _ => Err(SpecError::UnsupportedJoinKind { raw }),
        }
    }
}

/// One `left op right` join predicate.
///
/// All three parts are expressions copied verbatim into the ON clause —
/// join predicates are expressions, not bare identifiers, so they are not
/// identifier-validated. Same trust boundary as bare select columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinCondition {
    pub left: String,
    pub op: String,
    pub right: String,
}

/// A JOIN clause: kind, target relation, and AND-combined conditions.
///
/// Conditions are combined in the given order; there is no OR support — a
/// documented grammar limitation, not a bug.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinClause {
    #[serde(rename = "type", default)]
    pub kind: JoinKind,
    #[serde(flatten)]
    pub relation: Relation,
    #[serde(default)]
    pub conditions: Vec<JoinCondition>,
}

// =============================================================================
// Group by
// =============================================================================

/// One GROUP BY item: a bare column token or a function call. No alias, no
/// aggregate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawGroupByItem")]
pub enum GroupByItem {
    Column(String),
    Call(FunctionCall),
}

#[derive(Debug, Deserialize)]
struct RawGroupByItem {
    column: Option<String>,
    function: Option<RawFunctionCall>,
}

impl TryFrom<RawGroupByItem> for GroupByItem {
    type Error = SpecError;

    fn try_from(raw: RawGroupByItem) -> Result<GroupByItem, SpecError> {
        if let Some(column) = raw.column {
            return Ok(GroupByItem::Column(column));
        }
        if let Some(function) = raw.function {
            return Ok(GroupByItem::Call(function.try_into()?));
        }
        Err(SpecError::UnknownGroupByItem)
    }
}

// =============================================================================
// Query and view specs
// =============================================================================

/// A complete declarative query: the unit the statement assembler consumes.
///
/// `select` and `from` are required; joins and group_by may be empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuerySpec {
    pub select: Vec<SelectItem>,
    pub from: Relation,
    #[serde(default)]
    pub joins: Vec<JoinClause>,
    #[serde(default)]
    pub group_by: Vec<GroupByItem>,
}

/// One inbound provisioning request.
///
/// The view name and schema stay raw here; the orchestrator validates them
/// (strictly — no qualification allowed) before any SQL is assembled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewSpec {
    #[serde(rename = "mv_name")]
    pub view_name: String,
    #[serde(rename = "mv_schema", default = "default_view_schema")]
    pub view_schema: String,
    #[serde(flatten)]
    pub query: QuerySpec,
}

fn default_view_schema() -> String {
    "imat".to_string()
}
