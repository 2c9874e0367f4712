//! End-to-end compilation: wire-shape JSON payloads through the statement
//! assembler.

use serde_json::json;
use viewsmith::prelude::*;

fn query(value: serde_json::Value) -> QuerySpec {
    serde_json::from_value(value).expect("query spec should decode")
}

#[test]
fn test_reporting_view_scenario() {
    let spec = query(json!({
        "select": [
            {"column": "region"},
            {"aggregate": "sum", "column": "amount", "alias": "total"}
        ],
        "from": {"schema": "public", "table": "sales"},
        "group_by": [{"column": "region"}]
    }));

    let sql = assemble(&spec).unwrap();
    assert_eq!(
        sql,
        "SELECT region, SUM(amount) AS total FROM public.sales GROUP BY region"
    );
}

#[test]
fn test_joined_aggregation() {
    let spec = query(json!({
        "select": [
            {"column": "r.name", "alias": "region"},
            {"aggregate": "count", "column": "*", "alias": "orders"}
        ],
        "from": {"schema": "public", "table": "orders", "alias": "o"},
        "joins": [
            {"type": "LEFT", "schema": "ref", "table": "regions", "alias": "r",
             "conditions": [
                {"left": "o.region_id", "op": "=", "right": "r.id"},
                {"left": "r.active", "op": "=", "right": "true"}
             ]}
        ],
        "group_by": [{"column": "r.name"}]
    }));

    let sql = assemble(&spec).unwrap();
    assert_eq!(
        sql,
        "SELECT r.name AS region, COUNT(*) AS orders FROM public.orders o \
         LEFT JOIN ref.regions r ON o.region_id = r.id AND r.active = true \
         GROUP BY r.name"
    );
}

#[test]
fn test_function_call_in_select_and_group_by() {
    let spec = query(json!({
        "select": [
            {"function": {"name": "date_trunc", "args": ["month", {"column": "created_at"}]},
             "alias": "m"},
            {"aggregate": "sum", "column": "amount", "alias": "total"}
        ],
        "from": {"table": "sales"},
        "group_by": [
            {"function": {"name": "date_trunc", "args": ["month", {"column": "created_at"}]}}
        ]
    }));

    let sql = assemble(&spec).unwrap();
    assert_eq!(
        sql,
        "SELECT date_trunc(month, created_at) AS m, SUM(amount) AS total \
         FROM public.sales GROUP BY date_trunc(month, created_at)"
    );
}

#[test]
fn test_empty_group_by_omits_clause() {
    let spec = query(json!({
        "select": [{"aggregate": "count", "column": "*"}],
        "from": {"table": "users"}
    }));

    let sql = assemble(&spec).unwrap();
    assert_eq!(sql, "SELECT COUNT(*) FROM public.users");
    assert!(!sql.contains("GROUP BY"));
}

#[test]
fn test_distinct_aggregate() {
    let spec = query(json!({
        "select": [{"aggregate": "count", "column": "tenant_id", "distinct": true}],
        "from": {"table": "users"}
    }));

    assert_eq!(
        assemble(&spec).unwrap(),
        "SELECT COUNT(DISTINCT tenant_id) FROM public.users"
    );
}

#[test]
fn test_join_without_conditions_fails() {
    let spec = query(json!({
        "select": [{"column": "id"}],
        "from": {"table": "orders"},
        "joins": [{"schema": "ref", "table": "regions", "conditions": []}]
    }));

    match assemble(&spec).unwrap_err() {
        BuildError::EmptyJoinConditions { relation } => assert_eq!(relation, "ref.regions"),
        other => panic!("expected EmptyJoinConditions, got {other:?}"),
    }
}

#[test]
fn test_malformed_select_item_aborts_with_position() {
    let spec = query(json!({
        "select": [
            {"column": "region"},
            {"aggregate": "sum", "column": "amount", "alias": "bad alias"}
        ],
        "from": {"table": "sales"}
    }));

    match assemble(&spec).unwrap_err() {
        BuildError::SelectItem { index, .. } => assert_eq!(index, 1),
        other => panic!("expected positioned error, got {other:?}"),
    }
}

#[test]
fn test_group_by_function_without_args_fails() {
    let spec = query(json!({
        "select": [{"column": "region"}],
        "from": {"table": "sales"},
        "group_by": [{"function": {"name": "now", "args": []}}]
    }));

    match assemble(&spec).unwrap_err() {
        BuildError::GroupByFunctionMissingArgs { function } => assert_eq!(function, "now"),
        other => panic!("expected GroupByFunctionMissingArgs, got {other:?}"),
    }
}

#[test]
fn test_injection_in_table_name_fails_compilation() {
    let spec = query(json!({
        "select": [{"column": "id"}],
        "from": {"table": "users; DROP TABLE users;--"}
    }));

    assert!(matches!(
        assemble(&spec).unwrap_err(),
        BuildError::Identifier(_)
    ));
}

#[test]
fn test_unknown_select_shape_rejected_at_decode() {
    let result: Result<QuerySpec, _> = serde_json::from_value(json!({
        "select": [{"window": "row_number"}],
        "from": {"table": "sales"}
    }));
    assert!(result.is_err());
}
