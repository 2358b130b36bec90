#![allow(dead_code)]

use ddlforge_sql::ast::{AlterItem, ColumnDef, ConstraintDef, DataType, Statement, TableRef};
use ddlforge_sql::{DeparseContext, Dialect, ParseContext, ParseError, PostgresDialect};

pub fn parse_all(sql: &str) -> Vec<Statement> {
    PostgresDialect::new()
        .parse(&ParseContext::default(), sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse(sql: &str) -> Statement {
    let mut statements = parse_all(sql);
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

pub fn parse_err(sql: &str) -> ParseError {
    PostgresDialect::new()
        .parse(&ParseContext::default(), sql)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub struct CreateTable {
    pub table: TableRef,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<ConstraintDef>,
}

pub fn parse_create(sql: &str) -> CreateTable {
    match parse(sql) {
        Statement::CreateTable {
            table,
            columns,
            constraints,
        } => CreateTable {
            table,
            columns,
            constraints,
        },
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_alter(sql: &str) -> (TableRef, Vec<AlterItem>) {
    match parse(sql) {
        Statement::AlterTable { table, items } => (table, items),
        other => panic!("Expected ALTER TABLE, got {other:?}"),
    }
}

/// Parses `raw` as the type of a single-column table.
pub fn parse_type(raw: &str) -> DataType {
    let create = parse_create(&format!("CREATE TABLE t (c {raw})"));
    assert_eq!(create.columns.len(), 1, "Expected one column for: {raw}");
    create.columns[0].data_type.clone()
}

pub fn deparse(stmt: &Statement) -> String {
    PostgresDialect::new()
        .deparse(&DeparseContext::default(), stmt)
        .unwrap_or_else(|e| panic!("Failed to deparse: {stmt:?}\nError: {e}"))
}

/// Verifies that deparsing is a fixed point: the rendering of `sql` parses
/// back and renders to the same text again.
pub fn round_trip(sql: &str) {
    let rendered1: Vec<String> = parse_all(sql).iter().map(deparse).collect();
    let rendered1 = rendered1.join("\n");
    let rendered2: Vec<String> = parse_all(&rendered1).iter().map(deparse).collect();
    let rendered2 = rendered2.join("\n");
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
