#![allow(dead_code)]

use ddlforge::prelude::*;
use ddlforge_sql::ast::{AlterItem, Statement};
use ddlforge_sql::{Dialect, ParseContext, PostgresDialect};

pub fn editor() -> SchemaEditor<PostgresDialect> {
    SchemaEditor::new(PostgresDialect::new())
}

pub fn deparse(request: &Request) -> String {
    editor()
        .deparse(request)
        .unwrap_or_else(|e| panic!("Failed to deparse: {request:?}\nError: {e:?}"))
}

pub fn transform(request: &Request) -> DeparseOutput {
    editor()
        .transform(request)
        .unwrap_or_else(|e| panic!("Failed to transform: {request:?}\nError: {e:?}"))
}

/// Returns the items of the single `ALTER TABLE` a request produces.
pub fn alter_items(request: &Request) -> Vec<AlterItem> {
    let mut output = transform(request);
    assert_eq!(output.statements.len(), 1, "Expected one statement");
    match output.statements.remove(0) {
        Statement::AlterTable { items, .. } => items,
        other => panic!("Expected ALTER TABLE, got {other:?}"),
    }
}

pub fn reparse(sql: &str) -> Vec<Statement> {
    PostgresDialect::new()
        .parse(&ParseContext::default(), sql)
        .unwrap_or_else(|e| panic!("Failed to parse generated SQL: {sql}\nError: {e}"))
}

pub fn column(name: &str, raw_type: &str) -> AddColumnEdit {
    AddColumnEdit::new(name, raw_type)
}
