//! Request-to-DDL orchestration.
//!
//! The editor runs the transforms over a request one category at a time
//! (creates, renames, alters, drops), renders every tree node through the
//! dialect, and appends the side statements after all of them.

use ddlforge_sql::ast::Statement;
use ddlforge_sql::{DataType, DeparseContext, Dialect};
use tracing::{debug, trace};

use crate::edit::Request;
use crate::error::Result;
use crate::resolve::resolve_type;
use crate::transform;

/// The tree nodes and side statements a request turns into, in production
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeparseOutput {
    /// Statement tree nodes.
    pub statements: Vec<Statement>,
    /// Statements the tree cannot express, emitted after all tree nodes.
    pub side_statements: Vec<String>,
}

impl DeparseOutput {
    /// Returns true when nothing was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.side_statements.is_empty()
    }
}

/// Turns schema edit requests into DDL text for one dialect.
///
/// The editor holds no mutable state and can be shared between threads
/// whenever its dialect can.
#[derive(Debug, Clone)]
pub struct SchemaEditor<D: Dialect> {
    dialect: D,
    context: DeparseContext,
}

impl<D: Dialect> SchemaEditor<D> {
    /// Creates an editor rendering with the default context.
    #[must_use]
    pub fn new(dialect: D) -> Self {
        Self::with_context(dialect, DeparseContext::default())
    }

    /// Creates an editor rendering with the given context.
    #[must_use]
    pub const fn with_context(dialect: D, context: DeparseContext) -> Self {
        Self { dialect, context }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns the rendering context.
    #[must_use]
    pub const fn context(&self) -> &DeparseContext {
        &self.context
    }

    /// Resolves type text with this editor's dialect.
    ///
    /// # Errors
    ///
    /// See [`resolve_type`].
    pub fn resolve_type(&self, raw_type: &str) -> Result<DataType> {
        resolve_type(&self.dialect, raw_type)
    }

    /// Transforms a request into tree nodes and side statements.
    ///
    /// # Errors
    ///
    /// Returns the first transform error; nothing is produced in that case.
    pub fn transform(&self, request: &Request) -> Result<DeparseOutput> {
        let mut output = DeparseOutput::default();
        let side = &mut output.side_statements;

        for edit in &request.create_tables {
            let stmt = transform::create_table(&self.dialect, edit, side)?;
            output.statements.push(stmt);
        }
        for edit in &request.rename_tables {
            output.statements.push(transform::rename_table(edit));
        }
        for edit in &request.alter_tables {
            let stmt = transform::alter_table(&self.dialect, edit, side)?;
            output.statements.push(stmt);
        }
        for edit in &request.drop_tables {
            output.statements.push(transform::drop_table(edit));
        }

        Ok(output)
    }

    /// Renders transformed output as DDL text.
    ///
    /// Tree nodes come first, then side statements, one per line. A node
    /// that renders to nothing adds no line.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Deparse` for the first node the dialect cannot
    /// render.
    pub fn render(&self, output: &DeparseOutput) -> Result<String> {
        let mut lines = Vec::with_capacity(output.statements.len() + output.side_statements.len());
        for stmt in &output.statements {
            let sql = self.dialect.deparse(&self.context, stmt)?;
            if sql.is_empty() {
                trace!(kind = stmt.kind_name(), "Statement rendered empty");
                continue;
            }
            trace!(sql = %sql, "Rendered statement");
            lines.push(sql);
        }
        lines.extend(output.side_statements.iter().cloned());
        Ok(lines.join("\n"))
    }

    /// Turns a request into DDL text.
    ///
    /// # Errors
    ///
    /// Returns the first transform or render error; no partial text is
    /// returned.
    pub fn deparse(&self, request: &Request) -> Result<String> {
        debug!(
            dialect = self.dialect.name(),
            create = request.create_tables.len(),
            rename = request.rename_tables.len(),
            alter = request.alter_tables.len(),
            drop = request.drop_tables.len(),
            "Deparsing schema edits"
        );

        let output = self.transform(request)?;
        let sql = self.render(&output)?;

        debug!(
            statements = output.statements.len(),
            side_statements = output.side_statements.len(),
            "Deparsed schema edits"
        );
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{
        AddColumnEdit, AlterTableEdit, ChangeColumnEdit, CreateTableEdit, DropTableEdit,
        RenameTableEdit,
    };
    use crate::error::EditError;
    use ddlforge_sql::ast::TableRef;
    use ddlforge_sql::{DeparseError, PostgresDialect};

    fn editor() -> SchemaEditor<PostgresDialect> {
        SchemaEditor::new(PostgresDialect::new())
    }

    #[test]
    fn test_empty_request() {
        let editor = editor();
        assert!(editor.transform(&Request::new()).unwrap().is_empty());
        assert_eq!(editor.deparse(&Request::new()).unwrap(), "");
    }

    #[test]
    fn test_category_order() {
        let request = Request::new()
            .drop_table(DropTableEdit::new("", "d"))
            .alter_table(AlterTableEdit::new("", "a").drop_column("x"))
            .rename_table(RenameTableEdit::new("", "r", "r2"))
            .create_table(CreateTableEdit::new("", "c").column(AddColumnEdit::new("id", "int")));

        assert_eq!(
            editor().deparse(&request).unwrap(),
            "CREATE TABLE c (
    id INTEGER NOT NULL
);
ALTER TABLE r RENAME TO r2;
ALTER TABLE a DROP COLUMN x;
DROP TABLE IF EXISTS d;"
        );
    }

    #[test]
    fn test_side_statements_follow_all_tree_statements() {
        let request = Request::new()
            .create_table(
                CreateTableEdit::new("", "t1")
                    .column(AddColumnEdit::new("a", "int").comment("first")),
            )
            .alter_table(
                AlterTableEdit::new("", "t2")
                    .change_column(ChangeColumnEdit::new("b", "text").comment("second")),
            )
            .drop_table(DropTableEdit::new("", "t3"));

        let output = editor().transform(&request).unwrap();
        assert_eq!(output.statements.len(), 3);
        assert_eq!(
            output.side_statements,
            [
                "COMMENT ON COLUMN t1.a IS 'first';",
                "COMMENT ON COLUMN t2.b IS 'second';"
            ]
        );

        let sql = editor().deparse(&request).unwrap();
        let lines: Vec<_> = sql.lines().collect();
        assert_eq!(lines[lines.len() - 3], "DROP TABLE IF EXISTS t3;");
        assert_eq!(lines[lines.len() - 2], "COMMENT ON COLUMN t1.a IS 'first';");
        assert_eq!(lines[lines.len() - 1], "COMMENT ON COLUMN t2.b IS 'second';");
    }

    #[test]
    fn test_empty_alter_adds_no_line() {
        let request = Request::new()
            .alter_table(AlterTableEdit::new("", "t"))
            .drop_table(DropTableEdit::new("", "u"));
        assert_eq!(
            editor().deparse(&request).unwrap(),
            "DROP TABLE IF EXISTS u;"
        );
    }

    #[test]
    fn test_custom_indent() {
        let editor = SchemaEditor::with_context(
            PostgresDialect::new(),
            DeparseContext::with_indent_width(2),
        );
        let request = Request::new().create_table(
            CreateTableEdit::new("public", "t")
                .column(AddColumnEdit::new("id", "bigint"))
                .primary_key(["id"]),
        );
        assert_eq!(
            editor.deparse(&request).unwrap(),
            "CREATE TABLE public.t (
  id BIGINT NOT NULL,
  PRIMARY KEY (id)
);"
        );
        assert_eq!(editor.context().indent, "  ");
    }

    #[test]
    fn test_resolver_error_aborts() {
        let request = Request::new()
            .create_table(CreateTableEdit::new("", "ok").column(AddColumnEdit::new("a", "int")))
            .alter_table(
                AlterTableEdit::new("", "t").add_column(AddColumnEdit::new("b", "no such (type")),
            );
        let err = editor().deparse(&request).unwrap_err();
        assert!(matches!(err, EditError::InEdit { ref table, .. } if table == "t"));
    }

    #[test]
    fn test_render_error_aborts() {
        let output = DeparseOutput {
            statements: vec![
                Statement::DropTable {
                    if_exists: true,
                    tables: vec![TableRef::bare("a")],
                },
                Statement::DropTable {
                    if_exists: true,
                    tables: vec![],
                },
            ],
            side_statements: vec![],
        };
        let err = editor().render(&output).unwrap_err();
        assert!(matches!(err, EditError::Deparse(DeparseError::NoTables)));
    }

    #[test]
    fn test_editor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaEditor<PostgresDialect>>();
    }
}
