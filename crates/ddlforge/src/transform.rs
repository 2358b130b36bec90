//! Edit-to-tree transforms.
//!
//! One function per edit kind. Each returns the statement tree node the edit
//! becomes and appends any statement the tree cannot hold (column comments)
//! to the caller's side-statement list.

use ddlforge_sql::ast::{
    AlterItem, ColumnDef, ConstraintDef, Expr, ForeignRef, Statement, TableRef,
};
use ddlforge_sql::Dialect;

use crate::edit::{
    AddColumnEdit, AddForeignKeyEdit, AlterTableEdit, ChangeColumnEdit, CreateTableEdit,
    DropTableEdit, RenameTableEdit,
};
use crate::error::{EditError, EditKind, Result};
use crate::resolve::resolve_type;

/// Turns a table creation into a `CREATE TABLE` node.
///
/// Columns keep their order. The primary key, when present and non-empty,
/// comes first among the table constraints, followed by the foreign keys.
///
/// # Errors
///
/// Returns `EditError::InEdit` wrapping the column error when a column type
/// does not resolve.
pub fn create_table<D: Dialect + ?Sized>(
    dialect: &D,
    edit: &CreateTableEdit,
    side_statements: &mut Vec<String>,
) -> Result<Statement> {
    let mut columns = Vec::with_capacity(edit.columns.len());
    for column in &edit.columns {
        let def = add_column(dialect, column)
            .map_err(|e| e.in_edit(EditKind::CreateTable, edit.qualified_name()))?;
        if let Some(comment) = column.comment_text() {
            side_statements.push(
                column_comment(dialect, &edit.name, &def.name, comment)
                    .map_err(|e| e.in_edit(EditKind::CreateTable, edit.qualified_name()))?,
            );
        }
        columns.push(def);
    }

    let mut constraints = Vec::new();
    if let Some(keys) = edit.primary_key_columns() {
        constraints.push(ConstraintDef::primary_key(keys.to_vec()));
    }
    constraints.extend(edit.foreign_keys.iter().map(foreign_key));

    Ok(Statement::CreateTable {
        table: table_ref(&edit.schema, &edit.name),
        columns,
        constraints,
    })
}

/// Turns a table change into an `ALTER TABLE` node.
///
/// Items always come out as: dropped columns, added columns, changed columns
/// (each as rename, retype, nullability, default), dropped primary keys, the
/// added primary key, dropped foreign keys, added foreign keys. An edit that
/// requests nothing yields a node with no items.
///
/// # Errors
///
/// Returns `EditError::InEdit` wrapping the column error when a column type
/// does not resolve.
pub fn alter_table<D: Dialect + ?Sized>(
    dialect: &D,
    edit: &AlterTableEdit,
    side_statements: &mut Vec<String>,
) -> Result<Statement> {
    let in_edit = |e: EditError| e.in_edit(EditKind::AlterTable, edit.qualified_name());
    let mut items = Vec::new();

    items.extend(edit.drop_columns.iter().map(|column| AlterItem::DropColumn {
        column: column.clone(),
    }));

    for column in &edit.add_columns {
        let def = add_column(dialect, column).map_err(in_edit)?;
        if let Some(comment) = column.comment_text() {
            side_statements.push(
                column_comment(dialect, &edit.name, &def.name, comment).map_err(in_edit)?,
            );
        }
        items.push(AlterItem::AddColumnList { columns: vec![def] });
    }

    for change in &edit.change_columns {
        items.extend(change_column(dialect, change).map_err(in_edit)?);
        if let Some(comment) = change.comment_text() {
            side_statements.push(
                column_comment(dialect, &edit.name, &change.new_name, comment).map_err(in_edit)?,
            );
        }
    }

    items.extend(edit.drop_primary_key_names.iter().map(|n| drop_constraint(n)));
    if let Some(keys) = edit.primary_key_columns() {
        items.push(AlterItem::AddConstraint {
            constraint: ConstraintDef::primary_key(keys.to_vec()),
        });
    }
    items.extend(edit.drop_foreign_key_names.iter().map(|n| drop_constraint(n)));
    items.extend(edit.add_foreign_keys.iter().map(|fk| AlterItem::AddConstraint {
        constraint: foreign_key(fk),
    }));

    Ok(Statement::AlterTable {
        table: table_ref(&edit.schema, &edit.name),
        items,
    })
}

/// Turns a table rename into an `ALTER TABLE ... RENAME TO` node.
#[must_use]
pub fn rename_table(edit: &RenameTableEdit) -> Statement {
    Statement::AlterTable {
        table: table_ref(&edit.schema, &edit.old_name),
        items: vec![AlterItem::RenameTable {
            new_name: edit.new_name.clone(),
        }],
    }
}

/// Turns a table drop into a `DROP TABLE IF EXISTS` node.
#[must_use]
pub fn drop_table(edit: &DropTableEdit) -> Statement {
    Statement::DropTable {
        if_exists: true,
        tables: vec![table_ref(&edit.schema, &edit.name)],
    }
}

/// Builds a column definition, resolving its type through the dialect.
///
/// A default comes before `NOT NULL` in the column's constraint list.
///
/// # Errors
///
/// Returns `EditError::InColumn` wrapping the resolver error.
pub fn add_column<D: Dialect + ?Sized>(dialect: &D, edit: &AddColumnEdit) -> Result<ColumnDef> {
    let data_type = resolve_type(dialect, &edit.raw_type).map_err(|e| e.in_column(&edit.name))?;

    let mut column = ColumnDef::new(&edit.name, data_type);
    if let Some(default) = &edit.default {
        column = column.constraint(ConstraintDef::default_value(
            &edit.name,
            Expr::raw(default),
        ));
    }
    if !edit.nullable {
        column = column.constraint(ConstraintDef::not_null(&edit.name));
    }
    Ok(column)
}

/// Expands a column change into its alter items.
///
/// Every step after the rename names the column by its new name.
///
/// # Errors
///
/// Returns `EditError::InColumn` wrapping the resolver error.
pub fn change_column<D: Dialect + ?Sized>(
    dialect: &D,
    edit: &ChangeColumnEdit,
) -> Result<Vec<AlterItem>> {
    let column = &edit.new_name;
    let data_type = resolve_type(dialect, &edit.raw_type).map_err(|e| e.in_column(column))?;

    let mut items = Vec::with_capacity(4);
    if edit.is_rename() {
        items.push(AlterItem::RenameColumn {
            from: edit.old_name.clone(),
            to: column.clone(),
        });
    }
    items.push(AlterItem::AlterColumnType {
        column: column.clone(),
        data_type,
    });
    items.push(if edit.nullable {
        AlterItem::DropNotNull {
            column: column.clone(),
        }
    } else {
        AlterItem::SetNotNull {
            column: column.clone(),
        }
    });
    items.push(match &edit.default {
        Some(default) => AlterItem::SetDefault {
            column: column.clone(),
            expr: Expr::raw(default),
        },
        None => AlterItem::DropDefault {
            column: column.clone(),
        },
    });
    Ok(items)
}

/// Builds a foreign key constraint with `MATCH SIMPLE` and `NO ACTION` on
/// both update and delete.
#[must_use]
pub fn foreign_key(edit: &AddForeignKeyEdit) -> ConstraintDef {
    let reference = ForeignRef::new(
        table_ref(&edit.referenced_schema, &edit.referenced_table),
        edit.referenced_columns.clone(),
    );
    ConstraintDef::foreign_key(edit.columns.clone(), reference)
}

/// Renders the `COMMENT ON COLUMN` statement for a column.
///
/// Table and column are quoted the way the dialect quotes them in tree
/// statements. Single quotes in the comment are doubled.
///
/// The table is named without its schema, so the server resolves it through
/// `search_path`. For a table outside the first schema on that path the
/// comment can land on a same-named table elsewhere, or fail.
///
/// # Errors
///
/// Returns `EditError::Deparse` if the table or column name is empty.
pub fn column_comment<D: Dialect + ?Sized>(
    dialect: &D,
    table: &str,
    column: &str,
    comment: &str,
) -> Result<String> {
    Ok(format!(
        "COMMENT ON COLUMN {}.{} IS '{}';",
        dialect.quote_identifier(table)?,
        dialect.quote_identifier(column)?,
        comment.replace('\'', "''")
    ))
}

fn drop_constraint(name: &str) -> AlterItem {
    AlterItem::DropConstraint {
        name: name.to_string(),
        if_exists: true,
    }
}

fn table_ref(schema: &str, name: &str) -> TableRef {
    TableRef::new(Some(schema), name)
}
