//! SQL statement AST types.

use super::{ColumnDef, ConstraintDef, DataType, Expr};

/// What kind of relation a [`TableRef`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableKind {
    /// An ordinary table.
    #[default]
    BaseTable,
}

/// A reference to a table, optionally schema-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Relation kind.
    pub kind: TableKind,
}

impl TableRef {
    /// Creates a base-table reference. An empty schema means unqualified.
    #[must_use]
    pub fn new(schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.filter(|s| !s.is_empty()).map(String::from),
            name: name.into(),
            kind: TableKind::BaseTable,
        }
    }

    /// Creates an unqualified base-table reference.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(None, name)
    }
}

/// A single sub-command of `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterItem {
    /// `DROP COLUMN column`
    DropColumn {
        /// Column to drop.
        column: String,
    },
    /// `ADD COLUMN ...`
    AddColumnList {
        /// Columns to add.
        columns: Vec<ColumnDef>,
    },
    /// `RENAME COLUMN from TO to`
    RenameColumn {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// `ALTER COLUMN column TYPE data_type`
    AlterColumnType {
        /// Column to retype.
        column: String,
        /// New type.
        data_type: DataType,
    },
    /// `ALTER COLUMN column SET NOT NULL`
    SetNotNull {
        /// Target column.
        column: String,
    },
    /// `ALTER COLUMN column DROP NOT NULL`
    DropNotNull {
        /// Target column.
        column: String,
    },
    /// `ALTER COLUMN column SET DEFAULT expr`
    SetDefault {
        /// Target column.
        column: String,
        /// Default expression.
        expr: Expr,
    },
    /// `ALTER COLUMN column DROP DEFAULT`
    DropDefault {
        /// Target column.
        column: String,
    },
    /// `DROP CONSTRAINT [IF EXISTS] name`
    DropConstraint {
        /// Constraint name.
        name: String,
        /// Whether a missing constraint is tolerated.
        if_exists: bool,
    },
    /// `ADD constraint`
    AddConstraint {
        /// The table constraint to add.
        constraint: ConstraintDef,
    },
    /// `RENAME TO new_name`
    RenameTable {
        /// New table name.
        new_name: String,
    },
}

/// A DDL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `CREATE TABLE`
    CreateTable {
        /// Table to create.
        table: TableRef,
        /// Column definitions, in order.
        columns: Vec<ColumnDef>,
        /// Table-level constraints.
        constraints: Vec<ConstraintDef>,
    },
    /// `ALTER TABLE`
    AlterTable {
        /// Table to alter.
        table: TableRef,
        /// Sub-commands, applied in order.
        items: Vec<AlterItem>,
    },
    /// `DROP TABLE`
    DropTable {
        /// `IF EXISTS`.
        if_exists: bool,
        /// Tables to drop.
        tables: Vec<TableRef>,
    },
}

impl Statement {
    /// Returns the statement keyword pair, for diagnostics and logging.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::CreateTable { .. } => "CREATE TABLE",
            Self::AlterTable { .. } => "ALTER TABLE",
            Self::DropTable { .. } => "DROP TABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ref_empty_schema_is_unqualified() {
        assert_eq!(TableRef::new(Some(""), "t").schema, None);
        assert_eq!(TableRef::new(Some("public"), "t").schema.as_deref(), Some("public"));
        assert_eq!(TableRef::bare("t"), TableRef::new(None, "t"));
    }

    #[test]
    fn test_statement_kind_name() {
        let stmt = Statement::DropTable {
            if_exists: true,
            tables: vec![TableRef::bare("t")],
        };
        assert_eq!(stmt.kind_name(), "DROP TABLE");
    }
}
