//! Error types for the schema-edit deparser.

use std::fmt;

use ddlforge_sql::{DeparseError, ParseError};

/// The kind of table edit an error was raised under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// A table creation.
    CreateTable,
    /// A table rename.
    RenameTable,
    /// A change to an existing table.
    AlterTable,
    /// A table removal.
    DropTable,
}

impl EditKind {
    /// Returns the statement the edit turns into.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTable => "CREATE TABLE",
            Self::RenameTable => "RENAME TABLE",
            Self::AlterTable => "ALTER TABLE",
            Self::DropTable => "DROP TABLE",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while turning edits into DDL.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// Raw type text did not parse as a column type.
    #[error("Failed to resolve type '{raw_type}'")]
    TypeResolution {
        /// The type text as supplied.
        raw_type: String,
        /// The parser's complaint.
        source: ParseError,
    },

    /// The synthetic column statement parsed, but into the wrong shape.
    #[error("Type '{raw_type}' did not resolve to a single column: {reason}")]
    ParseMismatch {
        /// The type text as supplied.
        raw_type: String,
        /// What was found instead.
        reason: String,
    },

    /// A tree node could not be rendered.
    #[error("Failed to render statement: {0}")]
    Deparse(#[from] DeparseError),

    /// An error raised while transforming one table edit.
    #[error("Failed to transform {kind} '{table}'")]
    InEdit {
        /// The kind of edit.
        kind: EditKind,
        /// The table the edit targets, schema-qualified when one was given.
        table: String,
        /// The underlying error.
        source: Box<EditError>,
    },

    /// An error raised while transforming one column.
    #[error("Failed to transform column '{column}'")]
    InColumn {
        /// The column name.
        column: String,
        /// The underlying error.
        source: Box<EditError>,
    },

    /// The request failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// IO error (reading a request).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A request document is not valid JSON for the edit model.
    #[error("Invalid request: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EditError {
    /// Wraps this error with the table edit it was raised under.
    #[must_use]
    pub fn in_edit(self, kind: EditKind, table: impl Into<String>) -> Self {
        Self::InEdit {
            kind,
            table: table.into(),
            source: Box::new(self),
        }
    }

    /// Wraps this error with the column it was raised for.
    #[must_use]
    pub fn in_column(self, column: impl Into<String>) -> Self {
        Self::InColumn {
            column: column.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping the context wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::InEdit { source, .. } | Self::InColumn { source, .. } => source.root(),
            _ => self,
        }
    }
}

/// A request that is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A table edit names no table.
    #[error("{kind} requires a table name")]
    EmptyTableName {
        /// The kind of edit.
        kind: EditKind,
    },

    /// A table creation lists no column.
    #[error("Table '{table}' must be created with at least one column")]
    NoColumns {
        /// The table name.
        table: String,
    },

    /// A column, key, or rename source names no column.
    #[error("Table '{table}' has an empty column name")]
    EmptyColumnName {
        /// The table name.
        table: String,
    },

    /// A column has no type text.
    #[error("Column '{table}.{column}' has an empty type")]
    EmptyType {
        /// The table name.
        table: String,
        /// The column name.
        column: String,
    },

    /// A column default is present but blank.
    #[error("Column '{table}.{column}' has an empty default")]
    EmptyDefault {
        /// The table name.
        table: String,
        /// The column name.
        column: String,
    },

    /// A foreign key lists no local column.
    #[error("Foreign key on '{table}' has no columns")]
    EmptyForeignKey {
        /// The table name.
        table: String,
    },

    /// A foreign key's local and referenced column counts differ.
    #[error(
        "Foreign key on '{table}' has {columns} column(s) but references {referenced} column(s)"
    )]
    ForeignKeyArity {
        /// The table name.
        table: String,
        /// Number of local columns.
        columns: usize,
        /// Number of referenced columns.
        referenced: usize,
    },

    /// A foreign key names no referenced table.
    #[error("Foreign key on '{table}' has no referenced table")]
    EmptyReferencedTable {
        /// The table name.
        table: String,
    },

    /// A constraint drop names no constraint.
    #[error("Table '{table}' drops a constraint with an empty name")]
    EmptyConstraintName {
        /// The table name.
        table: String,
    },

    /// A table rename has no target name.
    #[error("Table '{table}' cannot be renamed to an empty name")]
    EmptyRenameTarget {
        /// The table name.
        table: String,
    },
}

/// Result type for schema-edit operations.
pub type Result<T> = std::result::Result<T, EditError>;
