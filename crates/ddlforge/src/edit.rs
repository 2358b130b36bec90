//! Structured table edits.
//!
//! These are the API-level values a caller sends to describe schema changes.
//! Names are plain identifiers: quoting and case handling belong to the
//! dialect that renders the result. All types deserialize from camelCase JSON
//! and every list may be omitted.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EditKind, ValidationError};

/// A batch of table edits, processed category by category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Request {
    /// Tables to create.
    #[serde(rename = "createTableList")]
    pub create_tables: Vec<CreateTableEdit>,
    /// Tables to rename.
    #[serde(rename = "renameTableList")]
    pub rename_tables: Vec<RenameTableEdit>,
    /// Tables to change.
    #[serde(rename = "alterTableList")]
    pub alter_tables: Vec<AlterTableEdit>,
    /// Tables to drop.
    #[serde(rename = "dropTableList")]
    pub drop_tables: Vec<DropTableEdit>,
}

impl Request {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table creation.
    #[must_use]
    pub fn create_table(mut self, edit: CreateTableEdit) -> Self {
        self.create_tables.push(edit);
        self
    }

    /// Adds a table rename.
    #[must_use]
    pub fn rename_table(mut self, edit: RenameTableEdit) -> Self {
        self.rename_tables.push(edit);
        self
    }

    /// Adds a table change.
    #[must_use]
    pub fn alter_table(mut self, edit: AlterTableEdit) -> Self {
        self.alter_tables.push(edit);
        self
    }

    /// Adds a table drop.
    #[must_use]
    pub fn drop_table(mut self, edit: DropTableEdit) -> Self {
        self.drop_tables.push(edit);
        self
    }

    /// Reads a request from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Serialization` when reading fails or the document
    /// does not decode.
    pub fn from_reader<R: Read>(reader: R) -> crate::error::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads a request from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Io` when the file cannot be opened, or
    /// `EditError::Serialization` when it does not decode.
    pub fn from_path(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Returns true when the request holds no edit at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create_tables.is_empty()
            && self.rename_tables.is_empty()
            && self.alter_tables.is_empty()
            && self.drop_tables.is_empty()
    }

    /// Checks that every edit is structurally usable.
    ///
    /// This does not look at type text beyond checking it is non-empty; type
    /// errors surface when the request is deparsed.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, in category order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.create_tables
            .iter()
            .try_for_each(CreateTableEdit::validate)?;
        self.rename_tables
            .iter()
            .try_for_each(RenameTableEdit::validate)?;
        self.alter_tables
            .iter()
            .try_for_each(AlterTableEdit::validate)?;
        self.drop_tables.iter().try_for_each(DropTableEdit::validate)
    }
}

/// A new table with its columns and keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTableEdit {
    /// Schema name, empty for none.
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Columns, in table order.
    #[serde(rename = "addColumnList")]
    pub columns: Vec<AddColumnEdit>,
    /// Primary key columns.
    #[serde(rename = "primaryKeyList")]
    pub primary_key: Option<Vec<String>>,
    /// Foreign keys.
    #[serde(rename = "addForeignKeyList")]
    pub foreign_keys: Vec<AddForeignKeyEdit>,
}

impl CreateTableEdit {
    /// Creates a table edit with no columns.
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: AddColumnEdit) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key columns.
    #[must_use]
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, foreign_key: AddForeignKeyEdit) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Returns the primary key columns, or `None` when absent or empty.
    #[must_use]
    pub fn primary_key_columns(&self) -> Option<&[String]> {
        non_empty_keys(self.primary_key.as_deref())
    }

    /// Returns the table name, qualified with its schema when one is set.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified(&self.schema, &self.name)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_table_name(EditKind::CreateTable, &self.name)?;
        if self.columns.is_empty() {
            return Err(ValidationError::NoColumns {
                table: self.name.clone(),
            });
        }
        for column in &self.columns {
            column.validate(&self.name)?;
        }
        if let Some(keys) = &self.primary_key {
            require_column_names(&self.name, keys)?;
        }
        for foreign_key in &self.foreign_keys {
            foreign_key.validate(&self.name)?;
        }
        Ok(())
    }
}

/// Changes to an existing table.
///
/// Whatever order the lists are given in, the rendered changes always follow
/// the field order below, with each changed column expanding into rename,
/// retype, nullability and default steps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlterTableEdit {
    /// Schema name, empty for none.
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Columns to drop.
    #[serde(rename = "dropColumnList")]
    pub drop_columns: Vec<String>,
    /// Columns to add.
    #[serde(rename = "addColumnList")]
    pub add_columns: Vec<AddColumnEdit>,
    /// Columns to change.
    #[serde(rename = "changeColumnList")]
    pub change_columns: Vec<ChangeColumnEdit>,
    /// Names of primary key constraints to drop.
    #[serde(rename = "dropPrimaryKeyList")]
    pub drop_primary_key_names: Vec<String>,
    /// Columns of a primary key to add.
    #[serde(rename = "primaryKeyList")]
    pub add_primary_key: Option<Vec<String>>,
    /// Names of foreign key constraints to drop.
    #[serde(rename = "dropForeignKeyList")]
    pub drop_foreign_key_names: Vec<String>,
    /// Foreign keys to add.
    #[serde(rename = "addForeignKeyList")]
    pub add_foreign_keys: Vec<AddForeignKeyEdit>,
}

impl AlterTableEdit {
    /// Creates an alter edit that changes nothing yet.
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Drops a column.
    #[must_use]
    pub fn drop_column(mut self, column: impl Into<String>) -> Self {
        self.drop_columns.push(column.into());
        self
    }

    /// Adds a column.
    #[must_use]
    pub fn add_column(mut self, column: AddColumnEdit) -> Self {
        self.add_columns.push(column);
        self
    }

    /// Changes a column.
    #[must_use]
    pub fn change_column(mut self, change: ChangeColumnEdit) -> Self {
        self.change_columns.push(change);
        self
    }

    /// Drops a primary key constraint by name.
    #[must_use]
    pub fn drop_primary_key(mut self, name: impl Into<String>) -> Self {
        self.drop_primary_key_names.push(name.into());
        self
    }

    /// Sets the columns of a primary key to add.
    #[must_use]
    pub fn add_primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_primary_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Drops a foreign key constraint by name.
    #[must_use]
    pub fn drop_foreign_key(mut self, name: impl Into<String>) -> Self {
        self.drop_foreign_key_names.push(name.into());
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn add_foreign_key(mut self, foreign_key: AddForeignKeyEdit) -> Self {
        self.add_foreign_keys.push(foreign_key);
        self
    }

    /// Returns the columns of the primary key to add, or `None` when absent
    /// or empty.
    #[must_use]
    pub fn primary_key_columns(&self) -> Option<&[String]> {
        non_empty_keys(self.add_primary_key.as_deref())
    }

    /// Returns the table name, qualified with its schema when one is set.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified(&self.schema, &self.name)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_table_name(EditKind::AlterTable, &self.name)?;
        require_column_names(&self.name, &self.drop_columns)?;
        for column in &self.add_columns {
            column.validate(&self.name)?;
        }
        for change in &self.change_columns {
            change.validate(&self.name)?;
        }
        if let Some(keys) = &self.add_primary_key {
            require_column_names(&self.name, keys)?;
        }
        let dropped = self
            .drop_primary_key_names
            .iter()
            .chain(&self.drop_foreign_key_names);
        for name in dropped {
            if name.is_empty() {
                return Err(ValidationError::EmptyConstraintName {
                    table: self.name.clone(),
                });
            }
        }
        for foreign_key in &self.add_foreign_keys {
            foreign_key.validate(&self.name)?;
        }
        Ok(())
    }
}

/// A table rename.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenameTableEdit {
    /// Schema name, empty for none.
    pub schema: String,
    /// Current table name.
    pub old_name: String,
    /// Table name after the rename.
    pub new_name: String,
}

impl RenameTableEdit {
    /// Creates a rename edit.
    #[must_use]
    pub fn new(
        schema: impl Into<String>,
        old_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    /// Returns the current table name, qualified with its schema when one is
    /// set.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified(&self.schema, &self.old_name)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_table_name(EditKind::RenameTable, &self.old_name)?;
        if self.new_name.is_empty() {
            return Err(ValidationError::EmptyRenameTarget {
                table: self.old_name.clone(),
            });
        }
        Ok(())
    }
}

/// A table drop.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DropTableEdit {
    /// Schema name, empty for none.
    pub schema: String,
    /// Table name.
    pub name: String,
}

impl DropTableEdit {
    /// Creates a drop edit.
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Returns the table name, qualified with its schema when one is set.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified(&self.schema, &self.name)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_table_name(EditKind::DropTable, &self.name)
    }
}

/// A column to add, either in a new table or an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddColumnEdit {
    /// Column name.
    pub name: String,
    /// Type text, in any spelling the parser accepts.
    #[serde(rename = "type")]
    pub raw_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Default expression text, used verbatim.
    pub default: Option<String>,
    /// Column comment; empty means none.
    pub comment: Option<String>,
}

impl AddColumnEdit {
    /// Creates a NOT NULL column with no default and no comment.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            ..Self::default()
        }
    }

    /// Sets whether the column accepts NULL.
    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the default expression.
    #[must_use]
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns the comment unless it is absent or empty.
    #[must_use]
    pub fn comment_text(&self) -> Option<&str> {
        non_empty(self.comment.as_deref())
    }

    fn validate(&self, table: &str) -> Result<(), ValidationError> {
        require_column_name(table, &self.name)?;
        require_type(table, &self.name, &self.raw_type)?;
        require_default(table, &self.name, self.default.as_deref())
    }
}

/// A change to an existing column.
///
/// Type, nullability and default are always restated: the change sets all
/// three, whether or not they differ from the current column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeColumnEdit {
    /// Current column name.
    pub old_name: String,
    /// Column name after the change; equal to `old_name` for no rename.
    pub new_name: String,
    /// Type text, in any spelling the parser accepts.
    #[serde(rename = "type")]
    pub raw_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Default expression text; `None` drops the default.
    pub default: Option<String>,
    /// Column comment; empty means none.
    pub comment: Option<String>,
}

impl ChangeColumnEdit {
    /// Creates a change that keeps the column name.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            old_name: name.clone(),
            new_name: name,
            raw_type: raw_type.into(),
            ..Self::default()
        }
    }

    /// Renames the column.
    #[must_use]
    pub fn rename_to(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = new_name.into();
        self
    }

    /// Sets whether the column accepts NULL.
    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the default expression.
    #[must_use]
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns true when the change renames the column.
    #[must_use]
    pub fn is_rename(&self) -> bool {
        self.old_name != self.new_name
    }

    /// Returns the comment unless it is absent or empty.
    #[must_use]
    pub fn comment_text(&self) -> Option<&str> {
        non_empty(self.comment.as_deref())
    }

    fn validate(&self, table: &str) -> Result<(), ValidationError> {
        require_column_name(table, &self.old_name)?;
        require_column_name(table, &self.new_name)?;
        require_type(table, &self.new_name, &self.raw_type)?;
        require_default(table, &self.new_name, self.default.as_deref())
    }
}

/// A foreign key to add.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddForeignKeyEdit {
    /// Local columns.
    #[serde(rename = "columnList")]
    pub columns: Vec<String>,
    /// Schema of the referenced table, empty for none.
    pub referenced_schema: String,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns, matched to `columns` by position.
    #[serde(rename = "referencedColumnList")]
    pub referenced_columns: Vec<String>,
}

impl AddForeignKeyEdit {
    /// Creates a foreign key from local columns to a referenced table.
    #[must_use]
    pub fn new<I, S>(
        columns: I,
        referenced_schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            referenced_schema: referenced_schema.into(),
            referenced_table: table.into(),
            referenced_columns: Vec::new(),
        }
    }

    /// Sets the referenced columns.
    #[must_use]
    pub fn references<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    fn validate(&self, table: &str) -> Result<(), ValidationError> {
        if self.columns.is_empty() {
            return Err(ValidationError::EmptyForeignKey {
                table: table.to_string(),
            });
        }
        require_column_names(table, &self.columns)?;
        if self.referenced_table.is_empty() {
            return Err(ValidationError::EmptyReferencedTable {
                table: table.to_string(),
            });
        }
        if self.referenced_columns.len() != self.columns.len() {
            return Err(ValidationError::ForeignKeyArity {
                table: table.to_string(),
                columns: self.columns.len(),
                referenced: self.referenced_columns.len(),
            });
        }
        require_column_names(table, &self.referenced_columns)
    }
}

pub(crate) fn qualified(schema: &str, name: &str) -> String {
    if schema.is_empty() {
        name.to_string()
    } else {
        format!("{schema}.{name}")
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

fn non_empty_keys(keys: Option<&[String]>) -> Option<&[String]> {
    keys.filter(|k| !k.is_empty())
}

fn require_table_name(kind: EditKind, name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyTableName { kind });
    }
    Ok(())
}

fn require_column_name(table: &str, column: &str) -> Result<(), ValidationError> {
    if column.is_empty() {
        return Err(ValidationError::EmptyColumnName {
            table: table.to_string(),
        });
    }
    Ok(())
}

fn require_column_names(table: &str, columns: &[String]) -> Result<(), ValidationError> {
    columns
        .iter()
        .try_for_each(|column| require_column_name(table, column))
}

fn require_type(table: &str, column: &str, raw_type: &str) -> Result<(), ValidationError> {
    if raw_type.trim().is_empty() {
        return Err(ValidationError::EmptyType {
            table: table.to_string(),
            column: column.to_string(),
        });
    }
    Ok(())
}

/// A default, when given, must have expression text: `None` is how a
/// request asks for no default.
fn require_default(
    table: &str,
    column: &str,
    default: Option<&str>,
) -> Result<(), ValidationError> {
    if default.is_some_and(|text| text.trim().is_empty()) {
        return Err(ValidationError::EmptyDefault {
            table: table.to_string(),
            column: column.to_string(),
        });
    }
    Ok(())
}
