//! Errors raised while rendering a statement tree.

use thiserror::Error;

/// A tree node the dialect cannot turn into valid SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeparseError {
    /// An identifier is the empty string.
    #[error("Identifier cannot be empty")]
    EmptyIdentifier,

    /// `DROP TABLE` lists no table.
    #[error("DROP TABLE requires at least one table")]
    NoTables,

    /// `CREATE TABLE` has no column.
    #[error("CREATE TABLE requires at least one column")]
    NoColumns,

    /// A key-based constraint has no key column.
    #[error("{kind} constraint requires at least one column")]
    EmptyConstraintKeys {
        /// Constraint kind, e.g. "primary key".
        kind: &'static str,
    },

    /// A `DEFAULT` or `NOT NULL` constraint outside a column definition.
    #[error("{kind} constraint can only be attached to a column")]
    MisplacedDefault {
        /// Constraint kind, e.g. "default".
        kind: &'static str,
    },

    /// A float literal that is NaN or infinite.
    #[error("Float literal must be finite")]
    NonFiniteFloat,
}
