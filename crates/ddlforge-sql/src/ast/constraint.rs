//! Constraint definitions shared by column and table level DDL.

use super::{Expr, TableRef};

/// Foreign key `MATCH` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchType {
    /// `MATCH SIMPLE`, the PostgreSQL default.
    #[default]
    Simple,
    /// `MATCH FULL`.
    Full,
    /// `MATCH PARTIAL`.
    Partial,
}

impl MatchType {
    /// Returns the SQL keyword for this match type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
        }
    }
}

/// Action taken on the referencing rows when a referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferentialAction {
    /// `NO ACTION`, the PostgreSQL default.
    #[default]
    NoAction,
    /// `RESTRICT`.
    Restrict,
    /// `CASCADE`.
    Cascade,
    /// `SET NULL`.
    SetNull,
    /// `SET DEFAULT`.
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL keywords for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// The referenced side of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignRef {
    /// Referenced table.
    pub table: TableRef,
    /// Referenced columns, positionally matching the constraint keys.
    pub columns: Vec<String>,
    /// Match type.
    pub match_type: MatchType,
    /// `ON UPDATE` action.
    pub on_update: ReferentialAction,
    /// `ON DELETE` action.
    pub on_delete: ReferentialAction,
}

impl ForeignRef {
    /// Creates a reference with `MATCH SIMPLE` and `NO ACTION` on both
    /// update and delete.
    #[must_use]
    pub fn new(table: TableRef, columns: Vec<String>) -> Self {
        Self {
            table,
            columns,
            match_type: MatchType::Simple,
            on_update: ReferentialAction::NoAction,
            on_delete: ReferentialAction::NoAction,
        }
    }
}

/// What a constraint enforces.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    /// `PRIMARY KEY`.
    Primary,
    /// `FOREIGN KEY ... REFERENCES`.
    Foreign(ForeignRef),
    /// `DEFAULT <expr>`. Only valid attached to a column.
    Default(Expr),
    /// `NOT NULL`. Only valid attached to a column.
    NotNull,
}

impl ConstraintKind {
    /// Short human-readable name, used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Primary => "primary key",
            Self::Foreign(_) => "foreign key",
            Self::Default(_) => "default",
            Self::NotNull => "not null",
        }
    }
}

/// A constraint, either attached to a column or listed on its table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDef {
    /// Constraint name, if any.
    pub name: Option<String>,
    /// Key columns. For column constraints this is the owning column.
    pub keys: Vec<String>,
    /// What the constraint enforces.
    pub kind: ConstraintKind,
}

impl ConstraintDef {
    /// Creates an unnamed constraint.
    #[must_use]
    pub const fn new(keys: Vec<String>, kind: ConstraintKind) -> Self {
        Self {
            name: None,
            keys,
            kind,
        }
    }

    /// Sets the constraint name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `PRIMARY KEY (keys)`.
    #[must_use]
    pub const fn primary_key(keys: Vec<String>) -> Self {
        Self::new(keys, ConstraintKind::Primary)
    }

    /// `FOREIGN KEY (keys) REFERENCES ...`.
    #[must_use]
    pub const fn foreign_key(keys: Vec<String>, reference: ForeignRef) -> Self {
        Self::new(keys, ConstraintKind::Foreign(reference))
    }

    /// `DEFAULT expr` on `column`.
    #[must_use]
    pub fn default_value(column: impl Into<String>, expr: Expr) -> Self {
        Self::new(vec![column.into()], ConstraintKind::Default(expr))
    }

    /// `NOT NULL` on `column`.
    #[must_use]
    pub fn not_null(column: impl Into<String>) -> Self {
        Self::new(vec![column.into()], ConstraintKind::NotNull)
    }
}
