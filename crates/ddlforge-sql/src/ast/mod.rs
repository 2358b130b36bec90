//! Abstract Syntax Tree (AST) types for DDL statements.
//!
//! The node set is closed: every renderer matches it exhaustively.

mod constraint;
mod expression;
mod statement;
mod types;

pub use constraint::{ConstraintDef, ConstraintKind, ForeignRef, MatchType, ReferentialAction};
pub use expression::{BinaryOp, Expr, FunctionCall, Literal, UnaryOp};
pub use statement::{AlterItem, Statement, TableKind, TableRef};
pub use types::{ColumnDef, DataType, IntervalFields};
