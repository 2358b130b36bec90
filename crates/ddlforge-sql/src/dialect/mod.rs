//! SQL Dialect support.
//!
//! A dialect owns both directions of the text boundary: it parses statement
//! text into the tree and renders tree nodes back into statement text.

mod error;
mod postgres;

pub use error::DeparseError;
pub use postgres::{PostgresDialect, POSTGRES_RESERVED_KEYWORDS};

use crate::ast::Statement;
use crate::parser::{ParseError, Parser};

/// Settings that apply while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Schema given to table references written without one.
    pub default_schema: Option<String>,
}

impl ParseContext {
    /// Creates a context that qualifies bare table names with `schema`.
    #[must_use]
    pub fn with_default_schema(schema: impl Into<String>) -> Self {
        Self {
            default_schema: Some(schema.into()),
        }
    }
}

/// Settings that apply while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeparseContext {
    /// Indentation of column and constraint lines inside `CREATE TABLE`.
    pub indent: String,
}

impl DeparseContext {
    /// Creates a context indenting by `width` spaces.
    #[must_use]
    pub fn with_indent_width(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }
}

impl Default for DeparseContext {
    fn default() -> Self {
        Self::with_indent_width(4)
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Parses a semicolon-separated sequence of statements.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if any statement does not parse.
    fn parse(&self, ctx: &ParseContext, sql: &str) -> Result<Vec<Statement>, ParseError> {
        Parser::new(sql)
            .with_default_schema(ctx.default_schema.clone())
            .parse_statements()
    }

    /// Renders one statement as terminated SQL text.
    ///
    /// # Errors
    ///
    /// Returns a `DeparseError` if the statement holds something the dialect
    /// cannot express.
    fn deparse(&self, ctx: &DeparseContext, stmt: &Statement) -> Result<String, DeparseError>;

    /// Renders a name as an identifier, quoted if the dialect would otherwise
    /// read it back differently.
    ///
    /// # Errors
    ///
    /// Returns `DeparseError::EmptyIdentifier` for an empty name.
    fn quote_identifier(&self, name: &str) -> Result<String, DeparseError>;
}
