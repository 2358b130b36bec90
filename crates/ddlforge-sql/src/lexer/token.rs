//! Token types for the SQL lexer.

use super::Span;

/// SQL keywords recognised by the DDL grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Statements
    Create,
    Alter,
    Drop,
    Table,
    Add,
    Column,
    Rename,
    To,
    Type,
    Data,
    Set,
    If,
    Exists,

    // Constraints
    Constraint,
    Primary,
    Key,
    Foreign,
    References,
    Unique,
    Check,
    Default,
    Not,
    Null,
    Match,
    Simple,
    Full,
    Partial,
    On,
    Update,
    Delete,
    No,
    Action,
    Restrict,
    Cascade,

    // Expressions
    And,
    Or,
    In,
    Between,
    Like,
    Is,
    True,
    False,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    As,
    Coalesce,
    Nullif,
    Array,

    // Data types
    Int,
    Integer,
    Smallint,
    Bigint,
    Real,
    Double,
    Precision,
    Float,
    Decimal,
    Numeric,
    Char,
    Character,
    Varchar,
    Varying,
    Text,
    Boolean,
    Date,
    Time,
    Timestamp,
    Interval,
    With,
    Without,
    Zone,
    Collate,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let kw = match s.to_ascii_uppercase().as_str() {
            "CREATE" => Self::Create,
            "ALTER" => Self::Alter,
            "DROP" => Self::Drop,
            "TABLE" => Self::Table,
            "ADD" => Self::Add,
            "COLUMN" => Self::Column,
            "RENAME" => Self::Rename,
            "TO" => Self::To,
            "TYPE" => Self::Type,
            "DATA" => Self::Data,
            "SET" => Self::Set,
            "IF" => Self::If,
            "EXISTS" => Self::Exists,
            "CONSTRAINT" => Self::Constraint,
            "PRIMARY" => Self::Primary,
            "KEY" => Self::Key,
            "FOREIGN" => Self::Foreign,
            "REFERENCES" => Self::References,
            "UNIQUE" => Self::Unique,
            "CHECK" => Self::Check,
            "DEFAULT" => Self::Default,
            "NOT" => Self::Not,
            "NULL" => Self::Null,
            "MATCH" => Self::Match,
            "SIMPLE" => Self::Simple,
            "FULL" => Self::Full,
            "PARTIAL" => Self::Partial,
            "ON" => Self::On,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            "NO" => Self::No,
            "ACTION" => Self::Action,
            "RESTRICT" => Self::Restrict,
            "CASCADE" => Self::Cascade,
            "AND" => Self::And,
            "OR" => Self::Or,
            "IN" => Self::In,
            "BETWEEN" => Self::Between,
            "LIKE" => Self::Like,
            "IS" => Self::Is,
            "TRUE" => Self::True,
            "FALSE" => Self::False,
            "CASE" => Self::Case,
            "WHEN" => Self::When,
            "THEN" => Self::Then,
            "ELSE" => Self::Else,
            "END" => Self::End,
            "CAST" => Self::Cast,
            "AS" => Self::As,
            "COALESCE" => Self::Coalesce,
            "NULLIF" => Self::Nullif,
            "ARRAY" => Self::Array,
            "INT" => Self::Int,
            "INTEGER" => Self::Integer,
            "SMALLINT" => Self::Smallint,
            "BIGINT" => Self::Bigint,
            "REAL" => Self::Real,
            "DOUBLE" => Self::Double,
            "PRECISION" => Self::Precision,
            "FLOAT" => Self::Float,
            "DECIMAL" => Self::Decimal,
            "NUMERIC" => Self::Numeric,
            "CHAR" => Self::Char,
            "CHARACTER" => Self::Character,
            "VARCHAR" => Self::Varchar,
            "VARYING" => Self::Varying,
            "TEXT" => Self::Text,
            "BOOLEAN" => Self::Boolean,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "INTERVAL" => Self::Interval,
            "WITH" => Self::With,
            "WITHOUT" => Self::Without,
            "ZONE" => Self::Zone,
            "COLLATE" => Self::Collate,
            _ => return None,
        };
        Some(kw)
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Drop => "DROP",
            Self::Table => "TABLE",
            Self::Add => "ADD",
            Self::Column => "COLUMN",
            Self::Rename => "RENAME",
            Self::To => "TO",
            Self::Type => "TYPE",
            Self::Data => "DATA",
            Self::Set => "SET",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::Constraint => "CONSTRAINT",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::Default => "DEFAULT",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::Match => "MATCH",
            Self::Simple => "SIMPLE",
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::On => "ON",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::No => "NO",
            Self::Action => "ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Is => "IS",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
            Self::As => "AS",
            Self::Coalesce => "COALESCE",
            Self::Nullif => "NULLIF",
            Self::Array => "ARRAY",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::Smallint => "SMALLINT",
            Self::Bigint => "BIGINT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Precision => "PRECISION",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Char => "CHAR",
            Self::Character => "CHARACTER",
            Self::Varchar => "VARCHAR",
            Self::Varying => "VARYING",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Interval => "INTERVAL",
            Self::With => "WITH",
            Self::Without => "WITHOUT",
            Self::Zone => "ZONE",
            Self::Collate => "COLLATE",
        }
    }

    /// Returns true if the keyword can never be used as a bare identifier.
    ///
    /// Everything else may also name a table, column or constraint, as
    /// `CREATE TABLE t (date date, type text)` is valid PostgreSQL.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::Table
                | Self::Column
                | Self::To
                | Self::Constraint
                | Self::Primary
                | Self::Foreign
                | Self::References
                | Self::Unique
                | Self::Check
                | Self::Default
                | Self::Not
                | Self::Null
                | Self::On
                | Self::And
                | Self::Or
                | Self::In
                | Self::True
                | Self::False
                | Self::Case
                | Self::When
                | Self::Then
                | Self::Else
                | Self::End
                | Self::Cast
                | Self::As
                | Self::Array
                | Self::With
                | Self::Collate
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14)
    Float(f64),
    /// String literal (e.g., 'hello')
    String(String),

    // Identifiers and keywords
    /// Bare identifier, as written in the source.
    Identifier(String),
    /// Double-quoted identifier, with the quotes removed and `""` unescaped.
    QuotedIdentifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ::
    DoubleColon,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("CREATE"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("create"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("VaRyInG"), Some(Keyword::Varying));
        assert_eq!(Keyword::from_str("int4"), None);
    }

    #[test]
    fn test_keyword_as_str_round_trips() {
        for kw in [Keyword::Alter, Keyword::References, Keyword::Zone] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_reserved_keywords() {
        assert!(Keyword::Table.is_reserved());
        assert!(Keyword::Default.is_reserved());
        assert!(!Keyword::Date.is_reserved());
        assert!(!Keyword::Type.is_reserved());
        assert!(!Keyword::Key.is_reserved());
    }

    #[test]
    fn test_token_as_keyword() {
        let create = Token::new(TokenKind::Keyword(Keyword::Create), Span::new(0, 6));
        let plus = Token::new(TokenKind::Plus, Span::new(0, 1));
        assert_eq!(create.as_keyword(), Some(Keyword::Create));
        assert_eq!(plus.as_keyword(), None);
        assert!(Token::new(TokenKind::Eof, Span::at(0)).is_eof());
    }
}
