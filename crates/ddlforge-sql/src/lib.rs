//! # ddlforge-sql
//!
//! A PostgreSQL DDL statement tree with a hand-written parser and deparser.
//!
//! This crate provides:
//! - A lexer and a recursive descent parser with Pratt expression parsing
//!   for `CREATE TABLE`, `ALTER TABLE` and `DROP TABLE`
//! - A closed statement tree ([`ast`]) that every renderer matches exhaustively
//! - The [`Dialect`] contract and its PostgreSQL implementation
//!
//! ## Parsing and deparsing
//!
//! ```rust
//! use ddlforge_sql::{DeparseContext, Dialect, ParseContext, PostgresDialect};
//!
//! let pg = PostgresDialect::new();
//! let statements = pg
//!     .parse(&ParseContext::default(), "create table Users (id int4 not null)")
//!     .unwrap();
//! let sql = pg.deparse(&DeparseContext::default(), &statements[0]).unwrap();
//!
//! assert_eq!(sql, "CREATE TABLE users (\n    id INTEGER NOT NULL\n);");
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use ast::{DataType, Expr, Statement};
pub use dialect::{DeparseContext, DeparseError, Dialect, ParseContext, PostgresDialect};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
