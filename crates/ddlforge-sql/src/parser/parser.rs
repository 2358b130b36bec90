//! SQL Parser implementation.

use super::error::ParseError;
use super::pratt::{
    infix_binding_power, postfix_binding_power, prefix_binding_power, token_to_binary_op,
    token_to_unary_op,
};
use crate::ast::{
    AlterItem, ColumnDef, ConstraintDef, ConstraintKind, DataType, Expr, ForeignRef,
    FunctionCall, IntervalFields, Literal, MatchType, ReferentialAction, Statement, TableKind,
    TableRef,
};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Parameterless SQL value functions, written without parentheses.
const SQL_VALUE_FUNCTIONS: &[&str] = &[
    "current_catalog",
    "current_date",
    "current_role",
    "current_schema",
    "current_time",
    "current_timestamp",
    "current_user",
    "localtime",
    "localtimestamp",
    "session_user",
    "system_user",
    "user",
];

/// Field names of an interval restriction, outermost first.
const INTERVAL_FIELDS: &[&str] = &["year", "month", "day", "hour", "minute", "second"];

/// Maps PostgreSQL type names that the lexer sees as plain identifiers onto
/// their canonical node.
fn type_alias(name: &str) -> Option<DataType> {
    let data_type = match name {
        "int2" => DataType::Smallint,
        "int4" => DataType::Integer,
        "int8" => DataType::Bigint,
        "float4" => DataType::Real,
        "float8" => DataType::Double,
        "bool" => DataType::Boolean,
        "bytea" => DataType::Bytea,
        "json" => DataType::Json,
        "jsonb" => DataType::Jsonb,
        "uuid" => DataType::Uuid,
        "smallserial" | "serial2" => DataType::Smallserial,
        "serial" | "serial4" => DataType::Serial,
        "bigserial" | "serial8" => DataType::Bigserial,
        "timetz" => DataType::Time {
            precision: None,
            with_time_zone: true,
        },
        "timestamptz" => DataType::timestamptz(),
        _ => return None,
    };
    Some(data_type)
}

/// SQL Parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// Schema given to table references written without one.
    default_schema: Option<String>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            default_schema: None,
        }
    }

    /// Sets the schema that unqualified table references receive.
    #[must_use]
    pub fn with_default_schema(mut self, schema: Option<String>) -> Self {
        self.default_schema = schema.filter(|s| !s.is_empty());
        self
    }

    /// Parses a semicolon-separated sequence of statements up to the end of
    /// the input. Empty statements (stray semicolons) are skipped.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` at the first statement that does not parse.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![];
        loop {
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
            if self.current.is_eof() {
                break;
            }

            statements.push(self.parse_statement()?);

            if self.check(&TokenKind::Semicolon) {
                self.advance();
            } else if !self.current.is_eof() {
                return Err(self.error_expected("';' or end of input"));
            }
        }
        Ok(statements)
    }

    /// Parses a single SQL statement.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid DDL statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Create) => self.parse_create_table(),
            TokenKind::Keyword(Keyword::Alter) => self.parse_alter_table(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop_table(),
            _ => Err(self.error_expected("CREATE, ALTER, or DROP")),
        }
    }

    /// Parses `CREATE TABLE name ( element, ... )`.
    fn parse_create_table(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_table_name()?;

        self.expect(&TokenKind::LeftParen)?;
        let mut columns = vec![];
        let mut constraints = vec![];
        if !self.check(&TokenKind::RightParen) {
            loop {
                if self.at_table_constraint() {
                    constraints.push(self.parse_table_constraint()?);
                } else {
                    columns.push(self.parse_column_def()?);
                }
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.expect(&TokenKind::RightParen)?;

        Ok(Statement::CreateTable {
            table,
            columns,
            constraints,
        })
    }

    /// Parses `ALTER TABLE name item, ...`.
    fn parse_alter_table(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_table_name()?;

        let mut items = vec![];
        loop {
            items.push(self.parse_alter_item()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(Statement::AlterTable { table, items })
    }

    /// Parses one `ALTER TABLE` sub-command.
    fn parse_alter_item(&mut self) -> Result<AlterItem, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Add) => {
                self.advance();
                if self.at_table_constraint() {
                    return Ok(AlterItem::AddConstraint {
                        constraint: self.parse_table_constraint()?,
                    });
                }
                self.skip_keyword(Keyword::Column);
                let column = self.parse_column_def()?;
                Ok(AlterItem::AddColumnList {
                    columns: vec![column],
                })
            }
            TokenKind::Keyword(Keyword::Drop) => {
                self.advance();
                if self.skip_keyword(Keyword::Constraint) {
                    let if_exists = self.parse_if_exists()?;
                    let name = self.expect_identifier()?;
                    return Ok(AlterItem::DropConstraint { name, if_exists });
                }
                self.skip_keyword(Keyword::Column);
                let column = self.expect_identifier()?;
                Ok(AlterItem::DropColumn { column })
            }
            TokenKind::Keyword(Keyword::Rename) => {
                self.advance();
                if self.skip_keyword(Keyword::To) {
                    let new_name = self.expect_identifier()?;
                    return Ok(AlterItem::RenameTable { new_name });
                }
                self.skip_keyword(Keyword::Column);
                let from = self.expect_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let to = self.expect_identifier()?;
                Ok(AlterItem::RenameColumn { from, to })
            }
            TokenKind::Keyword(Keyword::Alter) => {
                self.advance();
                self.skip_keyword(Keyword::Column);
                let column = self.expect_identifier()?;
                self.parse_alter_column(column)
            }
            _ => Err(self.error_expected("ADD, DROP, RENAME, or ALTER")),
        }
    }

    /// Parses the action of `ALTER [COLUMN] column ...`.
    fn parse_alter_column(&mut self, column: String) -> Result<AlterItem, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Type) => {
                self.advance();
                let data_type = self.parse_column_type()?;
                Ok(AlterItem::AlterColumnType { column, data_type })
            }
            TokenKind::Keyword(Keyword::Set) => {
                self.advance();
                if self.skip_keyword(Keyword::Not) {
                    self.expect_keyword(Keyword::Null)?;
                    Ok(AlterItem::SetNotNull { column })
                } else if self.skip_keyword(Keyword::Default) {
                    let expr = self.parse_expression(0)?;
                    Ok(AlterItem::SetDefault { column, expr })
                } else if self.skip_keyword(Keyword::Data) {
                    self.expect_keyword(Keyword::Type)?;
                    let data_type = self.parse_column_type()?;
                    Ok(AlterItem::AlterColumnType { column, data_type })
                } else {
                    Err(self.error_expected("NOT NULL, DEFAULT, or DATA TYPE"))
                }
            }
            TokenKind::Keyword(Keyword::Drop) => {
                self.advance();
                if self.skip_keyword(Keyword::Not) {
                    self.expect_keyword(Keyword::Null)?;
                    Ok(AlterItem::DropNotNull { column })
                } else if self.skip_keyword(Keyword::Default) {
                    Ok(AlterItem::DropDefault { column })
                } else {
                    Err(self.error_expected("NOT NULL or DEFAULT"))
                }
            }
            _ => Err(self.error_expected("TYPE, SET, or DROP")),
        }
    }

    /// Parses `DROP TABLE [IF EXISTS] name, ...`.
    fn parse_drop_table(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Table)?;
        let if_exists = self.parse_if_exists()?;

        let mut tables = vec![];
        loop {
            tables.push(self.parse_table_name()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(Statement::DropTable { if_exists, tables })
    }

    /// Parses an optional `IF EXISTS`.
    fn parse_if_exists(&mut self) -> Result<bool, ParseError> {
        if self.skip_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses a table name, `[schema.]name`.
    fn parse_table_name(&mut self) -> Result<TableRef, ParseError> {
        let first = self.expect_identifier()?;
        let (schema, name) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.expect_identifier()?)
        } else {
            (self.default_schema.clone(), first)
        };
        Ok(TableRef {
            schema,
            name,
            kind: TableKind::BaseTable,
        })
    }

    /// Parses a column definition: name, type, then column constraints.
    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_column_type()?;
        let mut constraints = vec![];

        loop {
            let constraint_name = if self.skip_keyword(Keyword::Constraint) {
                Some(self.expect_identifier()?)
            } else {
                None
            };

            let kind = match &self.current.kind {
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    ConstraintKind::NotNull
                }
                // Explicit nullability is the default and leaves no node.
                TokenKind::Keyword(Keyword::Null) => {
                    self.advance();
                    continue;
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    ConstraintKind::Default(self.parse_expression(0)?)
                }
                TokenKind::Keyword(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    ConstraintKind::Primary
                }
                TokenKind::Keyword(Keyword::References) => {
                    ConstraintKind::Foreign(self.parse_references()?)
                }
                TokenKind::Keyword(Keyword::Unique) => {
                    return Err(ParseError::unsupported("UNIQUE constraint", self.current.span));
                }
                TokenKind::Keyword(Keyword::Check) => {
                    return Err(ParseError::unsupported("CHECK constraint", self.current.span));
                }
                _ if constraint_name.is_some() => {
                    return Err(self.error_expected("column constraint"));
                }
                _ => break,
            };

            constraints.push(ConstraintDef {
                name: constraint_name,
                keys: vec![name.clone()],
                kind,
            });
        }

        Ok(ColumnDef {
            name,
            data_type,
            constraints,
        })
    }

    /// Returns true if the current token starts a table constraint.
    fn at_table_constraint(&self) -> bool {
        matches!(
            self.current.as_keyword(),
            Some(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Foreign
                    | Keyword::Unique
                    | Keyword::Check
            )
        )
    }

    /// Parses `[CONSTRAINT name] PRIMARY KEY (cols) | FOREIGN KEY (cols) REFERENCES ...`.
    fn parse_table_constraint(&mut self) -> Result<ConstraintDef, ParseError> {
        let name = if self.skip_keyword(Keyword::Constraint) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let (keys, kind) = match &self.current.kind {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                (self.parse_paren_identifier_list()?, ConstraintKind::Primary)
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let keys = self.parse_paren_identifier_list()?;
                (keys, ConstraintKind::Foreign(self.parse_references()?))
            }
            TokenKind::Keyword(Keyword::Unique) => {
                return Err(ParseError::unsupported("UNIQUE constraint", self.current.span));
            }
            TokenKind::Keyword(Keyword::Check) => {
                return Err(ParseError::unsupported("CHECK constraint", self.current.span));
            }
            _ => return Err(self.error_expected("PRIMARY KEY or FOREIGN KEY")),
        };

        Ok(ConstraintDef { name, keys, kind })
    }

    /// Parses `REFERENCES table [(cols)]` and its match and action clauses.
    fn parse_references(&mut self) -> Result<ForeignRef, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_table_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_identifier_list()?
        } else {
            vec![]
        };

        let mut reference = ForeignRef::new(table, columns);
        loop {
            if self.skip_keyword(Keyword::Match) {
                reference.match_type = match self.current.as_keyword() {
                    Some(Keyword::Simple) => MatchType::Simple,
                    Some(Keyword::Full) => MatchType::Full,
                    Some(Keyword::Partial) => MatchType::Partial,
                    _ => return Err(self.error_expected("SIMPLE, FULL, or PARTIAL")),
                };
                self.advance();
            } else if self.skip_keyword(Keyword::On) {
                if self.skip_keyword(Keyword::Delete) {
                    reference.on_delete = self.parse_referential_action()?;
                } else if self.skip_keyword(Keyword::Update) {
                    reference.on_update = self.parse_referential_action()?;
                } else {
                    return Err(self.error_expected("DELETE or UPDATE"));
                }
            } else {
                break;
            }
        }

        Ok(reference)
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        if self.skip_keyword(Keyword::No) {
            self.expect_keyword(Keyword::Action)?;
            Ok(ReferentialAction::NoAction)
        } else if self.skip_keyword(Keyword::Restrict) {
            Ok(ReferentialAction::Restrict)
        } else if self.skip_keyword(Keyword::Cascade) {
            Ok(ReferentialAction::Cascade)
        } else if self.skip_keyword(Keyword::Set) {
            if self.skip_keyword(Keyword::Null) {
                Ok(ReferentialAction::SetNull)
            } else if self.skip_keyword(Keyword::Default) {
                Ok(ReferentialAction::SetDefault)
            } else {
                Err(self.error_expected("NULL or DEFAULT"))
            }
        } else {
            Err(self.error_expected("referential action"))
        }
    }

    /// Parses an expression using Pratt parsing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        // Parse prefix (primary expression or unary operator)
        let mut lhs = self.parse_prefix()?;

        loop {
            // Postfix `::type` casts bind tighter than anything else.
            if let Some(bp) = postfix_binding_power(&self.current.kind) {
                if bp < min_bp {
                    break;
                }
                self.advance();
                lhs = lhs.type_cast(self.parse_data_type()?);
                continue;
            }

            let Some((l_bp, r_bp)) = infix_binding_power(&self.current.kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            // Handle special infix operators
            match &self.current.kind {
                TokenKind::Keyword(Keyword::Is) => {
                    self.advance();
                    let negated = self.skip_keyword(Keyword::Not);
                    self.expect_keyword(Keyword::Null)?;
                    lhs = Expr::IsNull {
                        expr: Box::new(lhs),
                        negated,
                    };
                }
                TokenKind::Keyword(Keyword::In) => {
                    self.advance();
                    self.expect(&TokenKind::LeftParen)?;
                    let list = self.parse_expression_list()?;
                    self.expect(&TokenKind::RightParen)?;
                    lhs = Expr::In {
                        expr: Box::new(lhs),
                        list,
                        negated: false,
                    };
                }
                TokenKind::Keyword(Keyword::Between) => {
                    self.advance();
                    let low = self.parse_expression(r_bp)?;
                    self.expect_keyword(Keyword::And)?;
                    let high = self.parse_expression(r_bp)?;
                    lhs = Expr::Between {
                        expr: Box::new(lhs),
                        low: Box::new(low),
                        high: Box::new(high),
                        negated: false,
                    };
                }
                _ => {
                    // Standard binary operator
                    let Some(op) = token_to_binary_op(&self.current.kind) else {
                        break;
                    };
                    self.advance();
                    let rhs = self.parse_expression(r_bp)?;
                    lhs = lhs.binary(op, rhs);
                }
            }
        }

        Ok(lhs)
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = token_to_unary_op(&self.current.kind) {
            let bp = prefix_binding_power(&self.current.kind).unwrap_or(15);
            self.advance();
            let operand = self.parse_expression(bp)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match &self.current.kind {
            // Literals
            TokenKind::Integer(n) => {
                let value = *n;
                self.advance();
                Ok(Expr::Literal(Literal::Integer(value)))
            }
            TokenKind::Float(f) => {
                let value = *f;
                self.advance();
                Ok(Expr::Literal(Literal::Float(value)))
            }
            TokenKind::String(s) => {
                let value = s.clone();
                self.advance();
                Ok(Expr::Literal(Literal::String(value)))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::boolean(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::boolean(false))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::null())
            }

            // Parenthesized expression
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression(0)?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Paren(Box::new(expr)))
            }

            TokenKind::Keyword(Keyword::Cast) => {
                self.advance();
                self.parse_cast_expression()
            }

            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),

            // `current_timestamp` and friends are keywords to PostgreSQL,
            // not column references.
            TokenKind::Identifier(name)
                if SQL_VALUE_FUNCTIONS.contains(&name.to_ascii_lowercase().as_str())
                    && self.peek_kind() != TokenKind::LeftParen =>
            {
                let text = name.to_ascii_lowercase();
                self.advance();
                Ok(Expr::Raw(text))
            }

            // Identifier (column reference or function call)
            kind => {
                let Some(name) = identifier_name(kind) else {
                    return Err(self.error_expected("expression"));
                };
                self.advance();

                if self.check(&TokenKind::LeftParen) {
                    return self.parse_function_call(name);
                }

                if self.check(&TokenKind::Dot) {
                    self.advance();
                    let column = self.expect_identifier()?;
                    return Ok(Expr::Column {
                        table: Some(name),
                        name: column,
                    });
                }

                Ok(Expr::Column { table: None, name })
            }
        }
    }

    /// Parses a function call.
    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_expression_list()?
        };
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Function(FunctionCall { name, args }))
    }

    /// Parses a CAST expression.
    fn parse_cast_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// Parses a CASE expression.
    fn parse_case_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        // Check for simple CASE (CASE expr WHEN ...)
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression(0)?))
        };

        let mut when_clauses = vec![];
        while self.skip_keyword(Keyword::When) {
            let when_expr = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let then_expr = self.parse_expression(0)?;
            when_clauses.push((when_expr, then_expr));
        }
        if when_clauses.is_empty() {
            return Err(self.error_expected("WHEN"));
        }

        let else_clause = if self.skip_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    /// Parses a column type: a data type with an optional trailing
    /// `COLLATE [schema.]name`.
    fn parse_column_type(&mut self) -> Result<DataType, ParseError> {
        let data_type = self.parse_data_type()?;
        if !self.skip_keyword(Keyword::Collate) {
            return Ok(data_type);
        }

        let first = self.expect_identifier()?;
        let (schema, collation) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.expect_identifier()?)
        } else {
            (None, first)
        };
        Ok(DataType::Collated {
            data_type: Box::new(data_type),
            schema,
            collation,
        })
    }

    /// Parses a data type with any trailing array suffixes.
    pub(crate) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let mut data_type = self.parse_base_type()?;

        loop {
            if self.check(&TokenKind::LeftBracket) {
                self.advance();
                self.parse_array_bound()?;
                data_type = data_type.array();
            } else if self.skip_keyword(Keyword::Array) {
                if self.check(&TokenKind::LeftBracket) {
                    self.advance();
                    self.parse_array_bound()?;
                }
                data_type = data_type.array();
                // PostgreSQL allows a single ARRAY keyword per type.
                break;
            } else {
                break;
            }
        }

        Ok(data_type)
    }

    /// Consumes `[n]` or `]` after an opening bracket. The size is not kept.
    fn parse_array_bound(&mut self) -> Result<(), ParseError> {
        if matches!(self.current.kind, TokenKind::Integer(_)) {
            self.expect_integer::<u32>("array size")?;
        }
        self.expect(&TokenKind::RightBracket)
    }

    /// Parses a type name without array suffixes.
    fn parse_base_type(&mut self) -> Result<DataType, ParseError> {
        let data_type = match &self.current.kind {
            TokenKind::Keyword(Keyword::Int | Keyword::Integer) => {
                self.advance();
                DataType::Integer
            }
            TokenKind::Keyword(Keyword::Smallint) => {
                self.advance();
                DataType::Smallint
            }
            TokenKind::Keyword(Keyword::Bigint) => {
                self.advance();
                DataType::Bigint
            }
            TokenKind::Keyword(Keyword::Real) => {
                self.advance();
                DataType::Real
            }
            TokenKind::Keyword(Keyword::Double) => {
                self.advance();
                self.expect_keyword(Keyword::Precision)?;
                DataType::Double
            }
            TokenKind::Keyword(Keyword::Float) => {
                self.advance();
                self.parse_float_precision()?
            }
            TokenKind::Keyword(Keyword::Decimal) => {
                self.advance();
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal { precision, scale }
            }
            TokenKind::Keyword(Keyword::Numeric) => {
                self.advance();
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Numeric { precision, scale }
            }
            TokenKind::Keyword(Keyword::Char | Keyword::Character) => {
                self.advance();
                self.parse_character_type()?
            }
            TokenKind::Keyword(Keyword::Varchar) => {
                self.advance();
                DataType::Varchar(self.parse_optional_length()?)
            }
            TokenKind::Keyword(Keyword::Text) => {
                self.advance();
                DataType::Text
            }
            TokenKind::Keyword(Keyword::Boolean) => {
                self.advance();
                DataType::Boolean
            }
            TokenKind::Keyword(Keyword::Date) => {
                self.advance();
                DataType::Date
            }
            TokenKind::Keyword(Keyword::Interval) => {
                self.advance();
                self.parse_interval()?
            }
            TokenKind::Keyword(Keyword::Time) => {
                self.advance();
                let precision = self.parse_optional_precision()?;
                let with_time_zone = self.parse_time_zone()?;
                DataType::Time {
                    precision,
                    with_time_zone,
                }
            }
            TokenKind::Keyword(Keyword::Timestamp) => {
                self.advance();
                let precision = self.parse_optional_precision()?;
                let with_time_zone = self.parse_time_zone()?;
                DataType::Timestamp {
                    precision,
                    with_time_zone,
                }
            }
            TokenKind::Identifier(name) if self.peek_kind() != TokenKind::Dot => {
                let folded = name.to_ascii_lowercase();
                match folded.as_str() {
                    "bit" => {
                        self.advance();
                        if self.skip_keyword(Keyword::Varying) {
                            DataType::Varbit(self.parse_optional_length()?)
                        } else {
                            DataType::Bit(self.parse_optional_length()?)
                        }
                    }
                    "varbit" => {
                        self.advance();
                        DataType::Varbit(self.parse_optional_length()?)
                    }
                    "national" => {
                        self.advance();
                        if !self.skip_keyword(Keyword::Character) {
                            self.expect_keyword(Keyword::Char)?;
                        }
                        self.parse_character_type()?
                    }
                    "nchar" => {
                        self.advance();
                        self.parse_character_type()?
                    }
                    _ => match type_alias(&folded) {
                        Some(mut data_type) => {
                            self.advance();
                            if let DataType::Time { precision, .. }
                            | DataType::Timestamp { precision, .. } = &mut data_type
                            {
                                *precision = self.parse_optional_precision()?;
                            }
                            data_type
                        }
                        None => self.parse_custom_type()?,
                    },
                }
            }
            _ => self.parse_custom_type()?,
        };

        Ok(data_type)
    }

    /// Returns the kind of the token after the current one.
    fn peek_kind(&self) -> TokenKind {
        self.lexer.clone().next_token().kind
    }

    /// Parses `[schema.]name [(modifier, ...)]` as a user-defined type.
    fn parse_custom_type(&mut self) -> Result<DataType, ParseError> {
        let Some(first) = identifier_name(&self.current.kind) else {
            return Err(self.error_expected("data type"));
        };
        self.advance();

        let (schema, name) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.expect_identifier()?)
        } else {
            (None, first)
        };

        let mut modifiers = vec![];
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            loop {
                modifiers.push(self.expect_integer::<i64>("type modifier")?);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            self.expect(&TokenKind::RightParen)?;
        }

        Ok(DataType::Custom {
            schema,
            name,
            modifiers,
        })
    }

    /// Parses the rest of `char [varying] [(n)]` after the leading word.
    fn parse_character_type(&mut self) -> Result<DataType, ParseError> {
        if self.skip_keyword(Keyword::Varying) {
            Ok(DataType::Varchar(self.parse_optional_length()?))
        } else {
            Ok(DataType::Char(self.parse_optional_length()?))
        }
    }

    /// Parses what follows `interval`: either `(p)` or a field restriction
    /// such as `DAY TO SECOND`, where only a seconds field takes `(p)`.
    fn parse_interval(&mut self) -> Result<DataType, ParseError> {
        let Some(start) = self.interval_field() else {
            let precision = self.parse_optional_precision()?;
            return Ok(DataType::Interval {
                fields: None,
                precision,
            });
        };
        let span = self.current.span;
        self.advance();

        let end = if self.skip_keyword(Keyword::To) {
            let Some(end) = self.interval_field() else {
                return Err(self.error_expected("interval field"));
            };
            self.advance();
            Some(end)
        } else {
            None
        };
        let fields = IntervalFields::from_range(start, end)
            .ok_or_else(|| ParseError::new("Invalid interval field range", span))?;

        let precision = if fields.ends_in_second() {
            self.parse_optional_precision()?
        } else {
            None
        };
        Ok(DataType::Interval {
            fields: Some(fields),
            precision,
        })
    }

    /// Returns the interval field the current token names, if any.
    fn interval_field(&self) -> Option<&'static str> {
        let TokenKind::Identifier(name) = &self.current.kind else {
            return None;
        };
        INTERVAL_FIELDS
            .iter()
            .copied()
            .find(|field| name.eq_ignore_ascii_case(field))
    }

    /// `float(p)` is `real` up to 24 bits of precision and `double precision`
    /// up to 53. Without `p` it is `double precision`.
    fn parse_float_precision(&mut self) -> Result<DataType, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(DataType::Double);
        }
        self.advance();
        let span = self.current.span;
        let bits = self.expect_integer::<u8>("precision")?;
        self.expect(&TokenKind::RightParen)?;
        match bits {
            1..=24 => Ok(DataType::Real),
            25..=53 => Ok(DataType::Double),
            _ => Err(ParseError::new(
                "Float precision must be between 1 and 53",
                span,
            )),
        }
    }

    /// Parses an optional `WITH TIME ZONE` or `WITHOUT TIME ZONE`.
    fn parse_time_zone(&mut self) -> Result<bool, ParseError> {
        let with_time_zone = if self.skip_keyword(Keyword::With) {
            true
        } else if self.skip_keyword(Keyword::Without) {
            false
        } else {
            return Ok(false);
        };
        self.expect_keyword(Keyword::Time)?;
        self.expect_keyword(Keyword::Zone)?;
        Ok(with_time_zone)
    }

    /// Parses an optional fractional seconds precision, `(p)`.
    fn parse_optional_precision(&mut self) -> Result<Option<u8>, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(None);
        }
        self.advance();
        let precision = self.expect_integer::<u8>("precision")?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(precision))
    }

    /// Parses optional precision and scale (for DECIMAL/NUMERIC).
    fn parse_optional_precision_scale(&mut self) -> Result<(Option<u16>, Option<u16>), ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        self.advance();

        let precision = self.expect_integer::<u16>("precision")?;
        let scale = if self.check(&TokenKind::Comma) {
            self.advance();
            Some(self.expect_integer::<u16>("scale")?)
        } else {
            None
        };

        self.expect(&TokenKind::RightParen)?;
        Ok((Some(precision), scale))
    }

    /// Parses optional length (for CHAR/VARCHAR).
    fn parse_optional_length(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(None);
        }
        self.advance();
        let length = self.expect_integer::<u32>("length")?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(length))
    }

    /// Parses a comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![];
        loop {
            exprs.push(self.parse_expression(0)?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(exprs)
    }

    /// Parses `( ident, ... )`.
    fn parse_paren_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut idents = vec![];
        loop {
            idents.push(self.expect_identifier()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(idents)
    }

    // --- Helper methods ---

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Consumes the given keyword if it is the current token.
    fn skip_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Builds the error for a current token that is not `expected`.
    fn error_expected(&self, expected: &str) -> ParseError {
        match &self.current.kind {
            TokenKind::Eof => ParseError::unexpected_eof(expected, self.current.span),
            TokenKind::Error(message) => ParseError::new(message.clone(), self.current.span),
            found => ParseError::unexpected(expected, found.clone(), self.current.span),
        }
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expected(&format!("{kind:?}")))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.skip_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error_expected(keyword.as_str()))
        }
    }

    /// Expects and returns an identifier, folded the way PostgreSQL folds it.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match identifier_name(&self.current.kind) {
            Some(name) => {
                self.advance();
                Ok(name)
            }
            None => Err(self.error_expected("identifier")),
        }
    }

    /// Expects a non-negative integer literal that fits in `T`.
    fn expect_integer<T: TryFrom<i64>>(&mut self, what: &str) -> Result<T, ParseError> {
        let TokenKind::Integer(n) = self.current.kind else {
            return Err(self.error_expected(what));
        };
        let value = T::try_from(n)
            .map_err(|_| ParseError::new(format!("{what} out of range: {n}"), self.current.span))?;
        self.advance();
        Ok(value)
    }
}

/// Returns the identifier a token names, if it can name one.
///
/// Bare identifiers and non-reserved keywords fold to lower case; quoted
/// identifiers are kept exactly as written.
fn identifier_name(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::Identifier(name) => Some(name.to_ascii_lowercase()),
        TokenKind::QuotedIdentifier(name) => Some(name.clone()),
        TokenKind::Keyword(kw) if !kw.is_reserved() => Some(kw.as_str().to_ascii_lowercase()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_statement()
    }

    fn parse_type(sql: &str) -> DataType {
        Parser::new(sql).parse_data_type().unwrap()
    }

    #[test]
    fn test_create_table() {
        let stmt = parse("CREATE TABLE users (id integer NOT NULL, name text)").unwrap();
        let Statement::CreateTable { table, columns, .. } = stmt else {
            panic!("Expected CREATE TABLE statement");
        };
        assert_eq!(table.name, "users");
        assert_eq!(columns.len(), 2);
        assert!(columns[0].is_not_null());
        assert!(!columns[1].is_not_null());
    }

    #[test]
    fn test_identifier_folding() {
        let stmt = parse(r#"CREATE TABLE Public."MyTable" ("Id" INT)"#).unwrap();
        let Statement::CreateTable { table, columns, .. } = stmt else {
            panic!("Expected CREATE TABLE statement");
        };
        assert_eq!(table.schema.as_deref(), Some("public"));
        assert_eq!(table.name, "MyTable");
        assert_eq!(columns[0].name, "Id");
    }

    #[test]
    fn test_non_reserved_keyword_as_column_name() {
        let stmt = parse("CREATE TABLE t (date date, type text, key int)").unwrap();
        let Statement::CreateTable { columns, .. } = stmt else {
            panic!("Expected CREATE TABLE statement");
        };
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["date", "type", "key"]);
    }

    #[test]
    fn test_default_schema() {
        let stmt = Parser::new("DROP TABLE a, s.b")
            .with_default_schema(Some("public".into()))
            .parse_statement()
            .unwrap();
        let Statement::DropTable { tables, .. } = stmt else {
            panic!("Expected DROP TABLE statement");
        };
        assert_eq!(tables[0].schema.as_deref(), Some("public"));
        assert_eq!(tables[1].schema.as_deref(), Some("s"));
    }

    #[test]
    fn test_alter_set_default_then_more_items() {
        let stmt = parse("ALTER TABLE t ALTER COLUMN c SET DEFAULT 1 + 2, DROP COLUMN d").unwrap();
        let Statement::AlterTable { items, .. } = stmt else {
            panic!("Expected ALTER TABLE statement");
        };
        assert_eq!(items.len(), 2);
        assert!(matches!(
            &items[0],
            AlterItem::SetDefault { expr: Expr::Binary { op: BinaryOp::Add, .. }, .. }
        ));
        assert_eq!(items[1], AlterItem::DropColumn { column: "d".into() });
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be parsed as 1 + (2 * 3)
        let stmt = parse("ALTER TABLE t ALTER c SET DEFAULT 1 + 2 * 3").unwrap();
        let Statement::AlterTable { items, .. } = stmt else {
            panic!("Expected ALTER TABLE statement");
        };
        let AlterItem::SetDefault { expr, .. } = &items[0] else {
            panic!("Expected SET DEFAULT");
        };
        let Expr::Binary { op, right, .. } = expr else {
            panic!("Expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(right.as_ref(), Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_postfix_cast() {
        let stmt = parse("CREATE TABLE t (s text DEFAULT 'a'::text NOT NULL)").unwrap();
        let Statement::CreateTable { columns, .. } = stmt else {
            panic!("Expected CREATE TABLE statement");
        };
        assert_eq!(
            columns[0].default_expr(),
            Some(&Expr::string("a").type_cast(DataType::Text))
        );
        assert!(columns[0].is_not_null());
    }

    #[test]
    fn test_sql_value_function_is_not_a_column() {
        let stmt = parse(
            "CREATE TABLE t (at timestamptz DEFAULT CURRENT_TIMESTAMP, b text DEFAULT \"user\")",
        )
        .unwrap();
        let Statement::CreateTable { columns, .. } = stmt else {
            panic!("Expected CREATE TABLE statement");
        };
        assert_eq!(columns[0].default_expr(), Some(&Expr::raw("current_timestamp")));
        assert_eq!(columns[1].default_expr(), Some(&Expr::column("user")));
    }

    #[test]
    fn test_case_expression() {
        let stmt =
            parse("ALTER TABLE t ALTER c SET DEFAULT CASE WHEN 1 = 1 THEN 'y' ELSE 'n' END")
                .unwrap();
        let Statement::AlterTable { items, .. } = stmt else {
            panic!("Expected ALTER TABLE statement");
        };
        assert!(matches!(&items[0], AlterItem::SetDefault { expr: Expr::Case { .. }, .. }));
    }

    #[test]
    fn test_type_aliases() {
        assert_eq!(parse_type("int4"), DataType::Integer);
        assert_eq!(parse_type("INT8"), DataType::Bigint);
        assert_eq!(parse_type("float4"), DataType::Real);
        assert_eq!(parse_type("float(30)"), DataType::Double);
        assert_eq!(parse_type("bool"), DataType::Boolean);
        assert_eq!(
            parse_type("timestamptz(3)"),
            DataType::Timestamp {
                precision: Some(3),
                with_time_zone: true
            }
        );
    }

    #[test]
    fn test_multi_word_types() {
        assert_eq!(parse_type("double precision"), DataType::Double);
        assert_eq!(parse_type("character varying(12)"), DataType::Varchar(Some(12)));
        assert_eq!(
            parse_type("time(2) with time zone"),
            DataType::Time {
                precision: Some(2),
                with_time_zone: true
            }
        );
        assert_eq!(parse_type("timestamp without time zone"), DataType::timestamp());
    }

    #[test]
    fn test_array_suffixes() {
        assert_eq!(parse_type("int[]"), DataType::Integer.array());
        assert_eq!(parse_type("text[3][]"), DataType::Text.array().array());
        assert_eq!(parse_type("uuid ARRAY"), DataType::Uuid.array());
    }

    #[test]
    fn test_custom_types() {
        assert_eq!(parse_type("mood"), DataType::custom("mood"));
        assert_eq!(
            parse_type("geo.geometry(4326)"),
            DataType::Custom {
                schema: Some("geo".into()),
                name: "geometry".into(),
                modifiers: vec![4326],
            }
        );
    }

    #[test]
    fn test_float_precision_out_of_range() {
        assert!(Parser::new("float(54)").parse_data_type().is_err());
    }

    #[test]
    fn test_unsupported_constraints() {
        let err = parse("CREATE TABLE t (a int UNIQUE)").unwrap_err();
        assert!(err.message.contains("UNIQUE"));
        assert!(parse("CREATE TABLE t (a int, CHECK (a > 0))").is_err());
    }

    #[test]
    fn test_statement_separators() {
        let statements = Parser::new(";DROP TABLE a;; DROP TABLE b;")
            .parse_statements()
            .unwrap();
        assert_eq!(statements.len(), 2);

        assert!(Parser::new("DROP TABLE a DROP TABLE b").parse_statements().is_err());
    }

    #[test]
    fn test_lexer_error_surfaces_message() {
        let err = parse("CREATE TABLE 'open").unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
    }

    #[test]
    fn test_unexpected_eof() {
        let err = parse("CREATE TABLE t (a").unwrap_err();
        assert_eq!(err.found, Some(TokenKind::Eof));
    }
}
