//! PostgreSQL dialect.

use std::sync::LazyLock;

use regex::Regex;

use super::{DeparseContext, DeparseError, Dialect};
use crate::ast::{
    AlterItem, ColumnDef, ConstraintDef, ConstraintKind, DataType, Expr, ForeignRef, Literal,
    Statement, TableRef, UnaryOp,
};

/// Identifiers PostgreSQL reads back unchanged without quotes.
static SAFE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_$]*$").expect("Invalid identifier regex"));

/// Keywords that must be quoted when used as an identifier.
///
/// Reserved, type/function-name and column-name keywords of PostgreSQL.
pub const POSTGRES_RESERVED_KEYWORDS: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric", "authorization",
    "between", "bigint", "binary", "bit", "boolean", "both", "case", "cast", "char", "character",
    "check", "coalesce", "collate", "collation", "column", "concurrently", "constraint", "create",
    "cross", "current_catalog", "current_date", "current_role", "current_schema", "current_time",
    "current_timestamp", "current_user", "dec", "decimal", "default", "deferrable", "desc",
    "distinct", "do", "else", "end", "except", "exists", "extract", "false", "fetch", "float",
    "for", "foreign", "freeze", "from", "full", "grant", "greatest", "group", "grouping", "having",
    "ilike", "in", "initially", "inner", "inout", "int", "integer", "intersect", "interval", "into",
    "is", "isnull", "join", "lateral", "leading", "least", "left", "like", "limit", "localtime",
    "localtimestamp", "national", "natural", "nchar", "none", "normalize", "not", "notnull", "null",
    "nullif", "numeric", "offset", "on", "only", "or", "order", "out", "outer", "overlaps",
    "overlay", "placing", "position", "precision", "primary", "real", "references", "returning",
    "right", "row", "select", "session_user", "setof", "similar", "smallint", "some", "substring",
    "symmetric", "system_user", "table", "tablesample", "then", "time", "timestamp", "to",
    "trailing", "treat", "trim", "true", "union", "unique", "user", "using", "values", "varchar",
    "variadic", "verbose", "when", "where", "window", "with",
];

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct PostgresDialect {
    reserved: &'static [&'static str],
}

impl PostgresDialect {
    /// Creates a PostgreSQL dialect with the built-in reserved keyword table.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_reserved(POSTGRES_RESERVED_KEYWORDS)
    }

    /// Creates a PostgreSQL dialect that quotes the given lowercase keywords.
    #[must_use]
    pub const fn with_reserved(reserved: &'static [&'static str]) -> Self {
        Self { reserved }
    }

    fn quote_list(&self, names: &[String]) -> Result<String, DeparseError> {
        let quoted = names
            .iter()
            .map(|name| self.quote_identifier(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quoted.join(", "))
    }

    fn table_name(&self, table: &TableRef) -> Result<String, DeparseError> {
        let name = self.quote_identifier(&table.name)?;
        match table.schema.as_deref() {
            Some(schema) if !schema.is_empty() => {
                Ok(format!("{}.{name}", self.quote_identifier(schema)?))
            }
            _ => Ok(name),
        }
    }

    /// Renders a data type in its canonical spelling.
    ///
    /// # Errors
    ///
    /// Returns `DeparseError::EmptyIdentifier` for a custom type without a name.
    pub fn data_type(&self, dt: &DataType) -> Result<String, DeparseError> {
        let sql = match dt {
            DataType::Smallint => "SMALLINT".to_string(),
            DataType::Integer => "INTEGER".to_string(),
            DataType::Bigint => "BIGINT".to_string(),
            DataType::Real => "REAL".to_string(),
            DataType::Double => "DOUBLE PRECISION".to_string(),
            DataType::Decimal { precision, scale } => {
                with_precision_scale("DECIMAL", *precision, *scale)
            }
            DataType::Numeric { precision, scale } => {
                with_precision_scale("NUMERIC", *precision, *scale)
            }
            DataType::Char(len) => with_length("CHAR", *len),
            DataType::Varchar(len) => with_length("VARCHAR", *len),
            DataType::Text => "TEXT".to_string(),
            DataType::Bit(len) => with_length("BIT", *len),
            DataType::Varbit(len) => with_length("BIT VARYING", *len),
            DataType::Bytea => "BYTEA".to_string(),
            DataType::Boolean => "BOOLEAN".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::Time {
                precision,
                with_time_zone,
            } => with_time_zone_suffix(
                with_length("TIME", (*precision).map(u32::from)),
                *with_time_zone,
            ),
            DataType::Timestamp {
                precision,
                with_time_zone,
            } => with_time_zone_suffix(
                with_length("TIMESTAMP", (*precision).map(u32::from)),
                *with_time_zone,
            ),
            DataType::Interval { fields, precision } => {
                let name = match fields {
                    Some(fields) => format!("INTERVAL {}", fields.as_str()),
                    None => "INTERVAL".to_string(),
                };
                with_length(&name, (*precision).map(u32::from))
            }
            DataType::Json => "JSON".to_string(),
            DataType::Jsonb => "JSONB".to_string(),
            DataType::Uuid => "UUID".to_string(),
            DataType::Smallserial => "SMALLSERIAL".to_string(),
            DataType::Serial => "SERIAL".to_string(),
            DataType::Bigserial => "BIGSERIAL".to_string(),
            DataType::Array(inner) => format!("{}[]", self.data_type(inner)?),
            DataType::Custom {
                schema,
                name,
                modifiers,
            } => {
                let mut sql = self.table_name(&TableRef::new(schema.as_deref(), name.clone()))?;
                if !modifiers.is_empty() {
                    let list: Vec<String> = modifiers.iter().map(ToString::to_string).collect();
                    sql.push_str(&format!("({})", list.join(", ")));
                }
                sql
            }
            DataType::Collated {
                data_type,
                schema,
                collation,
            } => format!(
                "{} COLLATE {}",
                self.data_type(data_type)?,
                self.table_name(&TableRef::new(schema.as_deref(), collation.clone()))?
            ),
        };
        Ok(sql)
    }

    /// Renders an expression.
    ///
    /// # Errors
    ///
    /// Returns a `DeparseError` for a non-finite float or an empty name.
    pub fn expr(&self, expr: &Expr) -> Result<String, DeparseError> {
        let sql = match expr {
            Expr::Literal(literal) => self.literal(literal)?,
            Expr::Column { table, name } => match table {
                Some(table) => format!(
                    "{}.{}",
                    self.quote_identifier(table)?,
                    self.quote_identifier(name)?
                ),
                None => self.quote_identifier(name)?,
            },
            Expr::Binary { left, op, right } => {
                format!("{} {} {}", self.expr(left)?, op.as_str(), self.expr(right)?)
            }
            Expr::Unary { op, operand } => match op {
                UnaryOp::Neg => format!("-{}", self.expr(operand)?),
                UnaryOp::Not => format!("NOT {}", self.expr(operand)?),
            },
            Expr::Function(call) => {
                let args = call
                    .args
                    .iter()
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{}({})", function_name(&call.name)?, args.join(", "))
            }
            Expr::IsNull { expr, negated } => {
                let not = if *negated { " NOT" } else { "" };
                format!("{} IS{not} NULL", self.expr(expr)?)
            }
            Expr::In {
                expr,
                list,
                negated,
            } => {
                let items = list
                    .iter()
                    .map(|item| self.expr(item))
                    .collect::<Result<Vec<_>, _>>()?;
                let not = if *negated { " NOT" } else { "" };
                format!("{}{not} IN ({})", self.expr(expr)?, items.join(", "))
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                let not = if *negated { " NOT" } else { "" };
                format!(
                    "{}{not} BETWEEN {} AND {}",
                    self.expr(expr)?,
                    self.expr(low)?,
                    self.expr(high)?
                )
            }
            Expr::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                let mut sql = String::from("CASE");
                if let Some(operand) = operand {
                    sql.push(' ');
                    sql.push_str(&self.expr(operand)?);
                }
                for (when, then) in when_clauses {
                    sql.push_str(&format!(" WHEN {} THEN {}", self.expr(when)?, self.expr(then)?));
                }
                if let Some(else_clause) = else_clause {
                    sql.push_str(&format!(" ELSE {}", self.expr(else_clause)?));
                }
                sql.push_str(" END");
                sql
            }
            Expr::Cast { expr, data_type } => {
                format!("CAST({} AS {})", self.expr(expr)?, self.data_type(data_type)?)
            }
            Expr::TypeCast { expr, data_type } => {
                format!("{}::{}", self.expr(expr)?, self.data_type(data_type)?)
            }
            Expr::Paren(inner) => format!("({})", self.expr(inner)?),
            Expr::Raw(text) => text.clone(),
        };
        Ok(sql)
    }

    #[allow(clippy::unused_self)]
    fn literal(&self, literal: &Literal) -> Result<String, DeparseError> {
        let sql = match literal {
            Literal::Integer(n) => n.to_string(),
            // Debug formatting keeps the fraction or exponent, so the text
            // lexes back as a float.
            Literal::Float(f) if f.is_finite() => format!("{f:?}"),
            Literal::Float(_) => return Err(DeparseError::NonFiniteFloat),
            Literal::String(s) => quote_string(s),
            Literal::Boolean(true) => "TRUE".to_string(),
            Literal::Boolean(false) => "FALSE".to_string(),
            Literal::Null => "NULL".to_string(),
        };
        Ok(sql)
    }

    fn column_def(&self, col: &ColumnDef) -> Result<String, DeparseError> {
        let mut sql = format!(
            "{} {}",
            self.quote_identifier(&col.name)?,
            self.data_type(&col.data_type)?
        );
        for constraint in &col.constraints {
            sql.push(' ');
            sql.push_str(&self.constraint_name_prefix(constraint)?);
            sql.push_str(&self.column_constraint(&constraint.kind)?);
        }
        Ok(sql)
    }

    fn constraint_name_prefix(&self, constraint: &ConstraintDef) -> Result<String, DeparseError> {
        match &constraint.name {
            Some(name) => Ok(format!("CONSTRAINT {} ", self.quote_identifier(name)?)),
            None => Ok(String::new()),
        }
    }

    fn column_constraint(&self, kind: &ConstraintKind) -> Result<String, DeparseError> {
        let sql = match kind {
            ConstraintKind::Primary => "PRIMARY KEY".to_string(),
            ConstraintKind::Foreign(reference) => self.references(reference)?,
            ConstraintKind::Default(expr) => format!("DEFAULT {}", self.expr(expr)?),
            ConstraintKind::NotNull => "NOT NULL".to_string(),
        };
        Ok(sql)
    }

    fn table_constraint(&self, constraint: &ConstraintDef) -> Result<String, DeparseError> {
        let kind = &constraint.kind;
        if matches!(kind, ConstraintKind::Default(_) | ConstraintKind::NotNull) {
            return Err(DeparseError::MisplacedDefault { kind: kind.name() });
        }
        if constraint.keys.is_empty() {
            return Err(DeparseError::EmptyConstraintKeys { kind: kind.name() });
        }

        let keys = self.quote_list(&constraint.keys)?;
        let body = match kind {
            ConstraintKind::Foreign(reference) => {
                format!("FOREIGN KEY ({keys}) {}", self.references(reference)?)
            }
            _ => format!("PRIMARY KEY ({keys})"),
        };
        Ok(format!("{}{body}", self.constraint_name_prefix(constraint)?))
    }

    fn references(&self, reference: &ForeignRef) -> Result<String, DeparseError> {
        let mut sql = format!("REFERENCES {}", self.table_name(&reference.table)?);
        if !reference.columns.is_empty() {
            sql.push_str(&format!(" ({})", self.quote_list(&reference.columns)?));
        }
        sql.push_str(&format!(
            " MATCH {} ON UPDATE {} ON DELETE {}",
            reference.match_type.as_str(),
            reference.on_update.as_str(),
            reference.on_delete.as_str()
        ));
        Ok(sql)
    }

    fn alter_item(&self, item: &AlterItem) -> Result<String, DeparseError> {
        let sql = match item {
            AlterItem::DropColumn { column } => {
                format!("DROP COLUMN {}", self.quote_identifier(column)?)
            }
            AlterItem::AddColumnList { columns } => {
                if columns.is_empty() {
                    return Err(DeparseError::NoColumns);
                }
                let defs = columns
                    .iter()
                    .map(|col| Ok(format!("ADD COLUMN {}", self.column_def(col)?)))
                    .collect::<Result<Vec<_>, DeparseError>>()?;
                defs.join(", ")
            }
            AlterItem::RenameColumn { from, to } => format!(
                "RENAME COLUMN {} TO {}",
                self.quote_identifier(from)?,
                self.quote_identifier(to)?
            ),
            AlterItem::AlterColumnType { column, data_type } => format!(
                "ALTER COLUMN {} TYPE {}",
                self.quote_identifier(column)?,
                self.data_type(data_type)?
            ),
            AlterItem::SetNotNull { column } => {
                format!("ALTER COLUMN {} SET NOT NULL", self.quote_identifier(column)?)
            }
            AlterItem::DropNotNull { column } => {
                format!("ALTER COLUMN {} DROP NOT NULL", self.quote_identifier(column)?)
            }
            AlterItem::SetDefault { column, expr } => format!(
                "ALTER COLUMN {} SET DEFAULT {}",
                self.quote_identifier(column)?,
                self.expr(expr)?
            ),
            AlterItem::DropDefault { column } => {
                format!("ALTER COLUMN {} DROP DEFAULT", self.quote_identifier(column)?)
            }
            AlterItem::DropConstraint { name, if_exists } => {
                let if_exists = if *if_exists { "IF EXISTS " } else { "" };
                format!("DROP CONSTRAINT {if_exists}{}", self.quote_identifier(name)?)
            }
            AlterItem::AddConstraint { constraint } => {
                format!("ADD {}", self.table_constraint(constraint)?)
            }
            AlterItem::RenameTable { new_name } => {
                format!("RENAME TO {}", self.quote_identifier(new_name)?)
            }
        };
        Ok(sql)
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    /// Quotes an identifier unless PostgreSQL would read it back unchanged.
    fn quote_identifier(&self, name: &str) -> Result<String, DeparseError> {
        if name.is_empty() {
            return Err(DeparseError::EmptyIdentifier);
        }
        if SAFE_IDENTIFIER.is_match(name) && !self.reserved.contains(&name) {
            Ok(name.to_string())
        } else {
            Ok(format!("\"{}\"", name.replace('"', "\"\"")))
        }
    }

    fn deparse(&self, ctx: &DeparseContext, stmt: &Statement) -> Result<String, DeparseError> {
        match stmt {
            Statement::CreateTable {
                table,
                columns,
                constraints,
            } => {
                if columns.is_empty() {
                    return Err(DeparseError::NoColumns);
                }
                let mut lines = columns
                    .iter()
                    .map(|col| self.column_def(col))
                    .collect::<Result<Vec<_>, _>>()?;
                for constraint in constraints {
                    lines.push(self.table_constraint(constraint)?);
                }

                let indent = &ctx.indent;
                let body = lines
                    .iter()
                    .map(|line| format!("{indent}{line}"))
                    .collect::<Vec<_>>()
                    .join(",\n");
                Ok(format!(
                    "CREATE TABLE {} (\n{body}\n);",
                    self.table_name(table)?
                ))
            }
            // PostgreSQL rejects RENAME combined with other sub-commands, so
            // every item becomes its own statement.
            Statement::AlterTable { table, items } => {
                let table = self.table_name(table)?;
                let statements = items
                    .iter()
                    .map(|item| Ok(format!("ALTER TABLE {table} {};", self.alter_item(item)?)))
                    .collect::<Result<Vec<_>, DeparseError>>()?;
                Ok(statements.join("\n"))
            }
            Statement::DropTable { if_exists, tables } => {
                if tables.is_empty() {
                    return Err(DeparseError::NoTables);
                }
                let names = tables
                    .iter()
                    .map(|table| self.table_name(table))
                    .collect::<Result<Vec<_>, _>>()?;
                let if_exists = if *if_exists { "IF EXISTS " } else { "" };
                Ok(format!("DROP TABLE {if_exists}{};", names.join(", ")))
            }
        }
    }
}

/// Quotes a string literal, doubling embedded single quotes.
#[must_use]
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Function names are quoted only when PostgreSQL would fold them, never for
/// being keywords: `coalesce(..)` must stay bare to keep its meaning.
fn function_name(name: &str) -> Result<String, DeparseError> {
    if name.is_empty() {
        Err(DeparseError::EmptyIdentifier)
    } else if SAFE_IDENTIFIER.is_match(name) {
        Ok(name.to_string())
    } else {
        Ok(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

fn with_length(name: &str, len: Option<u32>) -> String {
    match len {
        Some(n) => format!("{name}({n})"),
        None => name.to_string(),
    }
}

fn with_precision_scale(name: &str, precision: Option<u16>, scale: Option<u16>) -> String {
    match (precision, scale) {
        (Some(p), Some(s)) => format!("{name}({p}, {s})"),
        (Some(p), None) => format!("{name}({p})"),
        _ => name.to_string(),
    }
}

fn with_time_zone_suffix(sql: String, with_time_zone: bool) -> String {
    if with_time_zone {
        format!("{sql} WITH TIME ZONE")
    } else {
        sql
    }
}
