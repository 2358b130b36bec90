//! Raw type text to canonical type nodes.
//!
//! Type text is never parsed on its own. It is spliced into a one-column
//! `CREATE TABLE` statement and run through the dialect's full parser, so any
//! spelling the parser accepts for a column type is accepted here and comes
//! back in canonical form.

use ddlforge_sql::ast::Statement;
use ddlforge_sql::{DataType, Dialect, ParseContext};
use tracing::trace;

use crate::error::{EditError, Result};

/// Placeholder schema, table and column name of the probe statement.
const PROBE_SCHEMA: &str = "public";
const PROBE_NAME: &str = "column_type";

/// Builds the single-column statement used to resolve `raw_type`.
#[must_use]
pub fn probe_statement(raw_type: &str) -> String {
    format!(r#"CREATE TABLE "{PROBE_SCHEMA}"."{PROBE_NAME}" ("{PROBE_NAME}" {raw_type});"#)
}

/// Resolves type text such as `int4` or `character varying(20)[]`.
///
/// # Errors
///
/// Returns `EditError::TypeResolution` when the probe statement does not
/// parse, and `EditError::ParseMismatch` when it parses into anything other
/// than one `CREATE TABLE` with one column.
pub fn resolve_type<D: Dialect + ?Sized>(dialect: &D, raw_type: &str) -> Result<DataType> {
    let sql = probe_statement(raw_type);
    let statements = dialect
        .parse(&ParseContext::default(), &sql)
        .map_err(|source| EditError::TypeResolution {
            raw_type: raw_type.to_string(),
            source,
        })?;

    let mismatch = |reason: String| EditError::ParseMismatch {
        raw_type: raw_type.to_string(),
        reason,
    };

    let [statement] = statements.as_slice() else {
        return Err(mismatch(format!(
            "expected 1 statement, got {}",
            statements.len()
        )));
    };
    let Statement::CreateTable { columns, .. } = statement else {
        return Err(mismatch(format!(
            "expected CREATE TABLE, got {}",
            statement.kind_name()
        )));
    };
    let [column] = columns.as_slice() else {
        return Err(mismatch(format!(
            "expected 1 column, got {}",
            columns.len()
        )));
    };

    trace!(raw_type, data_type = ?column.data_type, "Resolved column type");
    Ok(column.data_type.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlforge_sql::PostgresDialect;

    #[test]
    fn test_probe_statement() {
        assert_eq!(
            probe_statement("int"),
            r#"CREATE TABLE "public"."column_type" ("column_type" int);"#
        );
    }

    #[test]
    fn test_resolve_spellings() {
        let pg = PostgresDialect::new();
        assert_eq!(resolve_type(&pg, "int4").unwrap(), DataType::Integer);
        assert_eq!(resolve_type(&pg, "INTEGER").unwrap(), DataType::Integer);
        assert_eq!(
            resolve_type(&pg, "character varying(20)[]").unwrap(),
            DataType::Varchar(Some(20)).array()
        );
        assert_eq!(
            resolve_type(&pg, "timestamptz").unwrap(),
            DataType::timestamptz()
        );
        assert_eq!(resolve_type(&pg, "mood").unwrap(), DataType::custom("mood"));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let pg = PostgresDialect::new();
        let first = resolve_type(&pg, "numeric(12, 2)").unwrap();
        let second = resolve_type(&pg, "numeric(12, 2)").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unparsable_type() {
        let pg = PostgresDialect::new();
        let err = resolve_type(&pg, "varchar(").unwrap_err();
        assert!(matches!(
            err,
            EditError::TypeResolution { ref raw_type, .. } if raw_type == "varchar("
        ));
    }

    #[test]
    fn test_type_text_that_closes_the_statement() {
        let pg = PostgresDialect::new();

        let err = resolve_type(&pg, "int); DROP TABLE t; CREATE TABLE x (y int").unwrap_err();
        assert!(matches!(
            err,
            EditError::ParseMismatch { ref reason, .. } if reason == "expected 1 statement, got 3"
        ));

        let err = resolve_type(&pg, "int); DROP TABLE t; --").unwrap_err();
        assert!(matches!(
            err,
            EditError::ParseMismatch { ref reason, .. } if reason == "expected 1 statement, got 2"
        ));
    }

    #[test]
    fn test_type_text_with_extra_column() {
        let pg = PostgresDialect::new();
        let err = resolve_type(&pg, "int, other text").unwrap_err();
        assert!(matches!(
            err,
            EditError::ParseMismatch { ref reason, .. } if reason == "expected 1 column, got 2"
        ));
    }
}
