//! Structured schema edits to PostgreSQL DDL.
//!
//! `ddlforge` turns an API-level description of table changes into DDL text.
//! Edits are never formatted directly: each one is mapped onto the closed
//! statement tree of [`ddlforge_sql`] and rendered by a dialect, so the output
//! is always something the dialect's own parser accepts.
//!
//! # Architecture
//!
//! - **Edits** ([`edit`]) - `CreateTableEdit`, `AlterTableEdit`, `RenameTableEdit`
//!   and `DropTableEdit`, grouped into a [`Request`]
//! - **Resolver** ([`resolve`]) - raw type text to canonical type nodes, by
//!   parsing a one-column `CREATE TABLE`
//! - **Transforms** ([`transform`]) - one pure function per edit kind
//! - **Editor** ([`SchemaEditor`]) - runs the transforms category by category
//!   and renders the result
//!
//! Column comments have no place in the statement tree. They travel as side
//! statements and are printed after every tree statement of the request.
//!
//! # Example
//!
//! ```rust
//! use ddlforge::prelude::*;
//! use ddlforge_sql::PostgresDialect;
//!
//! let request = Request::new().alter_table(
//!     AlterTableEdit::new("", "t").change_column(
//!         ChangeColumnEdit::new("a", "text")
//!             .rename_to("b")
//!             .nullable(true)
//!             .comment("desc"),
//!     ),
//! );
//!
//! let sql = SchemaEditor::new(PostgresDialect::new())
//!     .deparse(&request)
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "ALTER TABLE t RENAME COLUMN a TO b;
//! ALTER TABLE t ALTER COLUMN b TYPE TEXT;
//! ALTER TABLE t ALTER COLUMN b DROP NOT NULL;
//! ALTER TABLE t ALTER COLUMN b DROP DEFAULT;
//! COMMENT ON COLUMN t.b IS 'desc';"
//! );
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the DDL for a JSON request
//! ddlforge deparse --input request.json
//!
//! # Show how a type spelling resolves
//! ddlforge resolve-type "character varying(20)[]"
//!
//! # Check a request without rendering it
//! ddlforge validate --input request.json
//! ```

pub mod deparse;
pub mod edit;
pub mod error;
pub mod resolve;
pub mod transform;

pub use deparse::{DeparseOutput, SchemaEditor};
pub use edit::Request;
pub use error::{EditError, EditKind, Result, ValidationError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::deparse::{DeparseOutput, SchemaEditor};
    pub use crate::edit::{
        AddColumnEdit, AddForeignKeyEdit, AlterTableEdit, ChangeColumnEdit, CreateTableEdit,
        DropTableEdit, RenameTableEdit, Request,
    };
    pub use crate::error::{EditError, EditKind, Result, ValidationError};
    pub use crate::resolve::resolve_type;
}
