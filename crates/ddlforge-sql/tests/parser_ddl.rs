//! Tests for CREATE, ALTER and DROP TABLE parsing.

mod common;
use common::*;

use ddlforge_sql::ast::{
    AlterItem, ConstraintKind, DataType, Expr, Literal, MatchType, ReferentialAction, Statement,
};

#[test]
fn create_table_with_table_constraints() {
    let create = parse_create(
        "CREATE TABLE public.orders (
            id bigint NOT NULL,
            user_id int,
            CONSTRAINT orders_pkey PRIMARY KEY (id),
            FOREIGN KEY (user_id) REFERENCES public.users (id)
        )",
    );
    assert_eq!(create.table.schema.as_deref(), Some("public"));
    assert_eq!(create.table.name, "orders");
    assert_eq!(create.columns.len(), 2);
    assert_eq!(create.constraints.len(), 2);

    let pk = &create.constraints[0];
    assert_eq!(pk.name.as_deref(), Some("orders_pkey"));
    assert_eq!(pk.keys, ["id"]);
    assert_eq!(pk.kind, ConstraintKind::Primary);

    let ConstraintKind::Foreign(fk) = &create.constraints[1].kind else {
        panic!("Expected foreign key");
    };
    assert_eq!(create.constraints[1].keys, ["user_id"]);
    assert_eq!(fk.table.name, "users");
    assert_eq!(fk.columns, ["id"]);
    assert_eq!(fk.match_type, MatchType::Simple);
    assert_eq!(fk.on_update, ReferentialAction::NoAction);
    assert_eq!(fk.on_delete, ReferentialAction::NoAction);
}

#[test]
fn create_table_column_constraints_keep_order() {
    let create =
        parse_create("CREATE TABLE t (n int DEFAULT 0 NOT NULL, m int NOT NULL DEFAULT 1)");
    let kinds: Vec<_> = create.columns[0]
        .constraints
        .iter()
        .map(|c| c.kind.name())
        .collect();
    assert_eq!(kinds, ["default", "not null"]);

    let kinds: Vec<_> = create.columns[1]
        .constraints
        .iter()
        .map(|c| c.kind.name())
        .collect();
    assert_eq!(kinds, ["not null", "default"]);
}

#[test]
fn create_table_explicit_null_leaves_no_constraint() {
    let create = parse_create("CREATE TABLE t (a text NULL)");
    assert!(create.columns[0].constraints.is_empty());
}

#[test]
fn create_table_inline_primary_key_and_reference() {
    let create = parse_create(
        "CREATE TABLE c (
            id serial PRIMARY KEY,
            p_id int CONSTRAINT c_p_fk REFERENCES p ON DELETE SET NULL ON UPDATE CASCADE MATCH FULL
        )",
    );
    assert_eq!(create.columns[0].constraints[0].kind, ConstraintKind::Primary);
    assert_eq!(create.columns[0].constraints[0].keys, ["id"]);

    let constraint = &create.columns[1].constraints[0];
    assert_eq!(constraint.name.as_deref(), Some("c_p_fk"));
    let ConstraintKind::Foreign(fk) = &constraint.kind else {
        panic!("Expected foreign key");
    };
    assert!(fk.columns.is_empty());
    assert_eq!(fk.on_delete, ReferentialAction::SetNull);
    assert_eq!(fk.on_update, ReferentialAction::Cascade);
    assert_eq!(fk.match_type, MatchType::Full);
}

#[test]
fn create_table_defaults() {
    let create = parse_create(
        "CREATE TABLE t (
            a int DEFAULT -1,
            b text DEFAULT 'x' || 'y',
            c timestamptz DEFAULT now(),
            d boolean DEFAULT false,
            e numeric DEFAULT 1.5
        )",
    );
    let defaults: Vec<_> = create
        .columns
        .iter()
        .map(|c| c.default_expr().cloned())
        .collect();
    assert!(matches!(defaults[0], Some(Expr::Unary { .. })));
    assert!(matches!(defaults[1], Some(Expr::Binary { .. })));
    assert_eq!(defaults[2], Some(Expr::function("now", vec![])));
    assert_eq!(defaults[3], Some(Expr::boolean(false)));
    assert_eq!(defaults[4], Some(Expr::Literal(Literal::Float(1.5))));
}

#[test]
fn alter_table_items() {
    let (table, items) = parse_alter(
        "ALTER TABLE s.t
            ADD COLUMN a int NOT NULL,
            ADD b text,
            DROP COLUMN c,
            DROP d,
            RENAME COLUMN e TO f,
            ALTER COLUMN f TYPE varchar(20),
            ALTER f SET DATA TYPE text,
            ALTER COLUMN f SET NOT NULL,
            ALTER COLUMN f DROP NOT NULL,
            ALTER COLUMN f SET DEFAULT 'z',
            ALTER COLUMN f DROP DEFAULT,
            DROP CONSTRAINT IF EXISTS t_pkey,
            DROP CONSTRAINT t_fk,
            ADD PRIMARY KEY (a, b),
            ADD CONSTRAINT t_fk FOREIGN KEY (a) REFERENCES u (id)",
    );
    assert_eq!(table.schema.as_deref(), Some("s"));
    assert_eq!(items.len(), 15);

    assert!(matches!(&items[0], AlterItem::AddColumnList { columns } if columns[0].is_not_null()));
    assert!(matches!(&items[1], AlterItem::AddColumnList { columns } if columns[0].name == "b"));
    assert_eq!(items[2], AlterItem::DropColumn { column: "c".into() });
    assert_eq!(items[3], AlterItem::DropColumn { column: "d".into() });
    assert_eq!(
        items[4],
        AlterItem::RenameColumn {
            from: "e".into(),
            to: "f".into()
        }
    );
    assert_eq!(
        items[5],
        AlterItem::AlterColumnType {
            column: "f".into(),
            data_type: DataType::Varchar(Some(20))
        }
    );
    assert_eq!(
        items[6],
        AlterItem::AlterColumnType {
            column: "f".into(),
            data_type: DataType::Text
        }
    );
    assert_eq!(items[7], AlterItem::SetNotNull { column: "f".into() });
    assert_eq!(items[8], AlterItem::DropNotNull { column: "f".into() });
    assert_eq!(
        items[9],
        AlterItem::SetDefault {
            column: "f".into(),
            expr: Expr::string("z")
        }
    );
    assert_eq!(items[10], AlterItem::DropDefault { column: "f".into() });
    assert_eq!(
        items[11],
        AlterItem::DropConstraint {
            name: "t_pkey".into(),
            if_exists: true
        }
    );
    assert_eq!(
        items[12],
        AlterItem::DropConstraint {
            name: "t_fk".into(),
            if_exists: false
        }
    );
    assert!(matches!(
        &items[13],
        AlterItem::AddConstraint { constraint } if constraint.keys == ["a", "b"]
    ));
    assert!(matches!(
        &items[14],
        AlterItem::AddConstraint { constraint }
            if constraint.name.as_deref() == Some("t_fk")
                && matches!(constraint.kind, ConstraintKind::Foreign(_))
    ));
}

#[test]
fn alter_table_rename_to() {
    let (table, items) = parse_alter("ALTER TABLE public.old RENAME TO new");
    assert_eq!(table.name, "old");
    assert_eq!(
        items,
        [AlterItem::RenameTable {
            new_name: "new".into()
        }]
    );
}

#[test]
fn drop_table_list() {
    let Statement::DropTable { if_exists, tables } = parse("DROP TABLE IF EXISTS a, public.b")
    else {
        panic!("Expected DROP TABLE");
    };
    assert!(if_exists);
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].schema, None);
    assert_eq!(tables[1].schema.as_deref(), Some("public"));

    let Statement::DropTable { if_exists, .. } = parse("DROP TABLE a") else {
        panic!("Expected DROP TABLE");
    };
    assert!(!if_exists);
}

#[test]
fn statement_sequence() {
    let statements = parse_all(
        "-- migration
         CREATE TABLE a (id int);
         ALTER TABLE a ADD COLUMN b int;
         DROP TABLE a;",
    );
    let kinds: Vec<_> = statements.iter().map(Statement::kind_name).collect();
    assert_eq!(kinds, ["CREATE TABLE", "ALTER TABLE", "DROP TABLE"]);
}

#[test]
fn quoted_identifiers_keep_case_and_quotes() {
    let create = parse_create(r#"CREATE TABLE "public"."Mixed Case" ("say ""hi""" text)"#);
    assert_eq!(create.table.name, "Mixed Case");
    assert_eq!(create.columns[0].name, r#"say "hi""#);
}

#[test]
fn empty_input_has_no_statements() {
    assert!(parse_all("").is_empty());
    assert!(parse_all(" ; ;").is_empty());
}
