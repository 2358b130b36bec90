//! End-to-end tests for the `ddlforge` binary.

use std::io::Write;
use std::process::Command;

use assert_cmd::cargo;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const REQUEST: &str = r#"{
    "createTableList": [
        {"name": "t", "addColumnList": [{"name": "id", "type": "int4", "comment": "key"}]}
    ],
    "dropTableList": [{"name": "old"}]
}"#;

/// Get the ddlforge binary with no configuration from the environment.
fn ddlforge() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ddlforge"));
    cmd.env_remove("DDLFORGE_DIALECT")
        .env_remove("DDLFORGE_INDENT");
    cmd
}

fn request_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

mod deparse {
    use super::*;

    #[test]
    fn reads_request_file() {
        let file = request_file(REQUEST);

        ddlforge()
            .arg("deparse")
            .arg("--input")
            .arg(file.path())
            .assert()
            .success()
            .stdout(
                "CREATE TABLE t (
    id INTEGER NOT NULL
);
DROP TABLE IF EXISTS old;
COMMENT ON COLUMN t.id IS 'key';
",
            );
    }

    #[test]
    fn reads_stdin() {
        assert_cmd::Command::from_std(ddlforge())
            .args(["deparse", "--input", "-"])
            .write_stdin(r#"{"dropTableList": [{"name": "a"}]}"#)
            .assert()
            .success()
            .stdout("DROP TABLE IF EXISTS a;\n");
    }

    #[test]
    fn indent_from_environment() {
        let file = request_file(REQUEST);

        ddlforge()
            .env("DDLFORGE_INDENT", "2")
            .arg("deparse")
            .arg("-i")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::starts_with("CREATE TABLE t (\n  id INTEGER NOT NULL\n);"));
    }

    #[test]
    fn empty_request_prints_nothing() {
        let file = request_file("{}");

        ddlforge()
            .args(["--dialect", "postgres", "deparse", "--input"])
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn validates_before_rendering() {
        let file = request_file(r#"{"dropTableList": [{"name": ""}]}"#);

        ddlforge()
            .arg("deparse")
            .arg("--input")
            .arg(file.path())
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("DROP TABLE requires a table name"));
    }

    #[test]
    fn bad_type_fails() {
        let file = request_file(
            r#"{"createTableList": [{"name": "t", "addColumnList": [{"name": "a", "type": "varchar("}]}]}"#,
        );

        ddlforge()
            .arg("deparse")
            .arg("--input")
            .arg(file.path())
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Failed to transform CREATE TABLE 't'"));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        ddlforge()
            .arg("deparse")
            .arg("--input")
            .arg(dir.path().join("absent.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("IO error"));
    }
}

mod resolve_type {
    use super::*;

    #[test]
    fn prints_canonical_spelling() {
        ddlforge()
            .args(["resolve-type", "character varying(20)[]"])
            .assert()
            .success()
            .stdout("VARCHAR(20)[]\n");
    }

    #[test]
    fn joins_words() {
        ddlforge()
            .args(["resolve-type", "double", "precision"])
            .assert()
            .success()
            .stdout("DOUBLE PRECISION\n");
    }

    #[test]
    fn rejects_bad_text() {
        ddlforge()
            .args(["resolve-type", "varchar("])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Failed to resolve type 'varchar('"));
    }

    #[test]
    fn rejects_unknown_dialect() {
        ddlforge()
            .args(["--dialect", "oracle", "resolve-type", "int"])
            .assert()
            .failure();
    }
}

mod validate {
    use super::*;

    #[test]
    fn accepts_valid_request() {
        let file = request_file(REQUEST);

        ddlforge()
            .arg("validate")
            .arg("--input")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Request is valid."));
    }

    #[test]
    fn reports_problems() {
        let file = request_file(r#"{"renameTableList": [{"oldName": "a", "newName": ""}]}"#);

        ddlforge()
            .arg("validate")
            .arg("--input")
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Table 'a' cannot be renamed to an empty name"));
    }
}
