//! Tests for the query parser
//!
//! These tests verify:
//! - Classification of the four statement forms and meta-commands
//! - Column-spec extraction for CREATE TABLE
//! - Positional column/value pairing for INSERT
//! - SELECT clause peeling, limit before where
//! - Typed failures on every non-matching path

use casklite::error::CaskError;
use casklite::query::{parse, ColumnSpec, Command, Projection};

// =============================================================================
// Meta-Commands
// =============================================================================

#[test]
fn test_meta_commands() {
    assert_eq!(parse(".t").unwrap(), Command::ListTables);
    assert_eq!(parse("  .db  ").unwrap(), Command::CurrentDatabase);
}

// =============================================================================
// CREATE
// =============================================================================

#[test]
fn test_create_database() {
    assert_eq!(
        parse("create database mydb").unwrap(),
        Command::CreateDatabase {
            name: "mydb".to_string()
        }
    );
}

#[test]
fn test_create_database_rejects_column_list() {
    let result = parse("create database mydb (id int.5)");
    assert!(matches!(result, Err(CaskError::Parse(_))));
}

#[test]
fn test_create_table() {
    let cmd = parse("CREATE TABLE person (id int.5 index, name str.100, age int.2)").unwrap();
    assert_eq!(
        cmd,
        Command::CreateTable {
            name: "person".to_string(),
            columns: vec![
                ColumnSpec {
                    name: "id".to_string(),
                    type_name: "int".to_string(),
                    max_len: 5,
                    indexed: true,
                },
                ColumnSpec {
                    name: "name".to_string(),
                    type_name: "str".to_string(),
                    max_len: 100,
                    indexed: false,
                },
                ColumnSpec {
                    name: "age".to_string(),
                    type_name: "int".to_string(),
                    max_len: 2,
                    indexed: false,
                },
            ],
        }
    );
}

#[test]
fn test_create_table_requires_column_list() {
    let result = parse("create table person");
    assert!(matches!(result, Err(CaskError::Parse(_))));
}

#[test]
fn test_create_table_malformed_column_spec() {
    let result = parse("create table person (id integer)");
    assert!(matches!(result, Err(CaskError::Parse(_))));
}

// =============================================================================
// INSERT
// =============================================================================

#[test]
fn test_insert() {
    let cmd = parse("insert into person(id,name,age) values(1,'ada',30)").unwrap();
    assert_eq!(
        cmd,
        Command::Insert {
            table: "person".to_string(),
            columns: vec!["id".to_string(), "name".to_string(), "age".to_string()],
            values: vec!["1".to_string(), "'ada'".to_string(), "30".to_string()],
        }
    );
}

#[test]
fn test_insert_keywords_case_insensitive_literals_preserved() {
    let cmd = parse("INSERT INTO Person(Id,Name) VALUES(1,'Ada Lovelace')").unwrap();
    let Command::Insert {
        table,
        columns,
        values,
    } = cmd
    else {
        panic!("expected insert");
    };

    assert_eq!(table, "person");
    assert_eq!(columns, vec!["id", "name"]);
    // Literal content keeps its case even though keywords fold.
    assert_eq!(values[1], "'Ada Lovelace'");
}

#[test]
fn test_insert_count_mismatch() {
    let result = parse("insert into person(id,name) values(1)");
    assert!(matches!(result, Err(CaskError::Parse(_))));
}

#[test]
fn test_insert_empty_column_name() {
    let result = parse("insert into person(id,,name) values(1,2,3)");
    assert!(matches!(result, Err(CaskError::Parse(_))));
}

// =============================================================================
// SELECT
// =============================================================================

#[test]
fn test_select_star() {
    let cmd = parse("select * from person").unwrap();
    assert_eq!(
        cmd,
        Command::Select {
            projection: Projection::All,
            table: "person".to_string(),
            predicate: None,
            limit: None,
        }
    );
}

#[test]
fn test_select_clause_ordering() {
    let cmd = parse("SELECT a,b FROM t WHERE x>1 LIMIT 3").unwrap();
    assert_eq!(
        cmd,
        Command::Select {
            projection: Projection::Columns(vec!["a".to_string(), "b".to_string()]),
            table: "t".to_string(),
            predicate: Some("x>1".to_string()),
            limit: Some(3),
        }
    );
}

#[test]
fn test_select_predicate_keeps_limit_word_in_literal() {
    // `limit` appears inside the predicate's string literal; peeling the
    // real LIMIT clause off the end first must leave it untouched.
    let cmd = parse("select * from t where note = 'no limit here' limit 2").unwrap();
    let Command::Select {
        predicate, limit, ..
    } = cmd
    else {
        panic!("expected select");
    };

    assert_eq!(predicate.as_deref(), Some("note = 'no limit here'"));
    assert_eq!(limit, Some(2));
}

#[test]
fn test_select_where_without_limit() {
    let cmd = parse("select name from person where age >= 30").unwrap();
    let Command::Select {
        predicate, limit, ..
    } = cmd
    else {
        panic!("expected select");
    };

    assert_eq!(predicate.as_deref(), Some("age >= 30"));
    assert_eq!(limit, None);
}

#[test]
fn test_select_limit_without_where() {
    let cmd = parse("select * from person limit 10").unwrap();
    let Command::Select {
        predicate, limit, ..
    } = cmd
    else {
        panic!("expected select");
    };

    assert_eq!(predicate, None);
    assert_eq!(limit, Some(10));
}

#[test]
fn test_select_missing_from() {
    let result = parse("select a,b");
    assert!(matches!(result, Err(CaskError::Parse(_))));
}

// =============================================================================
// Fallthrough
// =============================================================================

#[test]
fn test_unrecognized_statement() {
    let result = parse("drop table person");
    assert!(matches!(result, Err(CaskError::Parse(_))));
}

#[test]
fn test_empty_input() {
    let result = parse("   ");
    assert!(matches!(result, Err(CaskError::Parse(_))));
}
