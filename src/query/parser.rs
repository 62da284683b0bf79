//! Query Parser
//!
//! Single-pass classifier over the SQL subset:
//!
//! ```text
//! CREATE [DATABASE | TABLE] <name> [(col type.maxlen [index], ...)]
//! INSERT INTO <table>(<cols>) VALUES(<vals>)
//! SELECT [* | <cols>] FROM <table> [WHERE <pred>] [LIMIT <n>]
//! .t  .db
//! ```
//!
//! Keywords match case-insensitively; string literal content is never
//! case-folded. Identifiers are normalized to lowercase. Every
//! non-matching extraction step is a typed `Parse` failure tagged with
//! the clause it was attempting to extract.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CaskError, Result};

use super::{ColumnSpec, Command, Projection};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($re).expect("hardcoded pattern"))
        }
    };
}

pattern!(
    create_re,
    r"(?is)^create\s+(table|database)\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:\((.*)\))?\s*$"
);
pattern!(
    column_spec_re,
    r"(?i)^([A-Za-z_][A-Za-z0-9_]*)\s+([A-Za-z]+)\.(\d+)(\s+index)?$"
);
pattern!(
    insert_re,
    r"(?is)^insert\s+into\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^()]*)\)\s*values\s*\((.*)\)\s*$"
);
pattern!(limit_re, r"(?i)\s+limit\s+(\d+)\s*$");
pattern!(where_re, r"(?is)\s+where\s+(.+)$");
pattern!(
    select_re,
    r"(?is)^select\s+(.+?)\s+from\s+([A-Za-z_][A-Za-z0-9_]*)\s*$"
);

/// Parse one line of input into a command
pub fn parse(input: &str) -> Result<Command> {
    let trimmed = input.trim();

    // Meta-commands match exactly, before any keyword classification.
    match trimmed {
        ".t" => return Ok(Command::ListTables),
        ".db" => return Ok(Command::CurrentDatabase),
        _ => {}
    }

    let lower = trimmed.to_lowercase();
    if lower.starts_with("create") {
        return parse_create(trimmed);
    }
    if lower.starts_with("insert") {
        return parse_insert(trimmed);
    }
    if lower.starts_with("select") {
        return parse_select(trimmed);
    }

    Err(CaskError::Parse(format!("unrecognized statement: {trimmed}")))
}

// =============================================================================
// CREATE
// =============================================================================

fn parse_create(input: &str) -> Result<Command> {
    let caps = create_re()
        .captures(input)
        .ok_or_else(|| CaskError::Parse(format!("create: malformed statement: {input}")))?;

    let kind = caps[1].to_lowercase();
    let name = caps[2].to_lowercase();
    let cols = caps.get(3).map(|m| m.as_str());

    match kind.as_str() {
        "database" => {
            if cols.is_some() {
                return Err(CaskError::Parse(
                    "create: a database takes no column list".to_string(),
                ));
            }
            Ok(Command::CreateDatabase { name })
        }
        "table" => {
            let cols = cols.ok_or_else(|| {
                CaskError::Parse("create: a table requires a column list".to_string())
            })?;
            let columns = cols
                .split(',')
                .map(parse_column_spec)
                .collect::<Result<Vec<_>>>()?;
            Ok(Command::CreateTable { name, columns })
        }
        _ => unreachable!("regex alternation"),
    }
}

/// Parse one `name type.maxlen [index]` column definition
fn parse_column_spec(spec: &str) -> Result<ColumnSpec> {
    let spec = spec.trim();
    let caps = column_spec_re()
        .captures(spec)
        .ok_or_else(|| CaskError::Parse(format!("create: malformed column spec: {spec}")))?;

    let max_len = caps[3]
        .parse::<usize>()
        .map_err(|_| CaskError::Parse(format!("create: max length out of range: {spec}")))?;

    Ok(ColumnSpec {
        name: caps[1].to_lowercase(),
        type_name: caps[2].to_lowercase(),
        max_len,
        indexed: caps.get(4).is_some(),
    })
}

// =============================================================================
// INSERT
// =============================================================================

fn parse_insert(input: &str) -> Result<Command> {
    let caps = insert_re()
        .captures(input)
        .ok_or_else(|| CaskError::Parse(format!("insert: malformed statement: {input}")))?;

    let table = caps[1].to_lowercase();

    let columns: Vec<String> = caps[2]
        .split(',')
        .map(|c| c.trim().to_lowercase())
        .collect();
    if columns.iter().any(|c| c.is_empty()) {
        return Err(CaskError::Parse(
            "insert: empty name in column list".to_string(),
        ));
    }

    // Value tokens keep their original case; quoted literal content must
    // survive intact.
    let values: Vec<String> = caps[3].split(',').map(|v| v.trim().to_string()).collect();

    if columns.len() != values.len() {
        return Err(CaskError::Parse(format!(
            "insert: {} columns but {} values",
            columns.len(),
            values.len()
        )));
    }

    Ok(Command::Insert {
        table,
        columns,
        values,
    })
}

// =============================================================================
// SELECT
// =============================================================================

fn parse_select(input: &str) -> Result<Command> {
    let mut tail = input;

    // Peel LIMIT off the end before looking for WHERE, so a `limit`
    // appearing inside the predicate (e.g. in a string literal) can
    // never truncate it. This ordering is a required invariant.
    let mut limit = None;
    if let Some(caps) = limit_re().captures(tail) {
        let n = caps[1]
            .parse::<usize>()
            .map_err(|_| CaskError::Parse(format!("select: limit out of range: {}", &caps[1])))?;
        limit = Some(n);
        tail = &tail[..caps.get(0).expect("whole match").start()];
    }

    let mut predicate = None;
    if let Some(caps) = where_re().captures(tail) {
        predicate = Some(caps[1].trim().to_string());
        tail = &tail[..caps.get(0).expect("whole match").start()];
    }

    let caps = select_re()
        .captures(tail)
        .ok_or_else(|| CaskError::Parse(format!("select: malformed statement: {input}")))?;

    let projection = parse_projection(&caps[1])?;
    let table = caps[2].to_lowercase();

    Ok(Command::Select {
        projection,
        table,
        predicate,
        limit,
    })
}

fn parse_projection(cols: &str) -> Result<Projection> {
    let cols = cols.trim();
    if cols == "*" {
        return Ok(Projection::All);
    }

    let names: Vec<String> = cols.split(',').map(|c| c.trim().to_lowercase()).collect();
    if names.iter().any(|c| c.is_empty()) {
        return Err(CaskError::Parse(
            "select: empty name in column list".to_string(),
        ));
    }
    Ok(Projection::Columns(names))
}
