//! Predicate evaluation
//!
//! A WHERE clause is a single `column op literal` comparison, evaluated
//! as a filter over decoded records. The literal is coerced to the
//! column's declared type before comparing.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::Column;
use crate::error::{CaskError, Result};
use crate::record::{self, Record};

fn comparison_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)\s*(!=|<=|>=|=|<|>)\s*(.+)$")
            .expect("hardcoded pattern")
    })
}

/// Evaluate a predicate against one record
pub fn eval_predicate(predicate: &str, record: &Record, columns: &[Column]) -> Result<bool> {
    let caps = comparison_re().captures(predicate.trim()).ok_or_else(|| {
        CaskError::Parse(format!("where: unsupported predicate: {predicate}"))
    })?;

    let name = caps[1].to_lowercase();
    let op = &caps[2];
    let literal = caps[3].trim();

    let column = columns
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| CaskError::UnknownColumn(name.clone()))?;

    let rhs = record::decode_literal(literal, column.ty)?;
    let lhs = record
        .get(&name)
        .ok_or_else(|| CaskError::UnknownColumn(name.clone()))?;

    Ok(match op {
        "=" => *lhs == rhs,
        "!=" => *lhs != rhs,
        "<" => *lhs < rhs,
        "<=" => *lhs <= rhs,
        ">" => *lhs > rhs,
        ">=" => *lhs >= rhs,
        _ => unreachable!("regex alternation"),
    })
}
