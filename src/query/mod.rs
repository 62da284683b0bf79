//! Query Module
//!
//! Pure text → structured-command translation, and predicate evaluation
//! over decoded records. No I/O and no catalog access happen here.

mod command;
mod parser;
mod predicate;

pub use command::{ColumnSpec, Command, Projection};
pub use parser::parse;
pub use predicate::eval_predicate;
