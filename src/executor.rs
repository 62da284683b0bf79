//! Query Executor
//!
//! The coordinator that routes parsed commands through the catalog and
//! the per-table log stores.
//!
//! ## Responsibilities
//! - Own the "current database" (directory) selection
//! - Validate commands against the catalog before any durable mutation
//! - Open log stores lazily and reuse them for the session
//!
//! Execution is single-threaded and synchronous: one command runs to
//! completion before the next is accepted.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::catalog::{Catalog, Column};
use crate::config::Config;
use crate::error::{CaskError, Result};
use crate::query::{self, Command, Projection};
use crate::record::{self, Record, Value};
use crate::store::LogStore;

/// Columns and rows produced by a SELECT or a meta-command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Tabular data
    Rows(QueryResult),

    /// A one-line status message
    Message(String),

    /// Completed with nothing to show
    Done,
}

/// A completed command: its output plus timing for the shell
#[derive(Debug)]
pub struct Outcome {
    pub operation: &'static str,
    pub output: Output,
    pub elapsed: Duration,
}

/// The query executor for one session
pub struct Executor {
    config: Config,

    /// Catalog of the current database
    catalog: Catalog,

    /// Open log stores, keyed by table name; dropped when the current
    /// database changes
    stores: HashMap<String, LogStore>,
}

impl Executor {
    /// Open an executor on a database
    ///
    /// With `database = None` the configured default is used and created
    /// if missing. A named database must already exist.
    pub fn open(config: Config, database: Option<&str>) -> Result<Self> {
        let dir = match database {
            Some(name) => {
                let dir = config.root_dir.join(name);
                if !dir.is_dir() {
                    return Err(CaskError::UnknownDatabase(name.to_string()));
                }
                dir
            }
            None => {
                let dir = config.root_dir.join(&config.default_database);
                fs::create_dir_all(&dir)?;
                dir
            }
        };

        tracing::info!(database = %dir.display(), "session opened");

        Ok(Self {
            config,
            catalog: Catalog::new(dir),
            stores: HashMap::new(),
        })
    }

    /// Parse and run one line of input
    pub fn execute(&mut self, input: &str) -> Result<Outcome> {
        let start = Instant::now();
        let command = query::parse(input)?;
        let (operation, output) = self.run(command)?;
        Ok(Outcome {
            operation,
            output,
            elapsed: start.elapsed(),
        })
    }

    /// Path of the current database
    pub fn database_path(&self) -> &Path {
        self.catalog.db_dir()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Command Routing
    // =========================================================================

    fn run(&mut self, command: Command) -> Result<(&'static str, Output)> {
        match command {
            Command::CreateDatabase { name } => {
                self.create_database(&name)?;
                Ok(("CREATE", Output::Done))
            }
            Command::CreateTable { name, columns } => {
                self.create_table(&name, &columns)?;
                Ok(("CREATE", Output::Done))
            }
            Command::Insert {
                table,
                columns,
                values,
            } => {
                self.insert(&table, &columns, &values)?;
                Ok(("INSERT", Output::Done))
            }
            Command::Select {
                projection,
                table,
                predicate,
                limit,
            } => {
                let result = self.select(&table, &projection, predicate.as_deref(), limit)?;
                Ok(("SELECT", Output::Rows(result)))
            }
            Command::ListTables => {
                let tables = self.catalog.list()?;
                let result = QueryResult {
                    columns: vec!["table".to_string()],
                    rows: tables.into_iter().map(|t| vec![Value::Str(t)]).collect(),
                };
                Ok(("LIST_TABLES", Output::Rows(result)))
            }
            Command::CurrentDatabase => {
                let message =
                    format!("Current database: {}", self.catalog.db_dir().display());
                Ok(("CURRENT_DATABASE", Output::Message(message)))
            }
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Create a database directory and switch the session to it
    fn create_database(&mut self, name: &str) -> Result<()> {
        let dir = self.config.root_dir.join(name);
        if dir.exists() {
            return Err(CaskError::AlreadyExists(name.to_string()));
        }
        fs::create_dir_all(&dir)?;

        tracing::info!(database = name, "database created");

        self.catalog = Catalog::new(dir);
        self.stores.clear();
        Ok(())
    }

    /// Define a table and create its empty log file
    fn create_table(&mut self, name: &str, specs: &[query::ColumnSpec]) -> Result<()> {
        let columns: Vec<Column> = specs.iter().map(|s| s.resolve()).collect::<Result<_>>()?;
        self.catalog.define(name, &columns)?;

        let store = LogStore::open(
            &self.catalog.log_path(name),
            columns,
            self.config.sync_strategy,
        )?;
        self.stores.insert(name.to_string(), store);
        Ok(())
    }

    /// Coerce, validate, and append one row
    ///
    /// Validation runs to completion before the store is touched: a
    /// rejected row performs no log append.
    fn insert(&mut self, table: &str, columns: &[String], values: &[String]) -> Result<()> {
        let schema = self.catalog.lookup(table)?;

        let mut rec = Record::new();
        for (name, token) in columns.iter().zip(values) {
            let column = schema
                .iter()
                .find(|c| &c.name == name)
                .ok_or_else(|| CaskError::UnknownColumn(name.clone()))?;
            rec.set(name.clone(), record::decode_literal(token, column.ty)?);
        }

        record::validate(&rec, &schema)?;

        let key_column = index_column(table, &schema)?;
        let key = rec
            .get(&key_column.name)
            .cloned()
            .ok_or_else(|| CaskError::ConstraintViolation {
                column: key_column.name.clone(),
                reason: "missing value".to_string(),
            })?;

        let offset = self.store_for(table)?.insert(key, rec)?;
        tracing::debug!(table, offset, "row appended");
        Ok(())
    }

    /// Scan live rows, filter, truncate, and project
    fn select(
        &mut self,
        table: &str,
        projection: &Projection,
        predicate: Option<&str>,
        limit: Option<usize>,
    ) -> Result<QueryResult> {
        let schema = self.catalog.lookup(table)?;

        let names: Vec<String> = match projection {
            Projection::All => schema.iter().map(|c| c.name.clone()).collect(),
            Projection::Columns(names) => {
                for name in names {
                    if !schema.iter().any(|c| &c.name == name) {
                        return Err(CaskError::UnknownColumn(name.clone()));
                    }
                }
                names.clone()
            }
        };

        let store = self.store_for(table)?;

        let mut rows = Vec::new();
        for (_key, rec) in store.scan() {
            if limit.is_some_and(|n| rows.len() >= n) {
                break;
            }

            if let Some(pred) = predicate {
                if !query::eval_predicate(pred, rec, &schema)? {
                    continue;
                }
            }

            let mut row = Vec::with_capacity(names.len());
            for name in &names {
                let value = rec
                    .get(name)
                    .ok_or_else(|| CaskError::UnknownColumn(name.clone()))?;
                row.push(value.clone());
            }
            rows.push(row);
        }

        Ok(QueryResult {
            columns: names,
            rows,
        })
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Open the table's store on first use and reuse it afterwards
    fn store_for(&mut self, table: &str) -> Result<&mut LogStore> {
        if !self.stores.contains_key(table) {
            let columns = self.catalog.lookup(table)?;
            let store = LogStore::open(
                &self.catalog.log_path(table),
                columns,
                self.config.sync_strategy,
            )?;
            self.stores.insert(table.to_string(), store);
        }

        Ok(self
            .stores
            .get_mut(table)
            .expect("store opened just above"))
    }
}

/// Find the single index column of a table
///
/// Metadata written by this crate always passes, but a table with zero
/// or several index columns is still a schema error surfaced here.
fn index_column<'a>(table: &str, schema: &'a [Column]) -> Result<&'a Column> {
    let mut indexed = schema.iter().filter(|c| c.indexed);
    match (indexed.next(), indexed.next()) {
        (Some(column), None) => Ok(column),
        (None, _) => Err(CaskError::Schema(format!(
            "table {table} has no index column"
        ))),
        (Some(_), Some(_)) => Err(CaskError::Schema(format!(
            "table {table} has more than one index column"
        ))),
    }
}
