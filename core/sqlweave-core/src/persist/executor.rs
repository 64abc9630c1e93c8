//! Statement executor capability and the in-memory recording executor.

use crate::builder::{Insert, Statement};
use crate::config::PersistConfig;
use crate::error::WeaveResult;
use crate::value::Arg;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Runs a rendered INSERT and returns the generated identifier.
pub trait StatementExecutor {
    fn execute_insert(&mut self, insert: &Insert) -> WeaveResult<Arg>;
}

impl<F> StatementExecutor for F
where
    F: FnMut(&Insert) -> WeaveResult<Arg>,
{
    fn execute_insert(&mut self, insert: &Insert) -> WeaveResult<Arg> {
        self(insert)
    }
}

/// Monotonic identifier source. Safe to share between threads.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicI64,
}

impl IdAllocator {
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    /// Returns the current value and advances.
    pub fn allocate(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Value the next `allocate` returns.
    pub fn peek(&self) -> i64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// One statement seen by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedInsert {
    pub table: String,
    pub columns: Vec<String>,
    pub sql: String,
    pub args: Vec<Arg>,
    pub id: i64,
}

impl ExecutedInsert {
    /// Bound value of `column` in the (single-row) statement.
    pub fn value_of(&self, column: &str) -> Option<&Arg> {
        let position = self.columns.iter().position(|c| c == column)?;
        self.args.get(position)
    }
}

/// Executor that talks to no database: it logs each statement, remembers it
/// and returns the next allocator id.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    ids: Arc<IdAllocator>,
    executed: Vec<ExecutedInsert>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PersistConfig) -> Self {
        Self::with_allocator(Arc::new(IdAllocator::starting_at(config.first_id)))
    }

    /// Shares `ids` with other executors.
    pub fn with_allocator(ids: Arc<IdAllocator>) -> Self {
        Self {
            ids,
            executed: Vec::new(),
        }
    }

    pub fn allocator(&self) -> &Arc<IdAllocator> {
        &self.ids
    }

    pub fn executed(&self) -> &[ExecutedInsert] {
        &self.executed
    }
}

impl StatementExecutor for RecordingExecutor {
    fn execute_insert(&mut self, insert: &Insert) -> WeaveResult<Arg> {
        let sql = insert.render();
        let args = insert.args();
        let id = self.ids.allocate();

        tracing::info!(
            target: "sqlweave_core::executor",
            sql = %sql,
            args = ?args,
            id,
            "(fake) executing insert"
        );

        self.executed.push(ExecutedInsert {
            table: insert.table().to_string(),
            columns: insert.columns().to_vec(),
            sql,
            args,
            id,
        });
        Ok(Arg::Int64(id))
    }
}
