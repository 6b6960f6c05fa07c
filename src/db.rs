//! Database - thread-safe handle over a [`Store`].
//!
//! # Thread Safety
//!
//! The Database is `Send + Sync` and can be shared across threads using Arc.
//! `get` and `count` take a shared lock and may run concurrently with each
//! other. `set`, `delete`, `begin`, `commit` and `rollback` take an exclusive
//! lock and are serialized against everything.
//!
//! Every operation is synchronous and holds its lock guard for its whole
//! duration, so a mutation is never observed half-applied. Guards release
//! on every exit path, including errors.

use std::fmt;

use parking_lot::RwLock;
use tracing::trace;

use crate::metrics::{Counter, DbMetrics, Timer};
use crate::options::Options;
use crate::store::Store;
use crate::transaction::Depth;
use crate::types::{Command, Reply};
use crate::{Error, Result};

/// Thread-safe transactional key-value store.
///
/// All callers share one transaction stack: a `begin` from one thread opens
/// a frame that every other thread's operations then act on.
pub struct Database {
    /// The engine, guarded by a reader/writer lock.
    store: RwLock<Store>,
    /// Operation metrics.
    metrics: DbMetrics,
    /// Options the database was created with.
    options: Options,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Create an empty database with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create an empty database with custom options.
    pub fn with_options(options: Options) -> Self {
        Self {
            store: RwLock::new(Store::with_options(&options)),
            metrics: DbMetrics::new(),
            options,
        }
    }

    /// Run `f` under the shared lock.
    fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        let store = self.store.read();
        let _timer = self
            .options
            .enable_metrics
            .then(|| Timer::new(&self.metrics.read_latency));
        f(&*store)
    }

    /// Run `f` under the exclusive lock and refresh the state gauges.
    fn write<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut store = self.store.write();
        let _timer = self
            .options
            .enable_metrics
            .then(|| Timer::new(&self.metrics.write_latency));
        let out = f(&mut *store);
        if self.options.enable_metrics {
            self.metrics.depth.set(store.depth() as i64);
            self.metrics.keys.set(store.len() as i64);
        }
        out
    }

    fn record(&self, counter: &Counter) {
        if self.options.enable_metrics {
            counter.inc();
        }
    }

    /// Store `value` under `key`. Always succeeds.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        self.write(|store| store.set(key, value));
        self.record(&self.metrics.sets);
    }

    /// Get the value under `key` in the current view.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = self.read(|store| store.get(key).map(str::to_owned));
        self.record(&self.metrics.gets);
        if value.is_none() {
            self.record(&self.metrics.misses);
        }
        value
    }

    /// Remove `key`, returning the value it held.
    ///
    /// Returns `Error::NoSuchItem` if `key` is absent.
    pub fn delete(&self, key: &str) -> Result<String> {
        let result = self.write(|store| store.delete(key));
        self.record(&self.metrics.deletes);
        if result.is_err() {
            self.record(&self.metrics.misses);
        }
        result
    }

    /// Number of keys holding `value`, or `None` if no key does.
    pub fn count(&self, value: &str) -> Option<usize> {
        let count = self.read(|store| store.count(value));
        self.record(&self.metrics.counts);
        if count.is_none() {
            self.record(&self.metrics.misses);
        }
        count
    }

    /// Open a nested transaction.
    pub fn begin(&self) {
        self.write(Store::begin);
        self.record(&self.metrics.txn_begin);
    }

    /// Commit the innermost transaction into its parent.
    ///
    /// Returns `Error::TransactionIsEmpty` if no transaction is open.
    pub fn commit(&self) -> Result<()> {
        let result = self.write(Store::commit);
        self.record_end(&result, &self.metrics.txn_commit);
        result
    }

    /// Discard the innermost transaction.
    ///
    /// Returns `Error::TransactionIsEmpty` if no transaction is open.
    pub fn rollback(&self) -> Result<()> {
        let result = self.write(Store::rollback);
        self.record_end(&result, &self.metrics.txn_rollback);
        result
    }

    fn record_end(&self, result: &Result<()>, on_success: &Counter) {
        match result {
            Ok(()) => self.record(on_success),
            Err(_) => self.record(&self.metrics.txn_empty),
        }
    }

    /// Execute a command.
    ///
    /// Get and Count of an absent key or value yield `Error::NoSuchItem`.
    pub fn execute(&self, command: Command) -> Result<Reply> {
        let kind = command.kind();
        trace!(command = %kind, mutating = kind.is_mutating(), "execute");

        match command {
            Command::Set { key, value } => {
                self.set(key, value);
                Ok(Reply::Unit)
            }
            Command::Get { key } => self
                .get(&key)
                .map(Reply::Value)
                .ok_or(Error::NoSuchItem),
            Command::Delete { key } => self.delete(&key).map(Reply::Value),
            Command::Count { value } => self
                .count(&value)
                .map(Reply::Count)
                .ok_or(Error::NoSuchItem),
            Command::Begin => {
                self.begin();
                Ok(Reply::Unit)
            }
            Command::Commit => self.commit().map(|_| Reply::Unit),
            Command::Rollback => self.rollback().map(|_| Reply::Unit),
        }
    }

    /// Check if `key` is present in the current view.
    pub fn contains_key(&self, key: &str) -> bool {
        self.read(|store| store.contains_key(key))
    }

    /// Number of keys in the current view.
    pub fn len(&self) -> usize {
        self.read(Store::len)
    }

    /// Check if the current view holds no keys.
    pub fn is_empty(&self) -> bool {
        self.read(Store::is_empty)
    }

    /// Number of open transactions.
    pub fn depth(&self) -> Depth {
        self.read(Store::depth)
    }

    /// Get database statistics.
    pub fn stats(&self) -> DatabaseStats {
        self.read(|store| DatabaseStats {
            depth: store.depth(),
            keys: store.len(),
            distinct_values: store.view().distinct_values(),
        })
    }

    /// Get the metrics recorder.
    pub fn metrics(&self) -> &DbMetrics {
        &self.metrics
    }

    /// Get the options the database was created with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Consume the database and return the underlying store.
    pub fn into_inner(self) -> Store {
        self.store.into_inner()
    }
}

impl From<Store> for Database {
    fn from(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
            metrics: DbMetrics::new(),
            options: Options::default(),
        }
    }
}

/// Database statistics for the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    /// Number of open transactions.
    pub depth: Depth,
    /// Number of keys.
    pub keys: usize,
    /// Number of distinct values.
    pub distinct_values: usize,
}

impl fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Open transactions: {}", self.depth)?;
        writeln!(f, "  Keys: {}", self.keys)?;
        writeln!(f, "  Distinct values: {}", self.distinct_values)?;
        Ok(())
    }
}
