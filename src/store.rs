//! Store - the transactional key-value engine.
//!
//! The store owns a base snapshot and a stack of transaction frames. Every
//! operation acts on the current view: the top frame if a transaction is
//! open, otherwise the base.
//!
//! # Thread Safety
//!
//! `Store` is a plain data structure with a `&mut self` write API. Share it
//! across threads through [`Database`](crate::Database), which wraps it in a
//! reader/writer lock.

use tracing::{debug, trace};

use crate::options::Options;
use crate::transaction::{Depth, Snapshot, TransactionOutcome, TransactionStack};
use crate::types::{Command, Reply};
use crate::{Error, Result};

/// In-memory key-value store with nested transactions.
///
/// # Example
///
/// ```
/// use txkv::{Error, Store};
///
/// let mut store = Store::new();
/// store.set("a", "1");
///
/// store.begin();
/// store.set("a", "2");
/// assert_eq!(store.count("1"), None);
/// store.rollback()?;
///
/// assert_eq!(store.get("a"), Some("1"));
/// assert_eq!(store.rollback(), Err(Error::TransactionIsEmpty));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Committed state, current when no transaction is open.
    base: Snapshot,
    /// Open transaction frames.
    frames: TransactionStack,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with custom options.
    pub fn with_options(options: &Options) -> Self {
        Self {
            base: Snapshot::with_capacity(options.initial_capacity),
            frames: TransactionStack::new(),
        }
    }

    /// The currently visible view.
    pub fn view(&self) -> &Snapshot {
        self.frames.top().unwrap_or(&self.base)
    }

    fn view_mut(&mut self) -> &mut Snapshot {
        match self.frames.top_mut() {
            Some(frame) => frame,
            None => &mut self.base,
        }
    }

    /// Store `value` under `key`. Always succeeds.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, depth = self.depth(), "set");
        self.view_mut().put(key, value.into());
    }

    /// Get the value under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.view().get(key)
    }

    /// Remove `key`, returning the value it held.
    ///
    /// Returns `Error::NoSuchItem` if `key` is absent.
    pub fn delete(&mut self, key: &str) -> Result<String> {
        trace!(key = %key, depth = self.depth(), "delete");
        self.view_mut().remove(key).ok_or(Error::NoSuchItem)
    }

    /// Number of keys holding `value`, or `None` if no key does.
    pub fn count(&self, value: &str) -> Option<usize> {
        self.view().count(value)
    }

    /// Check if `key` is present in the current view.
    pub fn contains_key(&self, key: &str) -> bool {
        self.view().contains_key(key)
    }

    /// Number of keys in the current view.
    pub fn len(&self) -> usize {
        self.view().len()
    }

    /// Check if the current view holds no keys.
    pub fn is_empty(&self) -> bool {
        self.view().is_empty()
    }

    /// Number of open transactions.
    pub fn depth(&self) -> Depth {
        self.frames.depth()
    }

    /// Open a nested transaction.
    ///
    /// The new frame is a full copy of the current view, so cost is
    /// proportional to its size.
    pub fn begin(&mut self) {
        let frame = self.view().clone();
        self.frames.push(frame);
        debug!(depth = self.depth(), keys = self.len(), "begin");
    }

    /// Commit the innermost transaction.
    ///
    /// The frame's contents replace the view directly beneath it, which is
    /// the parent frame or the base. Returns `Error::TransactionIsEmpty` if
    /// no transaction is open.
    pub fn commit(&mut self) -> Result<()> {
        self.finish(TransactionOutcome::Committed)
    }

    /// Discard the innermost transaction.
    ///
    /// Returns `Error::TransactionIsEmpty` if no transaction is open.
    pub fn rollback(&mut self) -> Result<()> {
        self.finish(TransactionOutcome::RolledBack)
    }

    fn finish(&mut self, outcome: TransactionOutcome) -> Result<()> {
        let Some(frame) = self.frames.pop() else {
            debug!(%outcome, "rejected: no open transaction");
            return Err(Error::TransactionIsEmpty);
        };

        if outcome == TransactionOutcome::Committed {
            self.view_mut().replace_with(frame);
        }

        debug!(%outcome, depth = self.depth(), keys = self.len(), "transaction finished");
        Ok(())
    }

    /// Execute a command against the store.
    ///
    /// Absent keys and values are reported as `Error::NoSuchItem`.
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Set { key, value } => {
                self.set(key, value);
                Ok(Reply::Unit)
            }
            Command::Get { key } => self
                .get(&key)
                .map(|v| Reply::Value(v.to_owned()))
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
}
