//! Transaction module - nested transactions over full snapshots.
//!
//! This module provides:
//! - `Snapshot`: one storage map paired with its `ValueIndex`
//! - `TransactionStack`: LIFO frames pushed by `begin`
//!
//! # Transaction Lifecycle
//!
//! 1. `begin` copies the current view and pushes the copy as a new frame
//! 2. Reads and writes act on the top frame only
//! 3. `commit` pops the frame and overwrites the view beneath it
//! 4. `rollback` pops the frame and drops it
//!
//! Frames below the top are never touched until a commit reaches them, so
//! rollback needs no undo log.

mod snapshot;
mod stack;

pub use snapshot::Snapshot;
pub use stack::TransactionStack;

use std::fmt;

/// Transaction nesting depth (number of open frames).
pub type Depth = usize;

/// How a frame left the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Frame contents replaced the view beneath it.
    Committed,
    /// Frame contents were discarded.
    RolledBack,
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionOutcome::Committed => f.write_str("commit"),
            TransactionOutcome::RolledBack => f.write_str("rollback"),
        }
    }
}
