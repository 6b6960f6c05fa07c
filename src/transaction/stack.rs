//! TransactionStack - LIFO frames of nested transactions.

use super::snapshot::Snapshot;
use super::Depth;

/// Ordered stack of transaction frames.
///
/// The last frame is the innermost open transaction. An empty stack means
/// no transaction is open and the store's base snapshot is current.
#[derive(Debug, Clone, Default)]
pub struct TransactionStack {
    frames: Vec<Snapshot>,
}

impl TransactionStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new frame.
    pub fn push(&mut self, frame: Snapshot) {
        self.frames.push(frame);
    }

    /// Pop the innermost frame.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.frames.pop()
    }

    /// Get the innermost frame.
    pub fn top(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    /// Get the innermost frame mutably.
    pub fn top_mut(&mut self) -> Option<&mut Snapshot> {
        self.frames.last_mut()
    }

    /// Number of open frames.
    pub fn depth(&self) -> Depth {
        self.frames.len()
    }

    /// Check if no transaction is open.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
