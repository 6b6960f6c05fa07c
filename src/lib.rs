//! # txkv
//!
//! An in-memory key-value store with nested transactions and an O(1)
//! "how many keys hold this value" index.
//!
//! ## Features
//!
//! - **Value counts**: a reverse index kept consistent on every write
//! - **Nested transactions**: `begin`/`commit`/`rollback` to any depth
//! - **Snapshot isolation**: each frame is a full copy of its parent view
//! - **Concurrent access**: shared reads, serialized writes
//! - **Metrics**: operation counters and Prometheus export
//!
//! ## Quick Start
//!
//! ```rust
//! use txkv::{Database, Error};
//!
//! let db = Database::new();
//!
//! db.set("a", "10");
//! db.set("b", "10");
//! assert_eq!(db.count("10"), Some(2));
//!
//! db.begin();
//! db.delete("a")?;
//! assert_eq!(db.count("10"), Some(1));
//! db.rollback()?;
//!
//! assert_eq!(db.get("a").as_deref(), Some("10"));
//! assert_eq!(db.commit(), Err(Error::TransactionIsEmpty));
//! # Ok::<(), Error>(())
//! ```

// Public modules
pub mod error;
pub mod metrics;
pub mod options;
pub mod transaction;
pub mod types;

mod db;
mod index;
mod store;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use options::{Options, OptionsBuilder};
pub use types::{Command, CommandKind, Reply};

// Database
pub use db::{Database, DatabaseStats};
pub use store::Store;

// Index and transactions
pub use index::ValueIndex;
pub use transaction::{Depth, Snapshot, TransactionOutcome, TransactionStack};

// Metrics
pub use metrics::{DbMetrics, MetricsSummary};
