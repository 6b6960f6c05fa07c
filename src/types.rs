//! Core types for txkv: the command surface and its replies.

use std::fmt;

/// A single store operation.
///
/// This is the narrow interface a dispatch layer drives the store through;
/// see [`Database::execute`](crate::Database::execute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store `value` under `key`.
    Set { key: String, value: String },
    /// Read the value under `key`.
    Get { key: String },
    /// Remove `key`, replying with the value it held.
    Delete { key: String },
    /// Number of keys currently holding `value`.
    Count { value: String },
    /// Open a nested transaction.
    Begin,
    /// Commit the innermost transaction into its parent.
    Commit,
    /// Discard the innermost transaction.
    Rollback,
}

impl Command {
    /// Create a set command.
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Command::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a get command.
    pub fn get(key: impl Into<String>) -> Self {
        Command::Get { key: key.into() }
    }

    /// Create a delete command.
    pub fn delete(key: impl Into<String>) -> Self {
        Command::Delete { key: key.into() }
    }

    /// Create a count command.
    pub fn count(value: impl Into<String>) -> Self {
        Command::Count {
            value: value.into(),
        }
    }

    /// Get the kind of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Set { .. } => CommandKind::Set,
            Command::Get { .. } => CommandKind::Get,
            Command::Delete { .. } => CommandKind::Delete,
            Command::Count { .. } => CommandKind::Count,
            Command::Begin => CommandKind::Begin,
            Command::Commit => CommandKind::Commit,
            Command::Rollback => CommandKind::Rollback,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Set { key, value } => write!(f, "SET {} {}", key, value),
            Command::Get { key } => write!(f, "GET {}", key),
            Command::Delete { key } => write!(f, "DELETE {}", key),
            Command::Count { value } => write!(f, "COUNT {}", value),
            Command::Begin => f.write_str("BEGIN"),
            Command::Commit => f.write_str("COMMIT"),
            Command::Rollback => f.write_str("ROLLBACK"),
        }
    }
}

/// Command discriminant, without arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Set,
    Get,
    Delete,
    Count,
    Begin,
    Commit,
    Rollback,
}

impl CommandKind {
    /// All command kinds.
    pub const ALL: [CommandKind; 7] = [
        CommandKind::Set,
        CommandKind::Get,
        CommandKind::Delete,
        CommandKind::Count,
        CommandKind::Begin,
        CommandKind::Commit,
        CommandKind::Rollback,
    ];

    /// Check if this command may change store state.
    ///
    /// Mutating commands need exclusive access; the rest can share.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, CommandKind::Get | CommandKind::Count)
    }

    /// Check if this command operates on the transaction stack.
    pub fn is_transactional(&self) -> bool {
        matches!(
            self,
            CommandKind::Begin | CommandKind::Commit | CommandKind::Rollback
        )
    }

    /// Upper-case command name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Set => "SET",
            CommandKind::Get => "GET",
            CommandKind::Delete => "DELETE",
            CommandKind::Count => "COUNT",
            CommandKind::Begin => "BEGIN",
            CommandKind::Commit => "COMMIT",
            CommandKind::Rollback => "ROLLBACK",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful result of a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Set, Begin, Commit and Rollback carry no payload.
    Unit,
    /// Value read by Get or removed by Delete.
    Value(String),
    /// Number of keys reported by Count.
    Count(usize),
}

impl Reply {
    /// Get the value payload, if any.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Reply::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Get the count payload, if any.
    pub fn as_count(&self) -> Option<usize> {
        match self {
            Reply::Count(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Unit => f.write_str("OK"),
            Reply::Value(v) => f.write_str(v),
            Reply::Count(n) => write!(f, "{}", n),
        }
    }
}
