//! Integration tests for complete store workflows.

use std::collections::HashMap;

use proptest::prelude::*;
use txkv::{Command, Database, Error, Reply, Store};

/// Test complete CRUD workflow.
#[test]
fn integration_crud_workflow() {
    let db = Database::new();

    // Create
    db.set("user:1", "Alice");
    db.set("user:2", "Bob");
    db.set("user:3", "Charlie");

    // Read
    assert_eq!(db.get("user:1").as_deref(), Some("Alice"));
    assert_eq!(db.get("user:2").as_deref(), Some("Bob"));

    // Update
    db.set("user:2", "Bobby");
    assert_eq!(db.get("user:2").as_deref(), Some("Bobby"));
    assert_eq!(db.count("Bob"), None);

    // Delete
    assert_eq!(db.delete("user:3"), Ok("Charlie".to_string()));
    assert_eq!(db.get("user:3"), None);
    assert_eq!(db.delete("user:3"), Err(Error::NoSuchItem));

    assert_eq!(db.len(), 2);
}

/// Setting the same pair repeatedly counts the key once.
#[test]
fn integration_repeated_set_counts_once() {
    let db = Database::new();
    db.set("123", "456");
    assert_eq!(db.count("456"), Some(1));

    db.set("123", "456");
    assert_eq!(db.count("456"), Some(1));
}

/// Overwriting moves the key to the new value's count.
#[test]
fn integration_overwrite_clears_old_count() {
    let db = Database::new();
    db.set("123", "456");
    db.set("123", "zxc");

    assert_eq!(db.execute(Command::count("456")), Err(Error::NoSuchItem));
    assert_eq!(db.get("123").as_deref(), Some("zxc"));
}

/// Committed delete is visible in the base view.
#[test]
fn integration_commit_delete() {
    let db = Database::new();
    db.set("123", "456");
    db.set("abc", "zxc");
    db.begin();
    db.delete("123").unwrap();
    db.commit().unwrap();

    assert_eq!(db.execute(Command::get("123")), Err(Error::NoSuchItem));
    assert_eq!(db.get("abc").as_deref(), Some("zxc"));
}

/// Rolled back delete restores the key.
#[test]
fn integration_rollback_delete() {
    let db = Database::new();
    db.set("123", "456");
    db.set("abc", "zxc");
    db.begin();
    db.delete("123").unwrap();
    db.rollback().unwrap();

    assert_eq!(db.get("123").as_deref(), Some("456"));
    assert_eq!(db.get("abc").as_deref(), Some("zxc"));
}

/// Outer rollback discards an inner commit.
#[test]
fn integration_nested_commit_then_rollback() {
    let db = Database::new();
    db.set("123", "456");
    db.begin();
    db.begin();
    db.set("123", "777");
    db.commit().unwrap();
    db.rollback().unwrap();

    assert_eq!(db.get("123").as_deref(), Some("456"));
    assert_eq!(db.count("777"), None);
    assert_eq!(db.depth(), 0);
}

/// Nested commits cascade one level per call.
#[test]
fn integration_nested_commit_cascade() {
    let db = Database::new();
    db.set("k", "0");

    db.begin();
    db.set("k", "1");
    db.begin();
    db.set("k", "2");
    db.begin();
    db.set("k", "3");

    db.commit().unwrap();
    assert_eq!(db.get("k").as_deref(), Some("3"));
    assert_eq!(db.depth(), 2);

    db.rollback().unwrap();
    assert_eq!(db.get("k").as_deref(), Some("1"));

    db.commit().unwrap();
    assert_eq!(db.get("k").as_deref(), Some("1"));
    assert_eq!(db.count("1"), Some(1));
    assert_eq!(db.count("0"), None);
}

/// Changes inside a transaction are invisible to ancestors until commit.
#[test]
fn integration_transaction_isolation() {
    let mut store = Store::new();
    store.set("a", "x");

    store.begin();
    store.set("b", "x");
    store.begin();
    store.set("c", "x");
    assert_eq!(store.count("x"), Some(3));

    store.rollback().unwrap();
    assert_eq!(store.count("x"), Some(2));
    assert!(!store.contains_key("c"));

    store.rollback().unwrap();
    assert_eq!(store.count("x"), Some(1));
    assert!(!store.contains_key("b"));
}

/// Commit and rollback with nothing open fail without side effects.
#[test]
fn integration_empty_transaction_errors() {
    let db = Database::new();
    db.set("k", "v");

    assert_eq!(db.execute(Command::Commit), Err(Error::TransactionIsEmpty));
    assert_eq!(db.execute(Command::Rollback), Err(Error::TransactionIsEmpty));
    assert_eq!(db.get("k").as_deref(), Some("v"));
    assert_eq!(db.count("v"), Some(1));
    assert_eq!(db.depth(), 0);
}

/// Drive a whole session through the command surface.
#[test]
fn integration_command_session() {
    let db = Database::new();
    let session = vec![
        (Command::set("a", "1"), Ok(Reply::Unit)),
        (Command::set("b", "1"), Ok(Reply::Unit)),
        (Command::count("1"), Ok(Reply::Count(2))),
        (Command::Begin, Ok(Reply::Unit)),
        (Command::delete("a"), Ok(Reply::Value("1".into()))),
        (Command::get("a"), Err(Error::NoSuchItem)),
        (Command::count("1"), Ok(Reply::Count(1))),
        (Command::Rollback, Ok(Reply::Unit)),
        (Command::get("a"), Ok(Reply::Value("1".into()))),
        (Command::Commit, Err(Error::TransactionIsEmpty)),
    ];

    for (command, expected) in session {
        let label = command.to_string();
        assert_eq!(db.execute(command), expected, "{}", label);
    }
}

#[derive(Debug, Clone)]
enum Op {
    Set(u8, u8),
    Delete(u8),
    Begin,
    Commit,
    Rollback,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..8, 0u8..4).prop_map(|(k, v)| Op::Set(k, v)),
        2 => (0u8..8).prop_map(Op::Delete),
        1 => Just(Op::Begin),
        1 => Just(Op::Commit),
        1 => Just(Op::Rollback),
    ]
}

fn apply(store: &mut Store, op: &Op) {
    match op {
        Op::Set(k, v) => store.set(k.to_string(), v.to_string()),
        Op::Delete(k) => {
            let _ = store.delete(&k.to_string());
        }
        Op::Begin => store.begin(),
        Op::Commit => {
            let _ = store.commit();
        }
        Op::Rollback => {
            let _ = store.rollback();
        }
    }
}

fn assert_counts_match(store: &Store) {
    let mut expected: HashMap<&str, usize> = HashMap::new();
    for (_, value) in store.view().iter() {
        *expected.entry(value).or_default() += 1;
    }

    for v in 0u8..4 {
        let v = v.to_string();
        assert_eq!(store.count(&v), expected.get(v.as_str()).copied());
    }
    assert_eq!(store.view().distinct_values(), expected.len());
}

proptest! {
    #[test]
    fn prop_count_matches_storage(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut store = Store::new();
        for op in &ops {
            apply(&mut store, op);
            assert_counts_match(&store);
        }
    }

    #[test]
    fn prop_rollback_restores_view(
        setup in proptest::collection::vec(op_strategy(), 0..32),
        inner in proptest::collection::vec(op_strategy(), 0..32),
    ) {
        let mut store = Store::new();
        for op in &setup {
            apply(&mut store, op);
        }

        let before = store.view().clone();
        let depth = store.depth();

        store.begin();
        for op in &inner {
            // Never end the frame under test or any frame below it.
            let ends_frame = matches!(op, Op::Commit | Op::Rollback);
            if ends_frame && store.depth() == depth + 1 {
                continue;
            }
            apply(&mut store, op);
        }
        while store.depth() > depth {
            store.rollback().unwrap();
        }

        prop_assert_eq!(store.view(), &before);
    }
}
