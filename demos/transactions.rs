//! Transaction example for txkv.
//!
//! Run with: cargo run --example transactions

use txkv::{Database, Error};

fn main() -> txkv::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let db = Database::new();

    println!("=== Transaction Example ===\n");

    db.set("account:alice", "1000");
    db.set("account:bob", "500");
    println!("Initial balances:");
    print_balances(&db);

    // Successful transaction: transfer 200 from Alice to Bob
    println!("\n--- Transfer 200 from Alice to Bob ---");
    db.begin();
    let alice = balance(&db, "account:alice");
    let bob = balance(&db, "account:bob");
    db.set("account:alice", (alice - 200).to_string());
    db.set("account:bob", (bob + 200).to_string());
    db.commit()?;
    println!("Transaction committed!");
    print_balances(&db);

    // Transaction with rollback
    println!("\n--- Attempt transfer 2000 (will rollback) ---");
    db.begin();
    let alice = balance(&db, "account:alice");
    db.set("account:alice", (alice - 2000).to_string());
    if balance(&db, "account:alice") < 0 {
        println!("Insufficient funds! Rolling back...");
        db.rollback()?;
    } else {
        db.commit()?;
    }
    print_balances(&db);

    // Nested transactions
    println!("\n--- Nested: inner commit, outer rollback ---");
    db.begin();
    db.begin();
    db.set("account:bob", "0");
    db.commit()?;
    println!("After inner commit (depth {}):", db.depth());
    print_balances(&db);
    db.rollback()?;
    println!("After outer rollback (depth {}):", db.depth());
    print_balances(&db);

    // Ending a transaction that was never begun
    match db.commit() {
        Err(Error::TransactionIsEmpty) => println!("\nCommit with nothing open: rejected"),
        other => println!("\nUnexpected: {:?}", other),
    }

    println!("\n=== Transaction Example Complete ===");
    Ok(())
}

fn balance(db: &Database, key: &str) -> i64 {
    db.get(key).and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn print_balances(db: &Database) {
    for (name, key) in [("Alice", "account:alice"), ("Bob", "account:bob")] {
        if let Some(value) = db.get(key) {
            println!("  {}: {}", name, value);
        }
    }
}
