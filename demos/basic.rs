//! Basic usage example for txkv.
//!
//! Run with: cargo run --example basic

use txkv::Database;

fn main() -> txkv::Result<()> {
    tracing_subscriber::fmt::init();

    let db = Database::new();

    // Set some values
    db.set("name", "Alice");
    db.set("city", "San Francisco");
    db.set("country", "USA");
    db.set("home_country", "USA");

    println!("Stored {} key-value pairs", db.len());

    if let Some(name) = db.get("name") {
        println!("name = {}", name);
    }

    // Reverse lookup by value
    println!("keys holding USA: {:?}", db.count("USA"));

    match db.get("nonexistent") {
        Some(_) => println!("Found nonexistent key (unexpected)"),
        None => println!("Key 'nonexistent' not found (expected)"),
    }

    // Update a value
    db.set("city", "New York");
    println!("Updated city = {:?}", db.get("city"));
    println!("keys holding San Francisco: {:?}", db.count("San Francisco"));

    // Delete a value
    let removed = db.delete("country")?;
    println!("Deleted country (was {})", removed);
    println!("keys holding USA: {:?}", db.count("USA"));

    println!("\n{}", db.stats());
    Ok(())
}
