//! Custom configuration example for txkv.
//!
//! Run with: cargo run --example custom_config

use txkv::{Command, Database, OptionsBuilder};

fn main() {
    tracing_subscriber::fmt::init();

    let options = OptionsBuilder::new()
        .initial_capacity(4096)
        .enable_metrics(true)
        .build();
    println!("Options: {:?}\n", options);

    let db = Database::with_options(options);

    let script = vec![
        Command::set("a", "red"),
        Command::set("b", "red"),
        Command::count("red"),
        Command::Begin,
        Command::delete("a"),
        Command::count("red"),
        Command::Rollback,
        Command::get("a"),
        Command::Commit,
    ];

    for command in script {
        match db.execute(command.clone()) {
            Ok(reply) => println!("{:<12} -> {}", command.to_string(), reply),
            Err(e) => println!("{:<12} -> error: {} ({})", command.to_string(), e, e.kind()),
        }
    }

    println!("\n--- Prometheus metrics ---\n{}", db.metrics().to_prometheus());
}
