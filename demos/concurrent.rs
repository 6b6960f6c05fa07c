//! Concurrent access example for txkv.
//!
//! Run with: cargo run --example concurrent

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use txkv::Database;

fn main() {
    tracing_subscriber::fmt::init();

    let db = Arc::new(Database::new());

    println!("=== Concurrent Access Example ===\n");

    let num_writers = 4;
    let num_readers = 4;
    let ops_per_writer = 1000;
    let ops_per_reader = 2000;

    println!("Pre-populating 1000 keys...");
    for i in 0..1000 {
        db.set(format!("preload:{:05}", i), format!("bucket_{}", i % 10));
    }

    let start = Instant::now();
    let mut handles = vec![];

    for writer_id in 0..num_writers {
        let db = Arc::clone(&db);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_writer {
                db.set(format!("writer{}:{:05}", writer_id, i), format!("writer_{}", writer_id));
            }
            println!("Writer {} completed {} writes", writer_id, ops_per_writer);
        }));
    }

    for reader_id in 0..num_readers {
        let db = Arc::clone(&db);
        handles.push(thread::spawn(move || {
            let mut found = 0;
            for i in 0..ops_per_reader {
                if db.get(&format!("preload:{:05}", i % 1000)).is_some() {
                    found += 1;
                }
            }
            println!(
                "Reader {} completed {} reads ({} found)",
                reader_id, ops_per_reader, found
            );
        }));
    }

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let elapsed = start.elapsed();
    let total_ops = (num_writers * ops_per_writer) + (num_readers * ops_per_reader);

    println!("\n--- Summary ---");
    println!("Total operations: {}", total_ops);
    println!("Time: {:?}", elapsed);
    println!(
        "Throughput: {:.0} ops/sec",
        total_ops as f64 / elapsed.as_secs_f64()
    );

    println!("\n--- Verification ---");
    for writer_id in 0..num_writers {
        println!(
            "writer_{}: {:?} keys",
            writer_id,
            db.count(&format!("writer_{}", writer_id))
        );
    }

    println!("\n{}", db.metrics().summary());
}
