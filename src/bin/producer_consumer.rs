// Demo driver: P producers push random two-priority items through one
// shared bounded queue, C consumers drain it, and shutdown happens via
// one poison pill per consumer once every producer has joined. Prints a
// per-event trace and a final performance report.

use bounded_queue_rs::{BoundedQueue, Item, LatencyStats, Priority};
use rand::Rng;
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Items each producer generates before exiting.
const ITEMS_PER_PRODUCER: usize = 20;

/// Probability that a produced item is urgent.
const URGENT_RATIO: f64 = 0.25;

struct Config {
    producers: usize,
    consumers: usize,
    capacity: usize,
}

/// Parses `<producers> <consumers> <capacity>` from argv.
///
/// All three must be positive integers; anything else is a usage error
/// reported before any queue or thread exists.
fn parse_config() -> Result<Config, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        return Err("expected exactly three arguments".to_string());
    }

    let mut values = [0usize; 3];
    for (slot, arg) in values.iter_mut().zip(&args) {
        match arg.parse::<usize>() {
            Ok(value) if value > 0 => *slot = value,
            _ => return Err(format!("'{arg}' is not a positive integer")),
        }
    }

    Ok(Config {
        producers: values[0],
        consumers: values[1],
        capacity: values[2],
    })
}

fn producer(id: usize, queue: &BoundedQueue<u32>, stats: &LatencyStats) {
    let mut rng = rand::rng();
    for _ in 0..ITEMS_PER_PRODUCER {
        let value: u32 = rng.random_range(1..=1000);
        let priority = if rng.random_bool(URGENT_RATIO) {
            Priority::Urgent
        } else {
            Priority::Normal
        };

        queue.enqueue(Item::new(value, priority));
        stats.record_produced();
        println!("[P{id}] produced {value} ({priority})");
    }
    println!("[P{id}] finished");
}

fn consumer(id: usize, queue: &BoundedQueue<u32>, stats: &LatencyStats) {
    loop {
        let item = queue.dequeue();
        if item.is_poison() {
            println!("[C{id}] received poison pill, terminating");
            break;
        }

        let latency = item.latency();
        let priority = item.priority();
        stats.record_consumed(latency);
        if let Some(value) = item.value() {
            println!("[C{id}] consumed {value} ({priority}, latency {latency:?})");
        }
    }
}

fn main() {
    let config = match parse_config() {
        Ok(config) => config,
        Err(reason) => {
            eprintln!("error: {reason}");
            eprintln!("usage: producer_consumer <producers> <consumers> <capacity>");
            process::exit(1);
        }
    };

    println!(
        "Configuration: {} producers, {} consumers, capacity {}",
        config.producers, config.consumers, config.capacity
    );
    println!("Each producer generates {ITEMS_PER_PRODUCER} items\n");

    let queue = match BoundedQueue::new(config.capacity) {
        Ok(queue) => Arc::new(queue),
        Err(error) => {
            eprintln!("error: {error}");
            process::exit(1);
        }
    };
    let stats = Arc::new(LatencyStats::new());
    let start = Instant::now();

    let mut producer_handles = Vec::with_capacity(config.producers);
    for id in 1..=config.producers {
        let queue = Arc::clone(&queue);
        let stats = Arc::clone(&stats);
        producer_handles.push(thread::spawn(move || producer(id, &queue, &stats)));
    }

    let mut consumer_handles = Vec::with_capacity(config.consumers);
    for id in 1..=config.consumers {
        let queue = Arc::clone(&queue);
        let stats = Arc::clone(&stats);
        consumer_handles.push(thread::spawn(move || consumer(id, &queue, &stats)));
    }

    for handle in producer_handles {
        handle.join().expect("producer thread panicked");
    }
    println!("\nAll producers finished.");

    println!("Inserting {} poison pill(s)...", config.consumers);
    for _ in 0..config.consumers {
        queue.enqueue(Item::poison());
    }

    for handle in consumer_handles {
        handle.join().expect("consumer thread panicked");
    }
    println!("All consumers finished.\n");

    let elapsed = start.elapsed();
    let snapshot = stats.snapshot();
    println!("========== Performance Report ==========");
    println!("Items produced:   {}", snapshot.produced);
    println!("Items consumed:   {}", snapshot.consumed);
    println!("Elapsed time:     {elapsed:?}");
    println!("Average latency:  {:?}", snapshot.average_latency());
    if let (Some(min), Some(max)) = (snapshot.min_latency, snapshot.max_latency) {
        println!("Latency min/max:  {min:?} / {max:?}");
    }
    println!(
        "Throughput:       {:.2} items/second",
        snapshot.throughput(elapsed)
    );
    println!("========================================");
}
