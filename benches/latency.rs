use bounded_queue_rs::{BoundedQueue, Item, Priority};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::thread;

// Queue capacity for benchmarks
const CAPACITY: usize = 64;
// Number of ping-pong round trips per benchmark iteration
const PING_PONGS: usize = 10_000;

fn run_ping_pong(priority: Priority) {
    let q1 = Arc::new(BoundedQueue::new(CAPACITY).expect("capacity is positive"));
    let q2 = Arc::new(BoundedQueue::new(CAPACITY).expect("capacity is positive"));

    // Ping thread
    let q1_ping = Arc::clone(&q1);
    let q2_ping = Arc::clone(&q2);
    let ping_thread = thread::spawn(move || {
        for i in 0..PING_PONGS {
            q1_ping.enqueue(Item::new(black_box(i as u32), priority));
            black_box(q2_ping.dequeue().into_value());
        }
    });

    // Pong thread
    let pong_thread = thread::spawn(move || {
        for _ in 0..PING_PONGS {
            let item = q1.dequeue();
            let value = item.into_value().expect("ping sends values only");
            q2.enqueue(Item::new(black_box(value), priority));
        }
    });

    ping_thread.join().unwrap();
    pong_thread.join().unwrap();
}

fn bench_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency");

    group.bench_function(BenchmarkId::new("ping_pong", "normal"), |b| {
        b.iter(|| run_ping_pong(Priority::Normal))
    });

    group.bench_function(BenchmarkId::new("ping_pong", "urgent"), |b| {
        b.iter(|| run_ping_pong(Priority::Urgent))
    });

    group.finish();
}

criterion_group!(benches, bench_latency);
criterion_main!(benches);
