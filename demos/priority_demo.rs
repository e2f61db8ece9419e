use bounded_queue_rs::{BoundedQueue, Item, Priority};
use std::sync::Arc;
use std::thread;

fn main() {
    println!("BoundedQueue priority demo");
    println!("--------------------------\n");

    // Single-threaded walkthrough of the ordering contract.
    let queue = BoundedQueue::new(8).expect("capacity is positive");
    queue.enqueue(Item::new("first normal", Priority::Normal));
    queue.enqueue(Item::new("second normal", Priority::Normal));
    queue.enqueue(Item::new("first urgent", Priority::Urgent));
    queue.enqueue(Item::new("second urgent", Priority::Urgent));
    queue.enqueue(Item::new("third normal", Priority::Normal));

    println!("Dequeue order (urgent run first, FIFO within each class):");
    while let Some(item) = queue.try_dequeue() {
        let priority = item.priority();
        if let Some(value) = item.value() {
            println!("  {value} ({priority})");
        }
    }

    // Poison-pill shutdown across threads.
    const CONSUMERS: usize = 2;
    let queue = Arc::new(BoundedQueue::new(4).expect("capacity is positive"));

    println!("\nStarting {CONSUMERS} consumers, then shutting them down:");
    let handles: Vec<_> = (1..=CONSUMERS)
        .map(|id| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                loop {
                    let item = queue.dequeue();
                    if item.is_poison() {
                        println!("  consumer {id}: poison received, exiting");
                        break;
                    }
                    if let Some(value) = item.value() {
                        println!("  consumer {id}: got {value}");
                    }
                }
            })
        })
        .collect();

    for value in 1..=6 {
        queue.enqueue(Item::new(value, Priority::Normal));
    }
    for _ in 0..CONSUMERS {
        queue.enqueue(Item::poison());
    }

    for handle in handles {
        handle.join().expect("consumer panicked");
    }
    println!("\nAll consumers terminated cleanly.");
}
