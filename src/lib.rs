//! # bounded_queue_rs
//!
//! A bounded blocking multiple-producer-multiple-consumer queue based on a
//! circular buffer, extended with two-level priority ordering and a
//! poison-pill shutdown convention.
//!
//! Urgent items overtake normal items without overtaking other urgent
//! items: the ring always holds an urgent run followed by a normal run,
//! each FIFO. Producers block while the queue is full, consumers block
//! while it is empty; capacity is enforced by two counting semaphores and
//! structural mutation happens inside a single mutex-guarded critical
//! section.
//!
//! Shutdown is cooperative: after all producers are done, the owning
//! thread enqueues one [`Item::poison`] per consumer, and each consumer
//! exits its loop on the first poison it dequeues.

mod semaphore;

pub mod item;
pub mod queue;
pub mod stats;

// Re-exports for convenience
pub use item::{Item, Payload, Priority};
pub use queue::{BoundedQueue, QueueError};
pub use stats::{LatencyStats, StatsSnapshot};
