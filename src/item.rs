//! Queue items: payload, priority class, and creation timestamp.

use std::fmt;
use std::time::{Duration, Instant};

/// Two-level ordering class for queued items.
///
/// Every `Urgent` item is dequeued before every `Normal` item that was
/// behind it at insertion time; order within each class is FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Normal,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Normal => "normal",
            Priority::Urgent => "urgent",
        };
        write!(f, "{label}")
    }
}

/// What an item carries: a value, or the poison-pill shutdown sentinel.
///
/// Poison is a distinct tag rather than a reserved in-band value, so the
/// full payload domain stays available to producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<T> {
    Value(T),
    Poison,
}

/// An immutable queue entry.
///
/// The timestamp is taken at construction; consumers read it back after
/// dequeue to compute time spent in the queue.
#[derive(Debug, Clone)]
pub struct Item<T> {
    payload: Payload<T>,
    priority: Priority,
    enqueued_at: Instant,
}

impl<T> Item<T> {
    /// Creates an item carrying `value` with the given priority class.
    pub fn new(value: T, priority: Priority) -> Self {
        Self {
            payload: Payload::Value(value),
            priority,
            enqueued_at: Instant::now(),
        }
    }

    /// Creates a poison-pill sentinel.
    ///
    /// Poison is always `Urgent` so it overtakes any normal backlog
    /// present when shutdown starts.
    pub fn poison() -> Self {
        Self {
            payload: Payload::Poison,
            priority: Priority::Urgent,
            enqueued_at: Instant::now(),
        }
    }

    /// Whether this item is the shutdown sentinel.
    pub fn is_poison(&self) -> bool {
        matches!(self.payload, Payload::Poison)
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Timestamp taken when the item was constructed.
    pub fn enqueued_at(&self) -> Instant {
        self.enqueued_at
    }

    /// Time elapsed since the item was constructed.
    pub fn latency(&self) -> Duration {
        self.enqueued_at.elapsed()
    }

    /// Borrows the carried value, or `None` for poison.
    pub fn value(&self) -> Option<&T> {
        match &self.payload {
            Payload::Value(value) => Some(value),
            Payload::Poison => None,
        }
    }

    /// Consumes the item, returning the carried value, or `None` for
    /// poison.
    pub fn into_value(self) -> Option<T> {
        match self.payload {
            Payload::Value(value) => Some(value),
            Payload::Poison => None,
        }
    }
}
