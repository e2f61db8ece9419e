//! Counting semaphore used for capacity accounting.
//!
//! A mutex-guarded permit count paired with a condition variable:
//! `acquire` waits while the count is zero, then decrements; `release`
//! increments and wakes one waiter.

use parking_lot::{Condvar, Mutex};

/// A counting semaphore tracking available resource units.
pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    /// Creates a semaphore holding `permits` units.
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Takes one permit, blocking the calling thread while none are
    /// available.
    pub fn acquire(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Takes one permit without blocking.
    ///
    /// Returns `false` if no permit was available.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Returns one permit and wakes a single blocked waiter, if any.
    pub fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        self.available.notify_one();
    }

    /// Current permit count.
    ///
    /// Only a snapshot: concurrent acquire/release may change the value
    /// before the caller looks at it.
    pub fn permits(&self) -> usize {
        *self.permits.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn counts_down_and_up() {
        let sem = Semaphore::new(2);
        sem.acquire();
        sem.acquire();
        assert_eq!(sem.permits(), 0);
        assert!(!sem.try_acquire());
        sem.release();
        assert_eq!(sem.permits(), 1);
        assert!(sem.try_acquire());
    }

    #[test]
    fn acquire_blocks_until_release() {
        let sem = Arc::new(Semaphore::new(0));
        let sem2 = Arc::clone(&sem);

        let waiter = thread::spawn(move || {
            sem2.acquire();
        });

        // Give the waiter time to park on the condvar.
        thread::sleep(Duration::from_millis(50));
        assert!(!waiter.is_finished());

        sem.release();
        waiter.join().unwrap();
        assert_eq!(sem.permits(), 0);
    }

    #[test]
    fn release_wakes_one_waiter_per_permit() {
        const WAITERS: usize = 4;
        let sem = Arc::new(Semaphore::new(0));

        let handles: Vec<_> = (0..WAITERS)
            .map(|_| {
                let sem = Arc::clone(&sem);
                thread::spawn(move || sem.acquire())
            })
            .collect();

        for _ in 0..WAITERS {
            sem.release();
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(sem.permits(), 0);
    }
}
