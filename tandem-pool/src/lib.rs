//! Producer/consumer worker pool over [`tandem_queue`].
//!
//! Spawns N producer threads that push numbered work items into one shared
//! queue and M consumer threads that pop them in a polling loop. Shutdown
//! is a queue-level protocol, not a queue feature: once every producer has
//! finished, one shutdown sentinel task is pushed per consumer, and a
//! consumer exits when it pops one. The queue itself only ever sees
//! `push` and `pop`.
//!
//! The pool exists to exercise the queue's multi-producer multi-consumer
//! contract end to end: the [`PoolReport`] carries enough (counts and
//! checksums) to verify that every produced item was consumed exactly
//! once.
//!
//! # Example
//!
//! ```
//! use tandem_pool::{PoolConfig, run};
//!
//! let report = run(&PoolConfig {
//!     producers: 2,
//!     consumers: 2,
//!     items_per_producer: 1_000,
//! })
//! .unwrap();
//!
//! assert_eq!(report.consumed, 2_000);
//! assert!(report.is_conserved());
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_utils::Backoff;
use thiserror::Error;
use tracing::debug;

use tandem_queue::Queue;

/// A unit of work flowing through the pool.
///
/// The queue carries no notion of shutdown; `Shutdown` is an ordinary
/// payload that consumers give meaning to.
enum Task {
    /// A numbered work item.
    Item(u64),
    /// Tells the consumer that pops it to exit its loop.
    Shutdown,
}

/// Pool shape: how many workers on each side, and how much work.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of producer threads.
    pub producers: usize,
    /// Number of consumer threads.
    pub consumers: usize,
    /// Items each producer pushes before finishing.
    pub items_per_producer: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            producers: 4,
            consumers: 4,
            items_per_producer: 1_000_000,
        }
    }
}

/// What happened during a [`run`].
#[derive(Debug, Clone)]
pub struct PoolReport {
    /// Items pushed by all producers.
    pub produced: u64,
    /// Items popped by all consumers (shutdown sentinels not counted).
    pub consumed: u64,
    /// Sum of all produced item values.
    pub produced_sum: u64,
    /// Sum of all consumed item values.
    pub consumed_sum: u64,
    /// Wall time from first spawn to last join.
    pub elapsed: Duration,
}

impl PoolReport {
    /// Returns `true` if every produced item was consumed exactly once.
    ///
    /// Counts alone cannot tell a duplicated item from a lost one if both
    /// happen; the checksum comparison closes that hole for distinct item
    /// values.
    pub fn is_conserved(&self) -> bool {
        self.produced == self.consumed && self.produced_sum == self.consumed_sum
    }
}

/// Pool setup or worker failure.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool needs at least one worker on each side.
    #[error("pool needs at least one producer and one consumer")]
    EmptyPool,

    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn {role} thread")]
    Spawn {
        /// Which side of the pool the thread belonged to.
        role: &'static str,
        /// The underlying spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked; its work is lost.
    #[error("{role} thread panicked")]
    WorkerPanic {
        /// Which side of the pool the thread belonged to.
        role: &'static str,
    },
}

/// Runs a full produce/consume cycle and reports what moved.
///
/// Producer `p` pushes the values `p * items_per_producer .. (p + 1) *
/// items_per_producer`, so every item value across the whole run is
/// distinct. After all producers are joined, one shutdown sentinel per
/// consumer is pushed; consumers poll with exponential backoff between
/// empty pops and exit on the sentinel.
///
/// # Errors
///
/// [`PoolError::EmptyPool`] for a side with zero workers,
/// [`PoolError::Spawn`] if the OS cannot start a thread, and
/// [`PoolError::WorkerPanic`] if any worker panics.
pub fn run(config: &PoolConfig) -> Result<PoolReport, PoolError> {
    if config.producers == 0 || config.consumers == 0 {
        return Err(PoolError::EmptyPool);
    }

    let queue: Arc<Queue<Task>> = Arc::new(Queue::new());
    let start = Instant::now();

    let producers: Vec<JoinHandle<()>> = (0..config.producers)
        .map(|p| {
            let queue = Arc::clone(&queue);
            let items = config.items_per_producer;

            thread::Builder::new()
                .name(format!("producer-{p}"))
                .spawn(move || {
                    let base = (p * items) as u64;
                    for i in 0..items as u64 {
                        queue.push(Task::Item(base + i));
                    }
                    debug!(producer = p, items, "producer finished");
                })
                .map_err(|source| PoolError::Spawn {
                    role: "producer",
                    source,
                })
        })
        .collect::<Result<_, _>>()?;

    let consumers: Vec<JoinHandle<(u64, u64)>> = (0..config.consumers)
        .map(|k| {
            let queue = Arc::clone(&queue);

            thread::Builder::new()
                .name(format!("consumer-{k}"))
                .spawn(move || {
                    let backoff = Backoff::new();
                    let mut count = 0u64;
                    let mut sum = 0u64;

                    loop {
                        match queue.pop() {
                            Some(Task::Item(value)) => {
                                count += 1;
                                sum += value;
                                backoff.reset();
                            }
                            Some(Task::Shutdown) => break,
                            None => backoff.snooze(),
                        }
                    }

                    debug!(consumer = k, count, "consumer finished");
                    (count, sum)
                })
                .map_err(|source| PoolError::Spawn {
                    role: "consumer",
                    source,
                })
        })
        .collect::<Result<_, _>>()?;

    for handle in producers {
        handle
            .join()
            .map_err(|_| PoolError::WorkerPanic { role: "producer" })?;
    }
    debug!("all producers joined, pushing shutdown sentinels");

    // One sentinel per consumer: each consumer pops at most one.
    for _ in 0..config.consumers {
        queue.push(Task::Shutdown);
    }

    let mut consumed = 0u64;
    let mut consumed_sum = 0u64;
    for handle in consumers {
        let (count, sum) = handle
            .join()
            .map_err(|_| PoolError::WorkerPanic { role: "consumer" })?;
        consumed += count;
        consumed_sum += sum;
    }

    let produced = (config.producers * config.items_per_producer) as u64;
    // Values are 0..produced, each exactly once.
    let produced_sum = produced * produced.saturating_sub(1) / 2;

    Ok(PoolReport {
        produced,
        consumed,
        produced_sum,
        consumed_sum,
        elapsed: start.elapsed(),
    })
}
