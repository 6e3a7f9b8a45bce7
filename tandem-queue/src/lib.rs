//! # tandem-queue
//!
//! An unbounded multi-producer multi-consumer FIFO queue built on the
//! classic two-lock design: one mutex for the head (pops), one mutex for
//! the tail (pushes), and nothing shared between them except a single
//! atomic link field.
//!
//! ## Why two locks
//!
//! A `Mutex<VecDeque<T>>` serializes everything: a producer appending and
//! a consumer removing fight over one lock even though they touch opposite
//! ends of the structure. Lock-free queues avoid that but buy ABA hazards,
//! retry loops, and deferred reclamation schemes. The two-lock queue sits
//! between the two: an enqueue and a dequeue always run in parallel, only
//! same-side operations serialize, and memory reclamation is a plain free
//! at a single well-defined point.
//!
//! ```text
//!   pops (head lock)                         pushes (tail lock)
//!        │                                         │
//!        ▼                                         ▼
//!  ┌──────────┐     ┌─────────┐     ┌─────────┐
//!  │ sentinel │ ──▶ │ oldest  │ ──▶ │ newest  │ ──▶ null
//!  └──────────┘     └─────────┘     └─────────┘
//! ```
//!
//! The list always starts with a sentinel node that carries no value, so a
//! pop uniformly operates on "the node after the head" whether the queue
//! is empty or not, and the two lock domains never share a pointer field.
//!
//! ## The single-node handoff
//!
//! The one place the two sides can meet is a queue holding exactly one
//! node: a push is linking a successor onto the same node whose link a pop
//! is reading. That link is an atomic pointer written once (Release) and
//! observed at most once per pop (Acquire); the pop sees either null and
//! reports empty, or the published node with its payload visible. No
//! ordering between the two locks exists or is needed, which is also why
//! no deadlock is possible.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use tandem_queue::Queue;
//!
//! let queue = Arc::new(Queue::new());
//!
//! let producers: Vec<_> = (0..4)
//!     .map(|p| {
//!         let queue = Arc::clone(&queue);
//!         thread::spawn(move || {
//!             for i in 0..100u64 {
//!                 queue.push(p * 100 + i);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in producers {
//!     handle.join().unwrap();
//! }
//!
//! let mut total = 0;
//! while queue.pop().is_some() {
//!     total += 1;
//! }
//! assert_eq!(total, 400);
//! ```
//!
//! ## When to use this
//!
//! Use `tandem-queue` when:
//! - Many producers and many consumers share one unbounded FIFO
//! - You want enqueue and dequeue to never block each other
//! - You prefer predictable blocking over lock-free retry loops
//!
//! Consider alternatives when:
//! - Bounded capacity with backpressure → use `crossbeam-queue`'s
//!   `ArrayQueue`
//! - The last ounce of throughput under heavy same-side contention →
//!   use `crossbeam-queue`'s `SegQueue`
//! - Blocking receives or `select!` → use `crossbeam-channel`
//! - Exactly one producer and one consumer → an SPSC ring buffer beats
//!   any locked design
//!
//! There is deliberately no wait-for-item primitive: `pop` on an empty
//! queue returns `None` immediately, and shutdown is the caller's
//! protocol (a common one being a sentinel payload per consumer).
//!
//! ## Verifying the handoff
//!
//! The Release/Acquire pair described above is exercised exhaustively
//! under [loom](https://docs.rs/loom):
//!
//! ```bash
//! RUSTFLAGS="--cfg loom" cargo test -p tandem-queue --lib --release loom_
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod mpmc;
mod sync;

pub use mpmc::Queue;
