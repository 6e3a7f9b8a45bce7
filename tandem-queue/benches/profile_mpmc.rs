//! Profiling benchmark for latency percentiles under sustained load.
//!
//! Run with:
//!   cargo bench --bench profile_mpmc
//!
//! Or for perf analysis:
//!   cargo build --release --bench profile_mpmc
//!   perf stat -e cycles,instructions,cache-misses,branch-misses \
//!       ./target/release/deps/profile_mpmc-*

use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use tandem_queue::Queue;

const COUNT: u64 = 2_000_000;
const ITERATIONS: usize = 5;

// Latency test parameters
const LATENCY_SAMPLES: usize = 100_000;
const LATENCY_WARMUP: usize = 10_000;

fn bench_throughput(producers: usize, consumers: usize) -> Duration {
    let q = Arc::new(Queue::<u64>::new());
    let total = COUNT;
    let per_producer = total / producers as u64;
    let stop = Arc::new(AtomicBool::new(false));

    let start = Instant::now();

    let producer_handles: Vec<_> = (0..producers)
        .map(|_| {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                for i in 0..per_producer {
                    q.push(i);
                }
            })
        })
        .collect();

    let consumer_handles: Vec<_> = (0..consumers)
        .map(|_| {
            let q = Arc::clone(&q);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut received = 0u64;
                loop {
                    if let Some(v) = q.pop() {
                        black_box(v);
                        received += 1;
                    } else if stop.load(Ordering::Acquire) {
                        // Producers are done; drain stragglers and exit
                        while let Some(v) = q.pop() {
                            black_box(v);
                            received += 1;
                        }
                        break;
                    } else {
                        std::hint::spin_loop();
                    }
                }
                received
            })
        })
        .collect();

    for h in producer_handles {
        h.join().unwrap();
    }
    stop.store(true, Ordering::Release);

    let mut received = 0u64;
    for h in consumer_handles {
        received += h.join().unwrap();
    }
    let elapsed = start.elapsed();

    assert_eq!(received, per_producer * producers as u64);
    elapsed
}

fn profile_throughput() {
    for (producers, consumers) in [(1, 1), (2, 2), (4, 4)] {
        println!("== throughput {producers}p x {consumers}c ==");
        for i in 0..ITERATIONS {
            let elapsed = bench_throughput(producers, consumers);
            let rate = COUNT as f64 / elapsed.as_secs_f64() / 1e6;
            println!("  iter {i}: {elapsed:>10.2?}  ({rate:.1} M msgs/sec)");
        }
    }
}

fn profile_pop_latency() {
    println!("== pop latency under sustained push load ==");

    let q = Arc::new(Queue::<u64>::new());
    let stop = Arc::new(AtomicBool::new(false));

    let producer = {
        let q = Arc::clone(&q);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut i = 0u64;
            while !stop.load(Ordering::Acquire) {
                q.push(i);
                i += 1;
                // Keep the queue shallow so pops measure lock traffic,
                // not a long-resident cache-cold list
                if i % 64 == 0 {
                    while q.len() > 128 && !stop.load(Ordering::Acquire) {
                        std::hint::spin_loop();
                    }
                }
            }
        })
    };

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut recorded = 0usize;
    let mut warmup = 0usize;

    while recorded < LATENCY_SAMPLES {
        let start = Instant::now();
        let popped = q.pop();
        let nanos = start.elapsed().as_nanos() as u64;

        if popped.is_some() {
            if warmup < LATENCY_WARMUP {
                warmup += 1;
            } else {
                histogram.record(nanos).unwrap();
                recorded += 1;
            }
        }
    }

    stop.store(true, Ordering::Release);
    producer.join().unwrap();

    for pct in [50.0, 90.0, 99.0, 99.9, 99.99] {
        println!("  p{pct:<5}: {} ns", histogram.value_at_quantile(pct / 100.0));
    }
    println!("  max   : {} ns", histogram.max());
}

fn main() {
    profile_throughput();
    profile_pop_latency();
}
