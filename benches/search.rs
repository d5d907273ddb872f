use std::time::{Duration, Instant};

use roomplan::engine::{find_optimal_assignment, Engine};
use roomplan::model::*;
use roomplan::topology::room_number;

const ITERATIONS: usize = 200;

/// Sorts `samples` and prints one line: count, mean and tail quantiles in microseconds.
fn report(label: &str, samples: &mut [Duration]) {
    if samples.is_empty() {
        println!("{label:<28} no samples");
        return;
    }
    samples.sort_unstable();
    let us = |d: Duration| d.as_secs_f64() * 1e6;
    let at = |q: f64| us(samples[((samples.len() - 1) as f64 * q).round() as usize]);
    let mean = samples.iter().map(|&d| us(d)).sum::<f64>() / samples.len() as f64;
    println!(
        "{label:<28} {:>5} runs  mean {mean:>9.1}us  median {:>9.1}us  p95 {:>9.1}us  worst {:>9.1}us",
        samples.len(),
        at(0.5),
        at(0.95),
        at(1.0),
    );
}

/// `free_per_floor` free rooms on every floor. With `count - 1` free per floor no
/// floor fits the request and every subset is evaluated (C(40, 5) for five rooms).
fn fragmented_inventory(free_per_floor: u8) -> Inventory {
    let mut inv = Inventory::new();
    let taken: Vec<RoomNumber> = (1..=10u8)
        .flat_map(|f| (free_per_floor + 1..=10u8).filter_map(move |p| room_number(f, p)))
        .collect();
    inv.occupy(&taken).expect("all rooms start available");
    inv
}

fn bench_same_floor() {
    let inv = Inventory::new();
    for count in 1..=5 {
        let mut latencies = Vec::with_capacity(ITERATIONS);
        for _ in 0..ITERATIONS {
            let start = Instant::now();
            let a = find_optimal_assignment(&inv, count).expect("search failed");
            latencies.push(start.elapsed());
            assert_eq!(a.phase, SearchPhase::SameFloor);
        }
        report(&format!("same floor, {count} rooms"), &mut latencies);
    }
}

fn bench_fallback() {
    for count in 2..=5u8 {
        let inv = fragmented_inventory(count - 1);
        let count = count as usize;
        let mut latencies = Vec::with_capacity(ITERATIONS / 10);
        for _ in 0..ITERATIONS / 10 {
            let start = Instant::now();
            let a = find_optimal_assignment(&inv, count).expect("search failed");
            latencies.push(start.elapsed());
            assert_eq!(a.phase, SearchPhase::CrossFloor);
        }
        report(&format!("cross floor, {count} rooms"), &mut latencies);
    }
}

fn bench_book_until_full() {
    let mut latencies = Vec::new();
    for _ in 0..ITERATIONS / 10 {
        let engine = Engine::default();
        tokio_test::block_on(async {
            loop {
                let start = Instant::now();
                let result = engine.book(3).await;
                latencies.push(start.elapsed());
                if result.is_err() {
                    break;
                }
            }
        });
    }
    report("book 3 until full", &mut latencies);
}

fn main() {
    println!("roomplan search benchmark");
    bench_same_floor();
    bench_fallback();
    bench_book_until_full();
}
