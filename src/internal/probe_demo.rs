//! Console demonstration of the quadratic probing table.
//!
//! Replays the classic walkthrough (two fruit keys, a containment check, an
//! in-place update) and then measures probe lengths over random keys for a
//! few `(c, d)` parameter pairs at increasing load factors.

#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]

use quadmap::{QuadMap, QuadMapExtensions};
use rand::Rng;

// A prime slot count keeps the quadratic sequence from folding onto itself
// as quickly as a power of two would.
const EXPERIMENT_CAPACITY: usize = 1009;
const PARAMETER_PAIRS: [(i64, i64); 3] = [(1, 1), (1, 3), (3, 7)];
const LOAD_FACTORS: [f64; 4] = [0.25, 0.50, 0.70, 0.85];
const MAX_PROBES: usize = EXPERIMENT_CAPACITY;

fn quadratic_index(base: usize, c: i64, d: i64, attempt: usize, capacity: usize) -> usize {
    let i = attempt as i64;
    let step = c.wrapping_mul(i).wrapping_add(d.wrapping_mul(i).wrapping_mul(i));
    (base as i64).wrapping_add(step).rem_euclid(capacity as i64) as usize
}

// Fills a simulated table with random keys up to the requested load factor
// and reports (average probes, worst-case probes, rejected keys).
fn probe_experiment(c: i64, d: i64, load: f64) -> (f64, usize, usize) {
    let mut rng = rand::rng();
    let mut table: Vec<Option<u64>> = vec![None; EXPERIMENT_CAPACITY];
    let target = (EXPERIMENT_CAPACITY as f64 * load) as usize;
    let mut probe_counts: Vec<usize> = Vec::with_capacity(target);
    let mut rejected = 0usize;

    while probe_counts.len() < target {
        let key: u64 = rng.random();
        let base = (key % EXPERIMENT_CAPACITY as u64) as usize;
        let mut placed = false;

        for attempt in 0..MAX_PROBES {
            let index = quadratic_index(base, c, d, attempt, EXPERIMENT_CAPACITY);
            if table[index].is_none() {
                table[index] = Some(key);
                probe_counts.push(attempt + 1);
                placed = true;
                break;
            }
        }

        if !placed {
            // the sequence could not reach a free slot for this key
            rejected += 1;
            if rejected > target {
                break;
            }
        }
    }

    let average = probe_counts.iter().sum::<usize>() as f64 / probe_counts.len().max(1) as f64;
    let worst = probe_counts.iter().copied().max().unwrap_or(0);
    (average, worst, rejected)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut table = QuadMap::new();

    table.insert("apple".to_string(), 5)?;
    table.insert("banana".to_string(), 10)?;

    for (slot, entries) in table.iter() {
        println!("Hash: {slot}");
        for entry in entries {
            println!("{}: {}", entry.key(), entry.value());
        }
        println!();
    }

    if table.contains("apple") {
        println!("Apple is in the table.");
    }

    *table.get_or_insert("apple") = 7;
    println!("Value of apple: {}", table.get_or_insert("apple"));
    println!("Keys: {:?}", table.keys());
    println!();

    println!("Probe lengths over {EXPERIMENT_CAPACITY} slots:");
    for (c, d) in PARAMETER_PAIRS {
        for load in LOAD_FACTORS {
            let (average, worst, rejected) = probe_experiment(c, d, load);
            println!(
                "  c={c} d={d} load={load:.2}: avg probes = {average:.2}, worst = {worst}, rejected = {rejected}"
            );
        }
    }

    Ok(())
}
