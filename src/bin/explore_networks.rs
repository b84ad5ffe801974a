//! Network exploration tool for TILESORT
//!
//! This binary exercises the sorting engine across team sizes, network
//! topologies, and execution models, and can be used for quick manual
//! timing comparisons.

use std::time::Instant;

use tilesort::{
    is_sorted, sort_buffer_with, sort_tile, ExecutionModel, Network, SortConfig,
};

fn main() {
    println!("TILESORT Network Explorer");
    println!("=========================\n");

    let args: Vec<String> = std::env::args().collect();
    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("demo");

    match mode {
        "demo" => run_demo(),
        "timings" => run_timings(),
        "rounds" => show_round_counts(),
        _ => print_usage(),
    }
}

fn print_usage() {
    println!("Usage: explore_networks <mode>");
    println!();
    println!("Modes:");
    println!("  demo     - Sort a small tile with both networks");
    println!("  timings  - Time both networks and execution models");
    println!("  rounds   - Show round counts per team size");
}

fn run_demo() {
    let input = [3u32, 1, 4, 2];
    println!("Input tile: {:?}\n", input);

    for network in [Network::Bitonic, Network::OddEvenTransposition] {
        let mut tile = input;
        sort_tile(tile.len(), network, &mut tile).expect("power-of-two tile");
        println!("{:?} -> {:?}", network, tile);
    }
}

fn show_round_counts() {
    println!("{:>6} {:>10} {:>10}", "lanes", "bitonic", "odd-even");
    for exp in 0..=10u32 {
        let lanes = 1usize << exp;
        let team = tilesort::TeamSize::new(lanes).unwrap();
        println!(
            "{:>6} {:>10} {:>10}",
            lanes,
            Network::Bitonic.round_count(team),
            Network::OddEvenTransposition.round_count(team)
        );
    }
}

/// Deterministic worst-ish-case pattern: descending sawtooth across the
/// whole buffer, so every tile starts fully reversed.
fn sawtooth(len: usize, tile: usize) -> Vec<u32> {
    (0..len).map(|i| (tile - 1 - (i % tile)) as u32).collect()
}

fn run_timings() {
    const BUFFER_LEN: usize = 1 << 16;

    println!(
        "Sorting {} elements per run, tile-parallel\n",
        BUFFER_LEN
    );
    println!(
        "{:>6} {:>24} {:>10} {:>12}",
        "lanes", "network", "model", "elapsed"
    );

    for exp in [4u32, 6, 8] {
        let lanes = 1usize << exp;
        for network in [Network::Bitonic, Network::OddEvenTransposition] {
            for model in [ExecutionModel::Threaded, ExecutionModel::Lockstep] {
                let mut data = sawtooth(BUFFER_LEN, lanes);
                let config = SortConfig::with_execution(model);

                let start = Instant::now();
                sort_buffer_with(&config, lanes, network, &mut data)
                    .expect("aligned power-of-two partition");
                let elapsed = start.elapsed();

                for chunk in data.chunks(lanes) {
                    assert!(is_sorted(chunk));
                }
                println!(
                    "{:>6} {:>24} {:>10} {:>10.2?}",
                    lanes,
                    format!("{:?}", network),
                    format!("{:?}", model),
                    elapsed
                );
            }
        }
    }
}
