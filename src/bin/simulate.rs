//! Headless autopilot simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # 100 runs, default constants
//!   cargo run --bin simulate -- -n 500 --seed 42   # reproducible batch
//!   cargo run --bin simulate -- --config my.toml   # try tuned constants

use dino_sura::config::Config;
use dino_sura::logging;
use dino_sura::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    logging::init_stderr();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DINO SURA AUTOPILOT                              ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Ticks:      {}", config.max_ticks_per_run);
    println!("  Lookahead:      {} ticks", config.lookahead_ticks);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write {}: {}", filename, e);
                process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "-l" | "--lookahead" => {
                if i + 1 < args.len() {
                    config.lookahead_ticks = args[i + 1].parse().unwrap_or(8.0);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config.game = match Config::load(Path::new(&args[i + 1])) {
                        Ok(game) => game,
                        Err(e) => {
                            eprintln!("{}", e);
                            process::exit(1);
                        }
                    };
                    i += 1;
                }
            }
            "--json" => {}
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    config
}

fn print_help() {
    eprintln!(
        "Usage: simulate [OPTIONS]

Options:
  -n, --runs <N>        Number of runs (default 100)
  -s, --seed <SEED>     Base seed for reproducible runs
  -t, --ticks <N>       Tick limit per run (default 100000)
  -l, --lookahead <T>   Autopilot jump lookahead in ticks (default 8)
  -c, --config <PATH>   Game constants TOML
      --json            Also write the report as JSON
  -h, --help            Show this help"
    );
}
