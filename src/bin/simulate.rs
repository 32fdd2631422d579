//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # Default: 1000 Warrior runs
//!   cargo run --bin simulate -- -n 100 -c mage     # 100 Mage runs
//!   cargo run --bin simulate -- --seed 42          # Reproducible run

use chronicles::character::CharacterClass;
use chronicles::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    let default_filter = if config.verbosity >= 2 { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CHRONICLES BALANCE SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Class:          {}", config.class);
    println!("  Battles/Run:    {}", config.battles_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, json) {
            eprintln!("Failed to write JSON report: {}", e);
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_args(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                config.num_runs = flag_value(args, i, flag)?
                    .parse()
                    .map_err(|_| format!("invalid run count: {}", args[i + 1]))?;
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = Some(
                    flag_value(args, i, flag)?
                        .parse()
                        .map_err(|_| format!("invalid seed: {}", args[i + 1]))?,
                );
                i += 1;
            }
            "-c" | "--class" => {
                let class: CharacterClass = flag_value(args, i, flag)?
                    .parse()
                    .map_err(|e| format!("{}", e))?;
                config.class = class;
                i += 1;
            }
            "-b" | "--battles" => {
                config.battles_per_run = flag_value(args, i, flag)?
                    .parse()
                    .map_err(|_| format!("invalid battle count: {}", args[i + 1]))?;
                i += 1;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--json" => {}
            "--quick" => {
                config = SimConfig::quick_balance_check();
            }
            "--long" => {
                config = SimConfig::long_campaign();
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Chronicles Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulated characters (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -c, --class <C>     Warrior, Mage, Rogue or Cleric (default: Warrior)");
    println!("    -b, --battles <B>   Battles per character (default: 100)");
    println!("    -v, --verbose       Per-run output and info-level logs");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (100 runs, 30 battles)");
    println!("    --long              Long campaigns (200 runs, 500 battles)");
    println!("    -h, --help          Show this help");
    println!();
    println!("Logging honours RUST_LOG, e.g. RUST_LOG=chronicles=debug.");
}
