//! pooling-engine CLI
//!
//! Run liquidity aggregation and pooling simulation from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full derived state from a JSON entry file
//! pooling-engine simulate --input entries.json
//!
//! # Output as JSON, with custom what-if parameters
//! pooling-engine simulate --input entries.json --format json --haircut 10
//!
//! # Totals only
//! pooling-engine aggregate --input entries.json
//!
//! # Generate a random client book for testing
//! pooling-engine generate --clients 20
//! ```

use pooling_engine::aggregation::aggregator::PositionAggregator;
use pooling_engine::analysis::what_if::WhatIfParams;
use pooling_engine::core::country::CountryCode;
use pooling_engine::core::entry::{ClientEntryInput, EntrySet};
use pooling_engine::core::reference::ReferenceData;
use pooling_engine::engine::compute_derived_state;
use pooling_engine::simulation::scenario::{generate_random_entries, ScenarioConfig};
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"pooling-engine — multi-currency liquidity aggregation and pooling simulation

USAGE:
    pooling-engine <COMMAND> [OPTIONS]

COMMANDS:
    simulate    Compute totals, pooling graph, RTC metrics, and what-if figures
    aggregate   Compute per-currency and per-category totals only
    generate    Generate a random client book (for testing)
    help        Show this message

OPTIONS (simulate, aggregate):
    --input <FILE>       Path to JSON entries file
    --format <FORMAT>    Output format: text (default) or json

OPTIONS (simulate):
    --haircut <PCT>      FX haircut percentage (default: 2)
    --credit-rate <PCT>  Blended credit rate percentage (default: 2.5)
    --debit-rate <PCT>   USD debit rate percentage (default: 3.5)

OPTIONS (generate):
    --clients <N>        Number of client entries (default: 10)
    --countries <LIST>   Comma-separated country names (default: standard set)
    --output <FILE>      Write to file instead of stdout

EXAMPLES:
    pooling-engine simulate --input entries.json
    pooling-engine simulate --input entries.json --format json --haircut 5
    pooling-engine aggregate --input entries.json
    pooling-engine generate --clients 25 --countries China,Malaysia,Singapore"#
    );
}

/// JSON schema for the input entries file.
#[derive(serde::Deserialize)]
struct EntriesFile {
    entries: Vec<ClientEntryInput>,
}

fn load_entries(path: &str) -> EntrySet {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: EntriesFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "entries": [
    {{
      "client_name": "Acme Manufacturing",
      "operating_country": "China",
      "currencies": [
        {{ "currency": "CNY", "cash_amount": "2000000", "cash_interest_rate": "1.5",
           "borrowing_amount": "1000000", "borrowing_interest_rate": "2.5", "tenor": "short" }}
      ]
    }}
  ]
}}"#
        );
        process::exit(1);
    });

    file.entries
        .into_iter()
        .map(ClientEntryInput::into_entry)
        .collect()
}

fn parse_flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("{} requires a value", flag);
            process::exit(1);
        })
}

fn cmd_simulate(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut params = WhatIfParams::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--haircut" => {
                i += 1;
                let value: Decimal = parse_flag_value(args, i, "--haircut");
                params = WhatIfParams::new(
                    value,
                    params.blended_credit_rate_pct,
                    params.usd_debit_rate_pct,
                );
            }
            "--credit-rate" => {
                i += 1;
                let value: Decimal = parse_flag_value(args, i, "--credit-rate");
                params = WhatIfParams::new(params.fx_haircut_pct, value, params.usd_debit_rate_pct);
            }
            "--debit-rate" => {
                i += 1;
                let value: Decimal = parse_flag_value(args, i, "--debit-rate");
                params = WhatIfParams::new(
                    params.fx_haircut_pct,
                    params.blended_credit_rate_pct,
                    value,
                );
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let entries = load_entries(&path);
    let reference = ReferenceData::standard();
    let state = compute_derived_state(&entries, &reference, &params);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&state).unwrap());
    } else {
        println!("=== Pooling Simulation ===");
        println!("Entries:               {}", entries.len());
        println!(
            "Upstream to RTC:       {}",
            state.rtc_metrics.potential_upstream_to_rtc
        );
        println!(
            "Pending conversion:    {}",
            state.rtc_metrics.pending_conversion
        );
        println!(
            "Restricted funds:      {}",
            state.rtc_metrics.restricted_funds
        );
        println!("RTC total (converted): {}", state.pooling_graph.rtc_total);
        println!(
            "Flows:                 {} links across {} nodes",
            state.pooling_graph.links.len(),
            state.pooling_graph.nodes.len()
        );
        println!();
        println!("{}", state.what_if);
    }
}

fn cmd_aggregate(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let entries = load_entries(&path);
    let reference = ReferenceData::standard();
    let result = PositionAggregator::aggregate(&entries, &reference);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
    } else {
        println!("=== Currency Totals ===");
        let mut currencies: Vec<_> = result.currency_totals.iter().collect();
        currencies.sort_by(|a, b| a.0.cmp(b.0));
        for (currency, totals) in currencies {
            println!(
                "  {}: cash {} / borrowing {} / net {}",
                currency, totals.total_cash, totals.total_borrowing, totals.net_position
            );
        }

        println!("\n=== Convertibility Totals ===");
        let mut categories: Vec<_> = result.convertibility_totals.iter().collect();
        categories.sort_by_key(|(category, _)| **category);
        for (category, totals) in categories {
            let countries: Vec<String> =
                totals.countries.iter().map(|c| c.to_string()).collect();
            println!(
                "  {}: cash {} / borrowing {} ({})",
                category,
                totals.total_cash,
                totals.total_borrowing,
                countries.join(", ")
            );
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut clients = 10usize;
    let mut countries_str: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--clients" => {
                i += 1;
                clients = parse_flag_value(args, i, "--clients");
            }
            "--countries" => {
                i += 1;
                countries_str = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--countries requires a comma-separated list");
                    process::exit(1);
                }));
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = ScenarioConfig {
        client_count: clients,
        ..Default::default()
    };
    if let Some(list) = countries_str {
        config.countries = list
            .split(',')
            .map(|s| CountryCode::new(s.trim()))
            .collect();
    }

    let set = generate_random_entries(&config);

    #[derive(serde::Serialize)]
    struct OutputFile {
        entries: Vec<ClientEntryInput>,
    }

    let output = OutputFile {
        entries: set
            .entries()
            .iter()
            .map(ClientEntryInput::from_entry)
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} client entries → {}", set.len(), path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simulate" => cmd_simulate(rest),
        "aggregate" => cmd_aggregate(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
