//! Stepline CLI
//!
//! Evaluates parser-emitted JSON syntax trees and prints the recorded
//! timeline (tracks, steps and final bindings) as JSON.

mod commands;

use std::sync::Once;

use commands::{check_tree, run_session, verify_replay};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Enable with `RUST_LOG=stepline_eval=debug` (or `=trace`). Does nothing
/// when `RUST_LOG` is unset.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "run" => {
            if args.len() < 4 {
                eprintln!("Usage: stepline run <tree.json> <source.js>");
                std::process::exit(1);
            }
            run_session(&args[2], &args[3])
        }
        "replay" => {
            if args.len() < 4 {
                eprintln!("Usage: stepline replay <tree.json> <source.js>");
                std::process::exit(1);
            }
            verify_replay(&args[2], &args[3])
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: stepline check <tree.json>");
                std::process::exit(1);
            }
            check_tree(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-v" => {
            println!("Stepline {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Stepline timeline engine");
    println!();
    println!("Usage: stepline <command> [arguments]");
    println!();
    println!("Commands:");
    println!("  run <tree.json> <source.js>     Evaluate and print tracks/steps/bindings");
    println!("  replay <tree.json> <source.js>  Evaluate, replay steps, verify the mirror");
    println!("  check <tree.json>               Validate a tree file without evaluating");
    println!("  help                            Show this help message");
    println!("  version                         Show version information");
    println!();
    println!("The tree file is the JSON an acorn-style parser emits for the source.");
    println!();
    println!("Examples:");
    println!("  stepline run demo.json demo.js");
    println!("  stepline replay demo.json demo.js");
    println!("  RUST_LOG=stepline_eval=debug stepline run demo.json demo.js");
}
