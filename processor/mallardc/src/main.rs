//! Mallard CLI.
//!
//! Structural interface grafting for Java sources.

use std::path::PathBuf;

use mallardc::commands::{lex_file, parse_file, run_process, ProcessConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "process" => {
            let mut config = ProcessConfig::default();
            let mut verbose = false;
            let mut source_root = None;

            for arg in args.iter().skip(2) {
                if let Some(dir) = arg.strip_prefix("--target-dir=") {
                    config.target_dir = Some(PathBuf::from(dir));
                } else if let Some(ns) = arg.strip_prefix("--marker-namespace=") {
                    config.marker_namespace = Some(ns.to_string());
                } else if arg == "--verbose" || arg == "-v" {
                    verbose = true;
                } else if !arg.starts_with('-') && source_root.is_none() {
                    source_root = Some(PathBuf::from(arg));
                }
            }

            let Some(root) = source_root else {
                eprintln!("Usage: mallard process <source-root> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --target-dir=<dir>         Build target directory; generated");
                eprintln!("                             units go under");
                eprintln!("                             <dir>/generated-sources/annotations");
                eprintln!("  --marker-namespace=<ns>    Package of the DuckType/AddField");
                eprintln!("                             marker annotations");
                eprintln!("  -v, --verbose              Verbose tracing output");
                std::process::exit(1);
            };

            init_tracing(verbose);
            config.source_root = root;
            std::process::exit(run_process(&config));
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: mallard lex <file.java>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: mallard parse <file.java>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "--help" | "-h" | "help" => print_usage(),
        other => {
            eprintln!("error: unknown command `{other}`");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Mallard - structural interface grafting for Java sources");
    println!();
    println!("Usage: mallard <command> [arguments]");
    println!();
    println!("Commands:");
    println!("  process <source-root>   Run one annotation processing round");
    println!("  lex <file.java>         Dump the token stream of a file");
    println!("  parse <file.java>       Dump the declaration structure of a file");
    println!("  help                    Show this help");
}

/// Initialise tracing. `RUST_LOG` overrides the default level; verbose
/// mode defaults to `debug`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
