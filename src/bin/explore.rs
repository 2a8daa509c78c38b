// Exploration Document Writer
// Runs one random-tree exploration and writes the viewer JSON document
//
// Usage:
//   cargo run --release --bin explore -- --nodes 30 --robots 4
//   cargo run --release --bin explore -- --nodes 30 --robots 4 --seed 7 --output run.json

use explore_engine::export::{build_document, ExplorationParams};
use explore_engine::generator::DEFAULT_SEED;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    params: ExplorationParams,
    output: Option<String>,
    pretty: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        params: ExplorationParams { nodes: 20, robots: 3, seed: DEFAULT_SEED },
        output: None,
        pretty: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--nodes" | "-n" => {
                i += 1;
                if i < args.len() {
                    cli.params.nodes = args[i].parse().unwrap_or(cli.params.nodes);
                }
            }
            "--robots" | "-k" => {
                i += 1;
                if i < args.len() {
                    cli.params.robots = args[i].parse().unwrap_or(cli.params.robots);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.params.seed = args[i].parse().unwrap_or(DEFAULT_SEED);
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    cli.output = Some(args[i].clone());
                }
            }
            "--pretty" => {
                cli.pretty = true;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "explore_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = parse_args();
    info!(
        nodes = cli.params.nodes,
        robots = cli.params.robots,
        seed = cli.params.seed,
        "exploring random tree"
    );

    let document = match build_document(&cli.params) {
        Ok(doc) => doc,
        Err(e) => {
            error!("exploration failed: {}", e);
            std::process::exit(1);
        }
    };
    info!(rounds = document.steps.len().saturating_sub(1), "document built");

    let json = if cli.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    let json = match json {
        Ok(j) => j,
        Err(e) => {
            error!("failed to serialize document: {}", e);
            std::process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &json) {
                error!("failed to write {}: {}", path, e);
                std::process::exit(1);
            }
            info!("document written to {}", path);
        }
        None => println!("{}", json),
    }
}
