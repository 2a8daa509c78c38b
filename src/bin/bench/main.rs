// Exploration Benchmark Runner v0.2.0 — rounds to termination against the lower bound
// Monte Carlo over seeds, seeded Prüfer trees, per-round audit trail
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- RANDOM           # Filter by name, label or category
//   cargo run --release --bin bench -- --time-series    # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42        # Custom base seed

mod report;
mod scenarios;
mod monte_carlo;
mod time_series;

use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    time_series: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: explore_engine::generator::DEFAULT_SEED,
        time_series: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(cli.seed);
                }
            }
            "--time-series" => {
                cli.time_series = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
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
                .unwrap_or_else(|_| "explore_engine=warn,bench=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let ts_dir = if cli.time_series {
        let dir = std::path::Path::new("benchmark-results/time-series");
        Some(dir.to_path_buf())
    } else {
        None
    };

    println!("\n  Exploration Benchmark Runner v0.2.0");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<28} {:>5} {:>6} {:>12} {:>8} {:>14} {:>7}",
        "Scenario", "Pass%", "Nodes", "Rounds", "Bound", "Ratio", "Time");
    println!("  {}", "-".repeat(88));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(
            scenario,
            cli.runs,
            cli.seed,
            ts_dir.as_deref(),
        );

        let pass_pct = report.pass_rate * 100.0;
        let nodes = report.individual_runs.first().map(|r| r.nodes).unwrap_or(0);
        let rounds_ci = (report.rounds.ci_upper - report.rounds.ci_lower) / 2.0;
        let status = if report.pass_rate >= 1.0 { "PASS" } else { "FAIL" };

        println!("  {:<28} {:>4}% {:>6} {:>7.1}±{:<4.1} {:>8.1} {:>6.3} (≤{:.3}) {:>5.0}ms  {}",
            report.label,
            pass_pct as u32,
            nodes,
            report.rounds.mean, rounds_ci,
            report.lower_bound.mean,
            report.ratio.mean,
            report.ratio.max,
            report.elapsed_ms.mean,
            status,
        );

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Bound Validation ───────────────────────────────────────────────

    let runs = || mc_reports.iter().flat_map(|r| r.individual_runs.iter());

    let never_below_bound = runs()
        .filter(|r| r.terminated)
        .all(|r| r.rounds >= r.lower_bound);

    // A single robot is a depth-first search: each edge down once, up once.
    let single_robot_is_dfs = runs()
        .filter(|r| r.robots == 1 && r.terminated && r.nodes > 1)
        .all(|r| r.rounds == 2 * (r.nodes as u64 - 1));

    let worst_ratio = runs()
        .filter(|r| r.terminated)
        .map(|r| r.ratio)
        .fold(0.0_f64, f64::max);

    let invariant_violations = runs().filter(|r| r.error.is_some()).count();

    let bound_validation = BoundValidation {
        never_below_bound,
        single_robot_is_dfs,
        worst_ratio,
        invariant_violations,
    };

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= 1.0).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(88));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    println!("  Bound Validation:");
    println!("    Never below bound:    {}", if bound_validation.never_below_bound { "PASS" } else { "FAIL" });
    println!("    k=1 is DFS:           {}", if bound_validation.single_robot_is_dfs { "PASS" } else { "FAIL" });
    println!("    Invariant violations: {}", bound_validation.invariant_violations);
    println!("    Worst ratio:          {:.3}\n", bound_validation.worst_ratio);

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis();
    let timestamp = format!("{}", ts);
    let validation_passes = bound_validation.all_pass();

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        bound_validation,
        scenarios: mc_reports,
    };

    let dir = std::path::Path::new("benchmark-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create benchmark-results/");
    }
    let path = dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write benchmark file");
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 || !validation_passes {
        std::process::exit(1);
    }
}
