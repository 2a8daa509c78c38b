// Monte Carlo Infrastructure — N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N, computing mean ± 95% CI

use explore_engine::{Exploration, RoundSnapshot};
use tracing::{debug, warn};

use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Fewest rounds any strategy needs: every edge is crossed twice by robots
/// that each cross at most one edge per round, and the deepest leaf is a
/// round trip away from the root.
pub fn lower_bound(nodes: usize, robots: usize, height: usize) -> u64 {
    let edges = nodes.saturating_sub(1) as u64;
    let robots = robots.max(1) as u64;
    let by_work = (2 * edges).div_ceil(robots);
    let by_depth = 2 * height as u64;
    by_work.max(by_depth)
}

/// Run a single scenario iteration with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> BenchResult {
    let start = Instant::now();
    let mut result = BenchResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        seed,
        pass: false,
        nodes: 0,
        robots: scenario.robots,
        height: 0,
        rounds: 0,
        lower_bound: 0,
        ratio: 0.0,
        terminated: false,
        all_finished: false,
        robots_at_root: false,
        peak_spread: 0,
        error: None,
        elapsed_ms: 0,
        rounds_per_sec: 0.0,
    };

    let sim = scenario
        .shape
        .build(seed)
        .map_err(Into::into)
        .and_then(|children| Exploration::from_children(children, 0, scenario.robots));
    let mut sim = match sim {
        Ok(sim) => sim,
        Err(e) => {
            warn!(scenario = scenario.name, seed, "setup failed: {}", e);
            result.error = Some(e.to_string());
            result.elapsed_ms = start.elapsed().as_millis();
            return result;
        }
    };

    result.nodes = sim.tree().len();
    result.height = sim.tree().height();
    result.lower_bound = lower_bound(result.nodes, scenario.robots, result.height);

    let mut time_series = if time_series_dir.is_some() {
        Some(TimeSeriesRecorder::new())
    } else {
        None
    };

    // Round 0 plus at most `round_limit` moves.
    let budget = scenario.criteria.round_limit.saturating_add(1) as usize;
    let mut last: Option<RoundSnapshot> = None;
    for step in sim.by_ref().take(budget) {
        match step {
            Ok(snapshot) => {
                result.peak_spread = result.peak_spread.max(snapshot.occupied_count());
                if let Some(ref mut ts) = time_series {
                    ts.record(&snapshot);
                }
                last = Some(snapshot);
            }
            Err(e) => {
                result.error = Some(e.to_string());
                break;
            }
        }
    }

    // Write time series if enabled
    if let (Some(ts), Some(dir)) = (&time_series, time_series_dir) {
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = ts.write_jsonl(&path) {
            eprintln!("  Warning: failed to write time series: {}", e);
        }
    }

    let elapsed = start.elapsed();
    result.elapsed_ms = elapsed.as_millis();

    result.terminated = sim.is_terminated();
    if let Some(snapshot) = &last {
        result.rounds = snapshot.round;
        result.all_finished = snapshot.all_finished();
        result.robots_at_root = snapshot.positions.iter().all(|&p| p == sim.tree().root());
    }
    result.ratio = result.rounds as f64 / result.lower_bound.max(1) as f64;
    result.rounds_per_sec = result.rounds as f64 / elapsed.as_secs_f64().max(0.001);

    // Evaluate pass/fail
    let mut pass = result.error.is_none()
        && result.terminated
        && result.all_finished
        && result.robots_at_root;
    if let Some(max_ratio) = scenario.criteria.max_ratio {
        if result.ratio > max_ratio + 1e-9 {
            pass = false;
        }
    }
    if let Some(exact) = scenario.criteria.exact_rounds {
        if result.rounds != exact {
            pass = false;
        }
    }
    result.pass = pass;

    debug!(
        scenario = scenario.name,
        seed,
        rounds = result.rounds,
        bound = result.lower_bound,
        pass,
        "run complete"
    );
    result
}

/// Run Monte Carlo: N runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> MonteCarloReport {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        let result = run_single(scenario, seed, ts_dir.as_deref());
        results.push(result);
    }

    aggregate(scenario, results)
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = if n > 0 { passed as f64 / n as f64 } else { 0.0 };

    let stat = |f: fn(&BenchResult) -> f64| {
        Stats::from_samples(&results.iter().map(f).collect::<Vec<_>>())
    };

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        seeded: scenario.shape.is_seeded(),
        n_runs: n,
        pass_rate,
        rounds: stat(|r| r.rounds as f64),
        lower_bound: stat(|r| r.lower_bound as f64),
        ratio: stat(|r| r.ratio),
        peak_spread: stat(|r| r.peak_spread as f64),
        elapsed_ms: stat(|r| r.elapsed_ms as f64),
        rounds_per_sec: stat(|r| r.rounds_per_sec),
        individual_runs: results,
    }
}
