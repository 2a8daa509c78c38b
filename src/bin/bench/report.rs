// Benchmark Report Types
// Structured output for independent analysis of round counts against the lower bound

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub scenario: String,
    pub name: String,
    pub category: String,
    pub seed: u64,
    pub pass: bool,
    pub nodes: usize,
    pub robots: usize,
    pub height: usize,
    pub rounds: u64,
    pub lower_bound: u64,
    pub ratio: f64,
    pub terminated: bool,
    pub all_finished: bool,
    pub robots_at_root: bool,
    /// Peak number of distinct occupied nodes in any round.
    pub peak_spread: usize,
    pub error: Option<String>,
    pub elapsed_ms: u128,
    pub rounds_per_sec: f64,
}

// ─── Monte Carlo Report (per-scenario aggregation) ──────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub seeded: bool,
    pub n_runs: usize,
    pub pass_rate: f64,
    pub rounds: Stats,
    pub lower_bound: Stats,
    pub ratio: Stats,
    pub peak_spread: Stats,
    pub elapsed_ms: Stats,
    pub rounds_per_sec: Stats,
    pub individual_runs: Vec<BenchResult>,
}

// ─── Bound Validation Summary ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BoundValidation {
    /// No run finished faster than the lower bound allows.
    pub never_below_bound: bool,
    /// Every single-robot run took exactly 2(n-1) rounds.
    pub single_robot_is_dfs: bool,
    /// Worst rounds / bound over all runs.
    pub worst_ratio: f64,
    pub invariant_violations: usize,
}

impl BoundValidation {
    pub fn all_pass(&self) -> bool {
        self.never_below_bound && self.single_robot_is_dfs && self.invariant_violations == 0
    }
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub summary: Summary,
    pub bound_validation: BoundValidation,
    pub scenarios: Vec<MonteCarloReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}
