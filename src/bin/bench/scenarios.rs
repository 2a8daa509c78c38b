// Scenario Definitions — tree shapes × robot counts
// Fixed shapes ignore the seed; random shapes draw a fresh Prüfer tree per seed

use explore_engine::generator::{graph_to_tree, kary_tree, path_tree, random_tree, star_tree};
use explore_engine::TreeError;

// ─── Scenario Configuration ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Path(usize),
    Star(usize),
    Kary { arity: usize, depth: u32 },
    Random(usize),
}

impl Shape {
    /// Rooted child lists (root 0) for one run.
    pub fn build(&self, seed: u64) -> Result<Vec<Vec<usize>>, TreeError> {
        match *self {
            Shape::Path(n) => Ok(path_tree(n)),
            Shape::Star(leaves) => Ok(star_tree(leaves)),
            Shape::Kary { arity, depth } => Ok(kary_tree(arity, depth)),
            Shape::Random(n) => {
                let graph = random_tree(n, seed)?;
                let (_, children) = graph_to_tree(&graph)?;
                Ok(children)
            }
        }
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, Shape::Random(_))
    }
}

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub shape: Shape,
    pub robots: usize,
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    /// Upper limit on rounds / lower bound.
    pub max_ratio: Option<f64>,
    /// Exact round count expected on every seed.
    pub exact_rounds: Option<u64>,
    /// Abort the run after this many rounds without terminating.
    pub round_limit: u64,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            max_ratio: None,
            exact_rounds: None,
            round_limit: 1_000_000,
        }
    }
}

// ─── Catalogue ──────────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        // ── Baselines with known round counts ──
        Scenario {
            name: "SINGLE_NODE",
            label: "Single node, k=3",
            category: "baseline",
            shape: Shape::Path(1),
            robots: 3,
            criteria: PassCriteria { exact_rounds: Some(1), ..Default::default() },
        },
        Scenario {
            name: "PATH_5_K2",
            label: "Path n=5, k=2",
            category: "baseline",
            shape: Shape::Path(5),
            robots: 2,
            criteria: PassCriteria { exact_rounds: Some(8), max_ratio: Some(1.0), ..Default::default() },
        },
        Scenario {
            name: "PATH_64_K8",
            label: "Path n=64, k=8",
            category: "baseline",
            shape: Shape::Path(64),
            robots: 8,
            criteria: PassCriteria { exact_rounds: Some(126), max_ratio: Some(1.0), ..Default::default() },
        },
        Scenario {
            name: "STAR_8_K8",
            label: "Star m=8, k=8",
            category: "baseline",
            shape: Shape::Star(8),
            robots: 8,
            criteria: PassCriteria { exact_rounds: Some(2), max_ratio: Some(1.0), ..Default::default() },
        },
        Scenario {
            name: "STAR_8_K3",
            label: "Star m=8, k=3",
            category: "baseline",
            shape: Shape::Star(8),
            robots: 3,
            criteria: PassCriteria { exact_rounds: Some(6), max_ratio: Some(1.0), ..Default::default() },
        },
        Scenario {
            name: "STAR_32_K5",
            label: "Star m=32, k=5",
            category: "baseline",
            shape: Shape::Star(32),
            robots: 5,
            criteria: PassCriteria { exact_rounds: Some(14), max_ratio: Some(1.1), ..Default::default() },
        },

        // ── Single robot: depth-first search ──
        Scenario {
            name: "DFS_BINARY_D5",
            label: "Binary depth 5, k=1",
            category: "dfs",
            shape: Shape::Kary { arity: 2, depth: 5 },
            robots: 1,
            criteria: PassCriteria { exact_rounds: Some(124), max_ratio: Some(1.0), ..Default::default() },
        },
        Scenario {
            name: "DFS_RANDOM_100",
            label: "Random n=100, k=1",
            category: "dfs",
            shape: Shape::Random(100),
            robots: 1,
            criteria: PassCriteria { exact_rounds: Some(198), max_ratio: Some(1.0), ..Default::default() },
        },

        // ── Complete k-ary trees ──
        Scenario {
            name: "BINARY_D6_K4",
            label: "Binary depth 6, k=4",
            category: "kary",
            shape: Shape::Kary { arity: 2, depth: 6 },
            robots: 4,
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "BINARY_D6_K16",
            label: "Binary depth 6, k=16",
            category: "kary",
            shape: Shape::Kary { arity: 2, depth: 6 },
            robots: 16,
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "TERNARY_D4_K9",
            label: "Ternary depth 4, k=9",
            category: "kary",
            shape: Shape::Kary { arity: 3, depth: 4 },
            robots: 9,
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "TERNARY_D4_K81",
            label: "Ternary depth 4, k=81",
            category: "kary",
            shape: Shape::Kary { arity: 3, depth: 4 },
            robots: 81,
            criteria: PassCriteria::default(),
        },

        // ── Random Prüfer trees ──
        Scenario {
            name: "RANDOM_30_K3",
            label: "Random n=30, k=3",
            category: "random",
            shape: Shape::Random(30),
            robots: 3,
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "RANDOM_100_K4",
            label: "Random n=100, k=4",
            category: "random",
            shape: Shape::Random(100),
            robots: 4,
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "RANDOM_100_K16",
            label: "Random n=100, k=16",
            category: "random",
            shape: Shape::Random(100),
            robots: 16,
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "RANDOM_500_K10",
            label: "Random n=500, k=10",
            category: "random",
            shape: Shape::Random(500),
            robots: 10,
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "RANDOM_500_K50",
            label: "Random n=500, k=50",
            category: "random",
            shape: Shape::Random(500),
            robots: 50,
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "RANDOM_40_K40",
            label: "Random n=40, k=n",
            category: "random",
            shape: Shape::Random(40),
            robots: 40,
            criteria: PassCriteria::default(),
        },
    ]
}
