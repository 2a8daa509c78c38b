// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Node Status ─────────────────────────────────────────────────────────────

/// Display category of a node, projected from its flags each round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    /// Subtree explored, and no robot is inside it except possibly at the node.
    Finished,
    /// Some edge below the node has not been crossed yet.
    Unfinished,
    /// Every edge below has been crossed, but robots are still below the node.
    Inhabited,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "FINISHED",
            Self::Unfinished => "UNFINISHED",
            Self::Inhabited => "INHABITED",
        }
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── RoundSnapshot ───────────────────────────────────────────────────────────

/// Frozen copy of the simulation state after one round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub round: u64,
    /// Node of each robot, indexed by robot.
    pub positions: Vec<usize>,
    pub robot_count: Vec<u32>,
    pub robot_count_in_subtree: Vec<u32>,
    pub explored: Vec<bool>,
    pub finished: Vec<bool>,
    pub inhabited: Vec<bool>,
    pub status: Vec<NodeStatus>,
    /// Whether the edge into each node has ever been crossed. The root counts
    /// as traversed from the start.
    pub traversed: Vec<bool>,
}

impl RoundSnapshot {
    pub fn all_finished(&self) -> bool {
        self.finished.iter().all(|&f| f)
    }

    pub fn finished_count(&self) -> usize {
        self.finished.iter().filter(|&&f| f).count()
    }

    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|&&e| e).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.robot_count.iter().filter(|&&c| c > 0).count()
    }
}

// ─── Trace ───────────────────────────────────────────────────────────────────

/// Append-only sequence of round snapshots, starting with round 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trace {
    rounds: Vec<RoundSnapshot>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> &[RoundSnapshot] {
        &self.rounds
    }

    pub fn last(&self) -> Option<&RoundSnapshot> {
        self.rounds.last()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Index of the final round, or `None` for an empty trace.
    pub fn terminal_round(&self) -> Option<u64> {
        self.last().map(|s| s.round)
    }

    pub fn into_rounds(self) -> Vec<RoundSnapshot> {
        self.rounds
    }
}

impl FromIterator<RoundSnapshot> for Trace {
    fn from_iter<I: IntoIterator<Item = RoundSnapshot>>(iter: I) -> Self {
        Self { rounds: iter.into_iter().collect() }
    }
}
