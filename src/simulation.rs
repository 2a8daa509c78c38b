// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Simulation Core

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

use crate::allocator::{allocate, Allocation};
use crate::classifier::{classify, NodeState};
use crate::invariants::{check_occupancy, check_progress, InvariantError};
use crate::occupancy::{group_by_node, Occupancy};
use crate::tree_index::{TreeError, TreeIndex};
use crate::types::{RoundSnapshot, Trace};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid tree: {0}")]
    InvalidTree(#[from] TreeError),

    #[error("exploration needs at least one robot")]
    NoRobots,

    #[error("{robots} robots exceed the per-node counter range")]
    TooManyRobots { robots: usize },

    #[error("invariant violated in round {round}: {source}")]
    InvariantViolation {
        round: u64,
        #[source]
        source: InvariantError,
    },
}

// ─── Phase ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Running,
    Terminated,
    /// An invariant check failed; no further rounds are produced.
    Halted,
}

// ─── Exploration struct ──────────────────────────────────────────────────────

/// Round-by-round exploration of one tree by `robots` agents starting at its
/// root.
///
/// Iterating yields round 0 (everyone at the root, nothing classified) and
/// then one snapshot per round until every node is finished.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Exploration {
    pub(crate) tree: TreeIndex,
    pub(crate) robots: usize,
    /// `robots` as stored in the occupancy counters.
    pub(crate) robot_total: u32,
    pub(crate) round: u64,
    pub(crate) positions: Vec<usize>,
    pub(crate) occupancy: Occupancy,
    pub(crate) state: NodeState,
    pub(crate) traversed: Vec<bool>,
    pub(crate) phase: Phase,
    pub(crate) initial_emitted: bool,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl Exploration {
    /// # Errors
    /// - `NoRobots` if `robots == 0`.
    /// - `TooManyRobots` if `robots` does not fit in a `u32` counter.
    pub fn new(tree: TreeIndex, robots: usize) -> Result<Self, SimulationError> {
        if robots == 0 {
            return Err(SimulationError::NoRobots);
        }
        let robot_total =
            u32::try_from(robots).map_err(|_| SimulationError::TooManyRobots { robots })?;

        let positions = vec![tree.root(); robots];
        let occupancy = Occupancy::tally(&tree, &positions);
        let state = NodeState::baseline(&occupancy);
        let mut traversed = vec![false; tree.len()];
        traversed[tree.root()] = true;

        Ok(Self {
            tree,
            robots,
            robot_total,
            round: 0,
            positions,
            occupancy,
            state,
            traversed,
            phase: Phase::Running,
            initial_emitted: false,
        })
    }

    /// Index `children` rooted at `root`, then set up the exploration.
    pub fn from_children(
        children: Vec<Vec<usize>>,
        root: usize,
        robots: usize,
    ) -> Result<Self, SimulationError> {
        let tree = TreeIndex::new(children, root)?;
        Self::new(tree, robots)
    }

    /// Compute the next round. Returns `Ok(None)` once terminated.
    ///
    /// Every group moves on the previous round's classification; counts,
    /// flags and the snapshot are then rebuilt from the new positions and
    /// replace the old state wholesale.
    pub fn advance_round(&mut self) -> Result<Option<RoundSnapshot>, SimulationError> {
        if self.phase != Phase::Running {
            return Ok(None);
        }
        self.initial_emitted = true;
        let round = self.round + 1;

        let (positions, traversed) = match self.move_robots() {
            Ok(moved) => moved,
            Err(source) => return Err(self.halt(round, source)),
        };
        let occupancy = Occupancy::tally(&self.tree, &positions);
        if let Err(source) = check_occupancy(&self.tree, &occupancy, self.robot_total) {
            return Err(self.halt(round, source));
        }
        let state = classify(&self.tree, &self.state, &occupancy);
        if let Err(source) = check_progress(&self.state, &state) {
            return Err(self.halt(round, source));
        }

        self.round = round;
        self.positions = positions;
        self.occupancy = occupancy;
        self.state = state;
        self.traversed = traversed;

        let snapshot = self.snapshot();
        debug!(
            round,
            occupied = snapshot.occupied_count(),
            finished = snapshot.finished_count(),
            "round advanced"
        );

        if self.state.all_finished() {
            self.phase = Phase::Terminated;
            info!(
                rounds = round,
                robots = self.robots,
                nodes = self.tree.len(),
                "exploration terminated"
            );
        }
        Ok(Some(snapshot))
    }

    /// Run to termination and collect every round, round 0 included.
    pub fn run(self) -> Result<Trace, SimulationError> {
        self.collect()
    }

    /// Frozen copy of the current round.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            round: self.round,
            positions: self.positions.clone(),
            robot_count: self.occupancy.robot_count.clone(),
            robot_count_in_subtree: self.occupancy.in_subtree.clone(),
            explored: self.state.explored.clone(),
            finished: self.state.finished.clone(),
            inhabited: self.state.inhabited.clone(),
            status: self.state.categories(),
            traversed: self.traversed.clone(),
        }
    }

    pub fn tree(&self) -> &TreeIndex {
        &self.tree
    }

    pub fn robots(&self) -> usize {
        self.robots
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// Allocate every occupied node's group. Returns the new positions and
    /// the updated traversal markers.
    fn move_robots(&self) -> Result<(Vec<usize>, Vec<bool>), InvariantError> {
        let mut next: Vec<Option<usize>> = vec![None; self.robots];
        let mut traversed = self.traversed.clone();

        for (v, members) in group_by_node(&self.positions) {
            match allocate(&self.tree, &self.state, &self.occupancy, v, members.len())? {
                Allocation::Ascend(p) => {
                    for &r in &members {
                        next[r] = Some(p);
                    }
                }
                Allocation::Stay => {
                    for &r in &members {
                        next[r] = Some(v);
                    }
                }
                Allocation::Split(shares) => {
                    // Deal robots round-robin, skipping children whose share
                    // is used up.
                    let mut left: Vec<usize> = shares.iter().map(|&(_, q)| q).collect();
                    let mut slot = 0;
                    for &r in &members {
                        while left[slot] == 0 {
                            slot = (slot + 1) % shares.len();
                        }
                        let u = shares[slot].0;
                        left[slot] -= 1;
                        next[r] = Some(u);
                        traversed[u] = true;
                        slot = (slot + 1) % shares.len();
                    }
                }
            }
        }

        let n = self.tree.len();
        let positions = next
            .into_iter()
            .enumerate()
            .map(|(robot, target)| match target {
                Some(node) if node < n => Ok(node),
                Some(node) => Err(InvariantError::OffTree { robot, node }),
                None => Err(InvariantError::UnassignedRobot { robot }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((positions, traversed))
    }

    fn halt(&mut self, round: u64, source: InvariantError) -> SimulationError {
        warn!(round, error = %source, "invariant violated, halting exploration");
        self.phase = Phase::Halted;
        SimulationError::InvariantViolation { round, source }
    }
}

impl Iterator for Exploration {
    type Item = Result<RoundSnapshot, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.initial_emitted {
            self.initial_emitted = true;
            return Some(Ok(self.snapshot()));
        }
        self.advance_round().transpose()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeStatus;

    #[test]
    fn test_zero_robots_rejected() {
        let tree = TreeIndex::new(vec![vec![]], 0).unwrap();
        assert_eq!(Exploration::new(tree, 0).unwrap_err(), SimulationError::NoRobots);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_robot_count_rejected() {
        let tree = TreeIndex::new(vec![vec![]], 0).unwrap();
        let robots = u32::MAX as usize + 1;
        assert_eq!(
            Exploration::new(tree, robots).unwrap_err(),
            SimulationError::TooManyRobots { robots }
        );
    }

    #[test]
    fn test_invalid_tree_surfaces() {
        let err = Exploration::from_children(vec![vec![1], vec![0]], 0, 1).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidTree(_)));
    }

    #[test]
    fn test_round_zero_is_baseline() {
        let mut sim = Exploration::from_children(vec![vec![1, 2], vec![], vec![]], 0, 3).unwrap();
        let first = sim.next().unwrap().unwrap();
        assert_eq!(first.round, 0);
        assert_eq!(first.positions, vec![0, 0, 0]);
        assert_eq!(first.robot_count, vec![3, 0, 0]);
        assert!(first.status.iter().all(|&s| s == NodeStatus::Unfinished));
        assert_eq!(first.traversed, vec![true, false, false]);
    }

    #[test]
    fn test_single_node_terminates_in_one_round() {
        let trace = Exploration::from_children(vec![vec![]], 0, 2).unwrap().run().unwrap();
        assert_eq!(trace.len(), 2);
        let last = trace.last().unwrap();
        assert_eq!(last.round, 1);
        assert!(last.all_finished());
        assert_eq!(last.positions, vec![0, 0]);
    }

    #[test]
    fn test_no_rounds_after_termination() {
        let mut sim = Exploration::from_children(vec![vec![1], vec![]], 0, 1).unwrap();
        while sim.advance_round().unwrap().is_some() {}
        assert!(sim.is_terminated());
        assert_eq!(sim.advance_round().unwrap(), None);
        assert!(sim.next().is_none());
    }

    #[test]
    fn test_split_marks_traversed_edges() {
        let mut sim =
            Exploration::from_children(vec![vec![1, 2, 3], vec![], vec![], vec![]], 0, 2).unwrap();
        let round_one = sim.advance_round().unwrap().unwrap();
        assert_eq!(round_one.positions, vec![1, 2]);
        assert_eq!(round_one.traversed, vec![true, true, true, false]);
    }

    #[test]
    fn test_split_deals_robots_round_robin() {
        let mut sim = Exploration::from_children(vec![vec![1, 2], vec![], vec![]], 0, 5).unwrap();
        let round_one = sim.advance_round().unwrap().unwrap();
        assert_eq!(round_one.positions, vec![1, 2, 1, 2, 1]);
        assert_eq!(round_one.robot_count, vec![0, 3, 2]);
    }

    #[test]
    fn test_halted_exploration_stops() {
        let mut sim = Exploration::from_children(vec![vec![1, 2], vec![], vec![]], 0, 1).unwrap();
        // Corrupt the flags so the root looks busy with nobody below it.
        sim.state.inhabited = vec![true, true, true];
        sim.state.explored = vec![true, true, true];
        let err = sim.advance_round().unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvariantViolation {
                round: 1,
                source: InvariantError::StrandedGroup { node: 0 },
            }
        );
        assert_eq!(sim.advance_round().unwrap(), None);
        assert_eq!(sim.round(), 0);
    }
}
