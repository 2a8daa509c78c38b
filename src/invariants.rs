// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Round Invariants
//
// Checks run after every round. In a closed system every robot is somewhere
// in the tree, so:
//
//   sum(robot_count) == k == robot_count_in_subtree[root]
//
// and the accumulated flags never lose ground between rounds.

use crate::classifier::NodeState;
use crate::occupancy::Occupancy;
use crate::tree_index::TreeIndex;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An internal logic defect: the protocol reached a state its own rules forbid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("robots wait at inhabited node {node}, but its subtree below holds no robots")]
    StrandedGroup { node: usize },

    #[error("robot {robot} was given no next position")]
    UnassignedRobot { robot: usize },

    #[error("robot {robot} was sent to node {node}, outside the tree")]
    OffTree { robot: usize, node: usize },

    #[error("robot count drifted: expected {expected}, counted {actual}")]
    RobotCount { expected: u32, actual: u32 },

    #[error("root subtree holds {actual} robots, expected {expected}")]
    RootSubtree { expected: u32, actual: u32 },

    #[error("subtree count at node {node} does not match its children")]
    Aggregation { node: usize },

    #[error("node {node} lost its {flag} flag")]
    Regressed { node: usize, flag: &'static str },

    #[error("node {node} is finished but not explored")]
    FinishedUnexplored { node: usize },
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Robot conservation and subtree aggregation for one round's occupancy.
pub fn check_occupancy(
    tree: &TreeIndex,
    occupancy: &Occupancy,
    robots: u32,
) -> Result<(), InvariantError> {
    let actual = occupancy.total();
    if actual != robots {
        return Err(InvariantError::RobotCount { expected: robots, actual });
    }
    let at_root = occupancy.in_subtree[tree.root()];
    if at_root != robots {
        return Err(InvariantError::RootSubtree { expected: robots, actual: at_root });
    }
    for v in 0..tree.len() {
        let below: u32 = tree.children(v).iter().map(|&u| occupancy.in_subtree[u]).sum();
        if occupancy.in_subtree[v] != occupancy.robot_count[v] + below {
            return Err(InvariantError::Aggregation { node: v });
        }
    }
    Ok(())
}

/// `explored` and `finished` only move from false to true, and finished
/// implies explored.
pub fn check_progress(prev: &NodeState, next: &NodeState) -> Result<(), InvariantError> {
    for v in 0..next.len() {
        if prev.explored[v] && !next.explored[v] {
            return Err(InvariantError::Regressed { node: v, flag: "explored" });
        }
        if prev.finished[v] && !next.finished[v] {
            return Err(InvariantError::Regressed { node: v, flag: "finished" });
        }
        if next.finished[v] && !next.explored[v] {
            return Err(InvariantError::FinishedUnexplored { node: v });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
