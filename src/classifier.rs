// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Node Classification
//
// Each round recomputes every node's flags children-first. `explored` and
// `finished` only ever turn on; `inhabited` is rebuilt from the current
// occupancy. The display category is derived from the flags on demand.

use serde::Serialize;

use crate::occupancy::Occupancy;
use crate::tree_index::TreeIndex;
use crate::types::NodeStatus;

/// Per-node exploration flags for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeState {
    /// Every edge below the node has been crossed at some point.
    pub explored: Vec<bool>,
    /// Explored, and no robot is below the node.
    pub finished: Vec<bool>,
    /// At least one robot is in the node's subtree right now.
    pub inhabited: Vec<bool>,
}

impl NodeState {
    /// State before any robot has moved: nothing explored or finished.
    pub fn baseline(occupancy: &Occupancy) -> Self {
        let n = occupancy.in_subtree.len();
        Self {
            explored: vec![false; n],
            finished: vec![false; n],
            inhabited: occupancy.in_subtree.iter().map(|&c| c > 0).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.finished.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finished.is_empty()
    }

    pub fn all_finished(&self) -> bool {
        self.finished.iter().all(|&f| f)
    }

    /// Display category of `v`: finished, else explored but still holding
    /// robots below, else unfinished.
    ///
    /// An occupied leaf is always finished by the time anyone asks, so a leaf
    /// is never `Inhabited`.
    pub fn category(&self, v: usize) -> NodeStatus {
        if self.finished[v] {
            NodeStatus::Finished
        } else if self.explored[v] {
            NodeStatus::Inhabited
        } else {
            NodeStatus::Unfinished
        }
    }

    pub fn categories(&self) -> Vec<NodeStatus> {
        (0..self.len()).map(|v| self.category(v)).collect()
    }
}

/// Classify every node for the round whose occupancy is `occupancy`, given
/// the previous round's flags.
pub fn classify(tree: &TreeIndex, prev: &NodeState, occupancy: &Occupancy) -> NodeState {
    let n = tree.len();
    let mut explored = vec![false; n];
    let mut finished = vec![false; n];

    for &v in tree.order().iter().rev() {
        let children = tree.children(v);
        if children.is_empty() {
            // A leaf's only edge is crossed once anybody stands on it.
            explored[v] = prev.explored[v] || occupancy.robot_count[v] > 0;
            finished[v] = prev.finished[v] || explored[v];
        } else {
            explored[v] = prev.explored[v] || children.iter().all(|&u| explored[u]);
            finished[v] = prev.finished[v]
                || children
                    .iter()
                    .all(|&u| explored[u] && occupancy.in_subtree[u] == 0);
        }
    }

    NodeState {
        explored,
        finished,
        inhabited: occupancy.in_subtree.iter().map(|&c| c > 0).collect(),
    }
}
