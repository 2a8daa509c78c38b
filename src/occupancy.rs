// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Robot Occupancy

use std::collections::BTreeMap;

use crate::tree_index::TreeIndex;

/// Robot counts derived from a position vector. Rebuilt every round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    /// Robots standing exactly on each node.
    pub robot_count: Vec<u32>,
    /// Robots anywhere in the subtree rooted at each node.
    pub in_subtree: Vec<u32>,
}

impl Occupancy {
    /// Count robots per node, then fold the counts up the tree in one pass
    /// over the edges in reverse topological order.
    pub fn tally(tree: &TreeIndex, positions: &[usize]) -> Self {
        let mut robot_count = vec![0u32; tree.len()];
        for &v in positions {
            robot_count[v] += 1;
        }

        let mut in_subtree = robot_count.clone();
        for &(v, u) in tree.edges().iter().rev() {
            in_subtree[v] += in_subtree[u];
        }

        Self { robot_count, in_subtree }
    }

    /// Robots strictly below `v`.
    pub fn below(&self, v: usize) -> u32 {
        self.in_subtree[v] - self.robot_count[v]
    }

    pub fn total(&self) -> u32 {
        self.robot_count.iter().sum()
    }
}

/// Co-located robots, keyed by node. Robot indices within a group are
/// increasing, and groups iterate in node order.
pub fn group_by_node(positions: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (robot, &v) in positions.iter().enumerate() {
        groups.entry(v).or_default().push(robot);
    }
    groups
}
