// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Robot Allocation

use crate::classifier::NodeState;
use crate::invariants::InvariantError;
use crate::occupancy::Occupancy;
use crate::tree_index::TreeIndex;
use crate::types::NodeStatus;

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Where a co-located group goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// Everyone steps up to this node (the parent).
    Ascend(usize),
    /// Nobody moves.
    Stay,
    /// `(child, robots)` pairs in dealing order: child order rotated to start
    /// at the least occupied child. Only children receiving at least one
    /// robot are listed.
    Split(Vec<(usize, usize)>),
}

/// Decide the next move for `group` robots standing on `v`, from the flags
/// and occupancy of the previous round.
///
/// # Errors
/// - `StrandedGroup` if `v` is `Inhabited` while no robot is below it.
pub fn allocate(
    tree: &TreeIndex,
    state: &NodeState,
    occupancy: &Occupancy,
    v: usize,
    group: usize,
) -> Result<Allocation, InvariantError> {
    match state.category(v) {
        NodeStatus::Finished => Ok(match tree.parent(v) {
            Some(p) => Allocation::Ascend(p),
            None => Allocation::Stay,
        }),
        NodeStatus::Unfinished => {
            let candidates: Vec<usize> = tree
                .children(v)
                .iter()
                .copied()
                .filter(|&u| state.category(u) == NodeStatus::Unfinished)
                .collect();
            if candidates.is_empty() {
                return Ok(Allocation::Stay);
            }

            let counts: Vec<u32> = candidates.iter().map(|&u| occupancy.in_subtree[u]).collect();
            let quotas = balanced_split(&counts, group);
            let start = argmin(&counts);
            let len = candidates.len();
            Ok(Allocation::Split(
                (0..len)
                    .map(|i| (start + i) % len)
                    .map(|i| (candidates[i], quotas[i]))
                    .filter(|&(_, q)| q > 0)
                    .collect(),
            ))
        }
        NodeStatus::Inhabited => {
            if occupancy.below(v) == 0 {
                return Err(InvariantError::StrandedGroup { node: v });
            }
            Ok(Allocation::Stay)
        }
    }
}

/// Share `group` robots across candidates whose current subtree counts are
/// `counts`, returning how many each receives.
///
/// Everyone gets `group / len`. The `group % len` leftovers go to the
/// candidates with the smallest counts; ties are broken by walking the list
/// cyclically from the first minimum.
pub fn balanced_split(counts: &[u32], group: usize) -> Vec<usize> {
    let len = counts.len();
    if len == 0 {
        return Vec::new();
    }

    let base = group / len;
    let remainder = group % len;
    let mut quotas = vec![base; len];
    if remainder == 0 {
        return quotas;
    }

    let start = argmin(counts);
    let mut ranked: Vec<usize> = (0..len).collect();
    ranked.sort_by_key(|&i| (counts[i], (i + len - start) % len));
    for &i in ranked.iter().take(remainder) {
        quotas[i] += 1;
    }
    quotas
}

/// Index of the first smallest count.
fn argmin(counts: &[u32]) -> usize {
    counts
        .iter()
        .enumerate()
        .min_by_key(|&(i, &c)| (c, i))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
