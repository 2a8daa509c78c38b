// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Tree Generation
//
// Random trees come from a seeded Prüfer sequence and are rooted at their
// highest-degree node, with labels reassigned breadth-first so the root is 0
// and every parent label precedes its children.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

use crate::tree_index::TreeError;

/// Seed used when callers do not pick one.
pub const DEFAULT_SEED: u64 = 1991;

// ---------------------------------------------------------------------------
// Random trees
// ---------------------------------------------------------------------------

/// Random undirected tree on `n` nodes as an adjacency list.
///
/// The same `seed` always yields the same tree.
///
/// # Errors
/// - `Empty` if `n == 0`.
pub fn random_tree(n: usize, seed: u64) -> Result<Vec<Vec<usize>>, TreeError> {
    if n == 0 {
        return Err(TreeError::Empty);
    }
    let mut graph: Vec<Vec<usize>> = vec![Vec::new(); n];
    if n == 1 {
        return Ok(graph);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let sequence: Vec<usize> = (0..n - 2).map(|_| rng.gen_range(0..n)).collect();

    let mut degree = vec![1usize; n];
    for &i in &sequence {
        degree[i] += 1;
    }

    for &i in &sequence {
        // Smallest current leaf. Always exists: degrees sum to 2(n-1) over n
        // nodes with at least two ones until the final edge.
        if let Some(j) = (0..n).find(|&j| degree[j] == 1) {
            graph[i].push(j);
            graph[j].push(i);
            degree[i] -= 1;
            degree[j] -= 1;
        }
    }

    let last: Vec<usize> = (0..n).filter(|&i| degree[i] == 1).collect();
    if let &[u, v] = last.as_slice() {
        graph[u].push(v);
        graph[v].push(u);
    }
    Ok(graph)
}

/// Root an undirected tree at its highest-degree node (first on ties) and
/// relabel nodes in breadth-first discovery order.
///
/// Returns `(edges, children)`: `[parent, child]` pairs in discovery order
/// and the rooted child lists, with the root at label 0.
///
/// # Errors
/// - `Empty` if `graph` has no nodes.
/// - `Disconnected` if some node cannot be reached from the chosen root.
pub fn graph_to_tree(
    graph: &[Vec<usize>],
) -> Result<(Vec<[usize; 2]>, Vec<Vec<usize>>), TreeError> {
    let n = graph.len();
    if n == 0 {
        return Err(TreeError::Empty);
    }
    let root = (0..n)
        .rev()
        .max_by_key(|&v| graph[v].len())
        .unwrap_or(0);

    let mut visited = vec![false; n];
    let mut discovered = vec![root];
    let mut tree_edges: Vec<[usize; 2]> = Vec::with_capacity(n - 1);
    let mut queue = VecDeque::from([root]);
    visited[root] = true;
    while let Some(u) = queue.pop_front() {
        for &v in &graph[u] {
            if v >= n {
                return Err(TreeError::DanglingChild { parent: u, child: v, n });
            }
            if visited[v] {
                continue;
            }
            visited[v] = true;
            discovered.push(v);
            queue.push_back(v);
            tree_edges.push([u, v]);
        }
    }
    if let Some(node) = visited.iter().position(|&seen| !seen) {
        return Err(TreeError::Disconnected { node });
    }

    let mut label = vec![0usize; n];
    for (i, &v) in discovered.iter().enumerate() {
        label[v] = i;
    }
    let edges: Vec<[usize; 2]> = tree_edges.iter().map(|&[u, v]| [label[u], label[v]]).collect();

    let mut children = vec![Vec::new(); n];
    for &[u, v] in &edges {
        children[u].push(v);
    }
    Ok((edges, children))
}

// ---------------------------------------------------------------------------
// Fixed shapes (root 0, labels breadth-first)
// ---------------------------------------------------------------------------

/// `0 -> 1 -> ... -> n-1`.
pub fn path_tree(n: usize) -> Vec<Vec<usize>> {
    (0..n)
        .map(|v| if v + 1 < n { vec![v + 1] } else { Vec::new() })
        .collect()
}

/// Root 0 with `leaves` leaf children.
pub fn star_tree(leaves: usize) -> Vec<Vec<usize>> {
    let mut children = vec![(1..=leaves).collect::<Vec<_>>()];
    children.extend((0..leaves).map(|_| Vec::new()));
    children
}

/// Complete tree where every internal node has `arity` children and every
/// leaf sits at `depth`.
pub fn kary_tree(arity: usize, depth: u32) -> Vec<Vec<usize>> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new()];
    let mut frontier = vec![0usize];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * arity);
        for &v in &frontier {
            for _ in 0..arity {
                let u = children.len();
                children.push(Vec::new());
                children[v].push(u);
                next.push(u);
            }
        }
        frontier = next;
    }
    children
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
