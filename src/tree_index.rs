// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Tree Index

use serde::Serialize;
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Malformed tree input. Detected once, before any round runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("node {parent} lists child {child}, but the tree has only {n} nodes")]
    DanglingChild { parent: usize, child: usize, n: usize },

    #[error("root {root} is out of range for a tree of {n} nodes")]
    RootOutOfRange { root: usize, n: usize },

    #[error("root {root} is listed as a child of node {parent}")]
    RootHasParent { root: usize, parent: usize },

    #[error("more than one node has no parent: {0:?}")]
    MultipleRoots(Vec<usize>),

    #[error("node {node} has more than one parent")]
    MultipleParents { node: usize },

    #[error("cycle detected: {unreached} node(s) are not reachable from root {root}")]
    Cycle { root: usize, unreached: usize },

    #[error("graph is disconnected: node {node} is unreachable")]
    Disconnected { node: usize },
}

// ---------------------------------------------------------------------------
// TreeIndex
// ---------------------------------------------------------------------------

/// Static structure of a rooted tree, derived once from its child lists.
///
/// Nodes are `0..n`. `order` lists every node breadth-first from the root, so
/// walking it forwards visits parents before children and walking it backwards
/// visits children before parents. `edges`, `leaves` and `internal_nodes`
/// all follow that same order.
#[derive(Debug, Clone, Serialize)]
pub struct TreeIndex {
    root: usize,
    children: Vec<Vec<usize>>,
    parent: Vec<Option<usize>>,
    order: Vec<usize>,
    edges: Vec<(usize, usize)>,
    leaves: Vec<usize>,
    internal_nodes: Vec<usize>,
    height: usize,
}

impl TreeIndex {
    /// Index a directed tree given as ordered child lists.
    ///
    /// # Errors
    /// - `Empty` if there are no nodes.
    /// - `DanglingChild` / `RootOutOfRange` for indices outside `0..n`.
    /// - `MultipleParents` if a node appears in two child lists.
    /// - `RootHasParent` if `root` appears in a child list.
    /// - `MultipleRoots` if a node other than `root` has no incoming edge.
    /// - `Cycle` if some node cannot be reached from `root`.
    pub fn new(children: Vec<Vec<usize>>, root: usize) -> Result<Self, TreeError> {
        let n = children.len();
        if n == 0 {
            return Err(TreeError::Empty);
        }
        if root >= n {
            return Err(TreeError::RootOutOfRange { root, n });
        }

        let mut parent = vec![None; n];
        for (v, adj) in children.iter().enumerate() {
            for &u in adj {
                if u >= n {
                    return Err(TreeError::DanglingChild { parent: v, child: u, n });
                }
                if u == root {
                    return Err(TreeError::RootHasParent { root, parent: v });
                }
                if parent[u].is_some() {
                    return Err(TreeError::MultipleParents { node: u });
                }
                parent[u] = Some(v);
            }
        }

        let orphans: Vec<usize> = (0..n).filter(|&v| v != root && parent[v].is_none()).collect();
        if !orphans.is_empty() {
            let mut roots = vec![root];
            roots.extend(orphans);
            return Err(TreeError::MultipleRoots(roots));
        }

        // Every non-root node has exactly one parent, so anything the BFS
        // misses sits on a parent cycle detached from the root.
        let mut order = Vec::with_capacity(n);
        let mut depth = vec![0usize; n];
        let mut queue = VecDeque::from([root]);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &u in &children[v] {
                depth[u] = depth[v] + 1;
                queue.push_back(u);
            }
        }
        if order.len() != n {
            return Err(TreeError::Cycle { root, unreached: n - order.len() });
        }

        let edges: Vec<(usize, usize)> = order
            .iter()
            .flat_map(|&v| children[v].iter().map(move |&u| (v, u)))
            .collect();
        let (internal_nodes, leaves): (Vec<usize>, Vec<usize>) =
            order.iter().copied().partition(|&v| !children[v].is_empty());
        let height = depth.iter().copied().max().unwrap_or(0);

        Ok(Self {
            root,
            children,
            parent,
            order,
            edges,
            leaves,
            internal_nodes,
            height,
        })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn children(&self, v: usize) -> &[usize] {
        &self.children[v]
    }

    pub fn child_lists(&self) -> &[Vec<usize>] {
        &self.children
    }

    /// `None` for the root.
    pub fn parent(&self, v: usize) -> Option<usize> {
        self.parent[v]
    }

    pub fn is_leaf(&self, v: usize) -> bool {
        self.children[v].is_empty()
    }

    /// Nodes in breadth-first order from the root.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// `(parent, child)` pairs; a node's incoming edge precedes its outgoing ones.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn leaves(&self) -> &[usize] {
        &self.leaves
    }

    pub fn internal_nodes(&self) -> &[usize] {
        &self.internal_nodes
    }

    /// Longest root-to-leaf path, in edges.
    pub fn height(&self) -> usize {
        self.height
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
