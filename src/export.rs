// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator - Viewer Document Export

use serde::{Deserialize, Serialize};

use crate::generator::{graph_to_tree, random_tree, DEFAULT_SEED};
use crate::simulation::{Exploration, SimulationError};
use crate::tree_index::TreeIndex;
use crate::types::{NodeStatus, RoundSnapshot};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<crate::tree_index::TreeError> for ExportError {
    fn from(err: crate::tree_index::TreeError) -> Self {
        Self::Simulation(SimulationError::InvalidTree(err))
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Inputs for one random-tree exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationParams {
    pub nodes: usize,
    pub robots: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub n: usize,
    pub edges: Vec<[usize; 2]>,
    pub adjacency_list: Vec<Vec<usize>>,
}

impl Graph {
    pub fn from_tree(tree: &TreeIndex) -> Self {
        Self {
            n: tree.len(),
            edges: tree.edges().iter().map(|&(p, c)| [p, c]).collect(),
            adjacency_list: tree.child_lists().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub step: u64,
    pub robots: Vec<usize>,
    pub robot_count: Vec<u32>,
    pub node_status: Vec<NodeStatus>,
    pub traversed: Vec<bool>,
}

impl From<RoundSnapshot> for Step {
    fn from(snapshot: RoundSnapshot) -> Self {
        Self {
            step: snapshot.round,
            robots: snapshot.positions,
            robot_count: snapshot.robot_count,
            node_status: snapshot.status,
            traversed: snapshot.traversed,
        }
    }
}

/// Everything a viewer needs to animate one exploration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationDocument {
    pub tree: Graph,
    pub steps: Vec<Step>,
}

impl ExplorationDocument {
    /// Run `exploration` to the end and capture every round.
    pub fn record(exploration: Exploration) -> Result<Self, SimulationError> {
        let tree = Graph::from_tree(exploration.tree());
        let steps = exploration
            .map(|round| round.map(Step::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tree, steps })
    }
}

/// Generate a random tree from `params`, explore it from its root and build
/// the viewer document.
pub fn build_document(params: &ExplorationParams) -> Result<ExplorationDocument, ExportError> {
    let graph = random_tree(params.nodes, params.seed)?;
    let (_, children) = graph_to_tree(&graph)?;
    let exploration = Exploration::from_children(children, 0, params.robots)?;
    Ok(ExplorationDocument::record(exploration)?)
}

/// Same as [`build_document`], serialized to JSON.
pub fn run(params: &ExplorationParams) -> Result<String, ExportError> {
    Ok(serde_json::to_string(&build_document(params)?)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
