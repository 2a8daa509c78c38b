// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Collective Tree Exploration Simulator

pub mod types;
pub mod tree_index;
pub mod occupancy;
pub mod classifier;
pub mod allocator;
pub mod invariants;
pub mod simulation;
pub mod generator;
pub mod export;

pub use types::*;
pub use simulation::{Exploration, SimulationError};
pub use tree_index::{TreeError, TreeIndex};

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl Exploration {
    /// Explore a random tree of `nodes` nodes, rooted at its highest-degree
    /// node, with `robots` agents.
    #[wasm_bindgen(constructor)]
    pub fn random(nodes: u32, robots: u32, seed: u64) -> Result<Exploration, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let graph = generator::random_tree(nodes as usize, seed).map_err(to_js_error)?;
        let (_, children) = generator::graph_to_tree(&graph).map_err(to_js_error)?;
        Exploration::from_children(children, 0, robots as usize).map_err(to_js_error)
    }

    /// Next round as a snapshot object, or `null` once every node is finished.
    /// The first call returns round 0.
    pub fn tick(&mut self) -> Result<JsValue, JsValue> {
        match self.next() {
            Some(Ok(snapshot)) => serde_wasm_bindgen::to_value(&snapshot).map_err(JsValue::from),
            Some(Err(err)) => Err(to_js_error(err)),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn get_tree(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&export::Graph::from_tree(&self.tree))
            .unwrap_or(JsValue::NULL)
    }

    pub fn get_round(&self) -> u64 {
        self.round
    }

    pub fn is_done(&self) -> bool {
        self.is_terminated()
    }

    /// Rewind to round 0 on the same tree.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        *self = Exploration::new(self.tree.clone(), self.robots).map_err(to_js_error)?;
        Ok(())
    }
}

/// Full viewer document for a random tree, as a JSON string.
#[wasm_bindgen]
pub fn run_json(nodes: u32, robots: u32, seed: u64) -> Result<String, JsValue> {
    export::run(&export::ExplorationParams {
        nodes: nodes as usize,
        robots: robots as usize,
        seed,
    })
    .map_err(to_js_error)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
