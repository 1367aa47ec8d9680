//! Recompute pipeline ordering.
//!
//! Each dependent component is a stage that declares what it reads.
//! The pipeline builds a dependency graph from those declarations and
//! topologically sorts it once at character construction, so mutation
//! entry points never hand-roll a cascade and can never run a stage
//! before its inputs are fresh.

use crate::error::BuildError;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A recompute stage, one per dependent component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Resources,
    Derived,
    Combat,
    Resistances,
}

impl Stage {
    /// All stages, in declaration order (not execution order).
    pub const ALL: [Stage; 4] = [
        Stage::Resources,
        Stage::Derived,
        Stage::Combat,
        Stage::Resistances,
    ];

    /// Stages whose freshly recomputed output this stage reads.
    ///
    /// Base stats and attributes are upstream of every stage and are not
    /// themselves recomputed, so they do not appear here.
    pub fn depends_on(self) -> &'static [Stage] {
        match self {
            Stage::Resources => &[],
            Stage::Derived => &[Stage::Resources],
            Stage::Combat => &[],
            Stage::Resistances => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Resources => "resources",
            Stage::Derived => "derived",
            Stage::Combat => "combat",
            Stage::Resistances => "resistances",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Topologically sorted recompute order over the stages.
///
/// # Examples
///
/// ```rust
/// use aurastat::pipeline::{RecomputePipeline, Stage};
///
/// let pipeline = RecomputePipeline::new().unwrap();
/// let order = pipeline.order();
///
/// // Derived reads resources, so resources must come first
/// let resources = order.iter().position(|&s| s == Stage::Resources).unwrap();
/// let derived = order.iter().position(|&s| s == Stage::Derived).unwrap();
/// assert!(resources < derived);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputePipeline {
    order: Vec<Stage>,
}

impl RecomputePipeline {
    /// Build the stage graph and sort it.
    ///
    /// Fails with `BuildError::StageCycle` if the declared dependencies
    /// ever form a cycle.
    pub fn new() -> Result<Self, BuildError> {
        let mut graph: DiGraph<Stage, ()> = DiGraph::new();
        let mut nodes: HashMap<Stage, NodeIndex> = HashMap::new();

        for stage in Stage::ALL {
            nodes.insert(stage, graph.add_node(stage));
        }
        for stage in Stage::ALL {
            for &dep in stage.depends_on() {
                // dep must run before stage
                graph.add_edge(nodes[&dep], nodes[&stage], ());
            }
        }

        // Cycle check up front; an acyclic graph always has a ready
        // stage at every step of the selection below
        toposort(&graph, None).map_err(|cycle| BuildError::StageCycle {
            path: vec![graph[cycle.node_id()]],
        })?;

        // Stable topological order: among ready stages, always pick the
        // earliest in declaration order, so independent stages keep a
        // deterministic position. A raw toposort result would be a valid
        // order too, but not the fixed resources, derived, combat,
        // resistances one the mutation entry points promise.
        let mut order: Vec<Stage> = Vec::with_capacity(Stage::ALL.len());
        for _ in 0..Stage::ALL.len() {
            if let Some(stage) = Stage::ALL.iter().copied().find(|&stage| {
                !order.contains(&stage)
                    && stage.depends_on().iter().all(|dep| order.contains(dep))
            }) {
                order.push(stage);
            }
        }
        debug_assert_eq!(order.len(), Stage::ALL.len());
        Ok(Self { order })
    }

    /// The stages in execution order.
    pub fn order(&self) -> &[Stage] {
        &self.order
    }
}
