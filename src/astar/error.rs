// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Recommended number of allowed node expansions in [find_route](crate::find_route)
/// before [AStarError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur during [find_route](crate::find_route)
/// or [Graph::find_shortest_path](crate::Graph::find_shortest_path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AStarError {
    /// The start or end nodes don't exist in a graph.
    InvalidReference(i64),

    /// The graph has no nodes, so positions can't be resolved to nodes.
    EmptyGraph,

    /// All nodes reachable from `from` were expanded without reaching `to`.
    Unreachable { from: i64, to: i64 },

    /// Route search has exceeded its limit of steps.
    /// Either the nodes are really far apart, or no route exists.
    ///
    /// Concluding that no route exists requires traversing the whole connected
    /// component of the start node. The step limit bounds the time spent on that.
    StepLimitExceeded,
}

impl std::fmt::Display for AStarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference(node_id) => write!(f, "invalid node: {}", node_id),
            Self::EmptyGraph => write!(f, "graph has no nodes"),
            Self::Unreachable { from, to } => write!(f, "no route from {} to {}", from, to),
            Self::StepLimitExceeded => write!(f, "step limit exceeded"),
        }
    }
}

impl std::error::Error for AStarError {}
