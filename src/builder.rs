// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use log::{debug, warn};

use crate::{Graph, Node};

/// Error returned when [GraphBuilder] methods are called out of order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("node {0} already exists")]
    DuplicateNode(i64),

    #[error("name can only be set immediately after adding a node")]
    NoNodeToName,
}

/// Construction session of a [Graph].
///
/// A document parser is expected to drive the builder with the following protocol:
/// 1. [add_node](GraphBuilder::add_node) for every node, optionally followed by
///    [add_name_to_node](GraphBuilder::add_name_to_node) and
///    [add_name_to_trie](GraphBuilder::add_name_to_trie);
/// 2. for every way, [add_way_node](GraphBuilder::add_way_node) for each of its members,
///    then [set_valid_way](GraphBuilder::set_valid_way) and finally
///    [process_way](GraphBuilder::process_way);
/// 3. [finish](GraphBuilder::finish) once the whole document was consumed.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    g: Graph,

    /// Node which may still receive a name.
    last_node: Option<i64>,

    way: Vec<i64>,
    valid_way: bool,
}

impl GraphBuilder {
    /// Create a new, empty graph builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new, unnamed node. Fails if a node with the same id was already added.
    pub fn add_node(&mut self, id: i64, lon: f64, lat: f64) -> Result<(), BuildError> {
        let node = Node {
            id,
            lon,
            lat,
            name: String::default(),
        };

        if self.g.insert_node(node) {
            self.last_node = Some(id);
            Ok(())
        } else {
            self.last_node = None;
            Err(BuildError::DuplicateNode(id))
        }
    }

    /// Sets the name of the most recently added node.
    ///
    /// Fails if no node was added yet, or if the way protocol has started
    /// since the last [add_node](GraphBuilder::add_node).
    pub fn add_name_to_node(&mut self, name: &str) -> Result<(), BuildError> {
        let node = self
            .last_node
            .and_then(|id| self.g.get_node_mut(id))
            .ok_or(BuildError::NoNodeToName)?;
        node.name = name.to_string();
        Ok(())
    }

    /// Makes `name` available for [autocompletion](Graph::autocomplete).
    pub fn add_name_to_trie(&mut self, name: &str) {
        self.g.insert_name(name);
    }

    /// Appends a node to the pending way.
    pub fn add_way_node(&mut self, id: i64) {
        self.last_node = None;
        self.way.push(id);
    }

    /// Marks whether the pending way should become edges of the graph.
    pub fn set_valid_way(&mut self, valid: bool) {
        self.last_node = None;
        self.valid_way = valid;
    }

    /// Connects every two consecutive nodes of the pending way, if it was marked as valid.
    /// The pending way is discarded afterwards, regardless of its validity.
    ///
    /// Pairs referring to unknown nodes and pairs of a node with itself are skipped.
    pub fn process_way(&mut self) {
        self.last_node = None;

        if self.valid_way && self.way.len() >= 2 {
            for pair in self.way.windows(2) {
                if pair[0] != pair[1] && !self.g.insert_edge(pair[0], pair[1]) {
                    debug!(
                        "skipping edge {} - {}: reference to unknown node",
                        pair[0], pair[1]
                    );
                }
            }
        }

        self.way.clear();
        self.valid_way = false;
    }

    /// Indexes named nodes, removes nodes without any edges and returns the built [Graph].
    pub fn finish(mut self) -> Graph {
        if !self.way.is_empty() {
            warn!(
                "discarding pending way with {} nodes - process_way was never called",
                self.way.len()
            );
        }

        self.g.finalize();
        self.g
    }
}
