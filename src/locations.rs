// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{clean_name, Location, Node};

/// Maps [cleaned names](crate::clean_name) to all named places carrying that name.
///
/// The index is built once, from a snapshot of all nodes, and is never updated afterwards.
#[derive(Debug, Clone, Default)]
pub(crate) struct LocationIndex(HashMap<String, Vec<Location>>);

impl LocationIndex {
    /// Indexes every [Node] with a non-empty name. The order of locations sharing
    /// a name follows the order of the provided iterator.
    pub(crate) fn build<'a, I: IntoIterator<Item = &'a Node>>(nodes: I) -> Self {
        let mut index: HashMap<String, Vec<Location>> = HashMap::default();

        for node in nodes.into_iter().filter(|n| !n.name.is_empty()) {
            index
                .entry(clean_name(&node.name))
                .or_default()
                .push(Location::from(node));
        }

        Self(index)
    }

    /// Returns the total number of indexed locations.
    pub(crate) fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Returns all locations whose cleaned name is exactly equal to `clean`.
    pub(crate) fn get(&self, clean: &str) -> &[Location] {
        self.0.get(clean).map(Vec::as_slice).unwrap_or_default()
    }
}
