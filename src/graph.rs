// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::BTreeSet;

use log::info;

use crate::locations::LocationIndex;
use crate::{
    clean_name, euclidean_distance, find_route, AStarError, Location, NameTrie, Node,
    DEFAULT_STEP_LIMIT,
};

/// Represents an OpenStreetMap road network as a set of [Nodes](Node)
/// and undirected edges between them, together with indices over node names.
///
/// Graphs are created with a [GraphBuilder](crate::GraphBuilder),
/// and are read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: BTreeMap<i64, (Node, BTreeSet<i64>)>,
    names: NameTrie,
    locations: LocationIndex,
}

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over ids of all nodes in the graph.
    pub fn vertices(&self) -> impl Iterator<Item = i64> + '_ {
        self.nodes.keys().copied()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().map(|(node, _)| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: i64) -> Option<&Node> {
        self.nodes.get(&id).map(|(node, _)| node)
    }

    /// Returns the longitude of a node with the provided id.
    pub fn lon(&self, id: i64) -> Option<f64> {
        self.get_node(id).map(|n| n.lon)
    }

    /// Returns the latitude of a node with the provided id.
    pub fn lat(&self, id: i64) -> Option<f64> {
        self.get_node(id).map(|n| n.lat)
    }

    /// Returns ids of all nodes directly connected with the node with the provided id.
    /// Unknown ids have no neighbors.
    pub fn adjacent(&self, id: i64) -> impl Iterator<Item = i64> + '_ {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|(_, neighbors)| neighbors.iter().copied())
    }

    /// Returns the [euclidean distance](euclidean_distance) between two nodes,
    /// or `None` if any of them doesn't exist.
    pub fn distance(&self, a: i64, b: i64) -> Option<f64> {
        let a = self.get_node(a)?;
        let b = self.get_node(b)?;
        Some(euclidean_distance(a.lon, a.lat, b.lon, b.lat))
    }

    /// Finds the id of the node closest to the given position.
    /// Returns `None` only if the graph is empty.
    ///
    /// This function requires computing the distance to every [Node] in the graph.
    pub fn closest(&self, lon: f64, lat: f64) -> Option<i64> {
        self.iter()
            .map(|n| (euclidean_distance(lon, lat, n.lon, n.lat), n.id))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.total_cmp(b_dist))
            .map(|(_, id)| id)
    }

    /// Finds the shortest path between nodes closest to the provided start and destination
    /// positions, using [find_route] with [DEFAULT_STEP_LIMIT].
    pub fn find_shortest_path(
        &self,
        start_lon: f64,
        start_lat: f64,
        dest_lon: f64,
        dest_lat: f64,
    ) -> Result<Vec<i64>, AStarError> {
        let from_id = self
            .closest(start_lon, start_lat)
            .ok_or(AStarError::EmptyGraph)?;
        let to_id = self
            .closest(dest_lon, dest_lat)
            .ok_or(AStarError::EmptyGraph)?;
        find_route(self, from_id, to_id, DEFAULT_STEP_LIMIT).map(|route| route.nodes)
    }

    /// Returns full names of all places whose [cleaned](clean_name) name starts with
    /// the cleaned `prefix`. See [NameTrie::find_matches] for ordering guarantees.
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        self.names.find_matches(&clean_name(prefix))
    }

    /// Returns all places whose [cleaned](clean_name) name is equal to the cleaned `name`.
    ///
    /// Places are indexed before unconnected nodes are removed from the graph,
    /// so returned ids don't need to exist in the graph.
    pub fn get_locations(&self, name: &str) -> &[Location] {
        self.locations.get(&clean_name(name))
    }

    /// Adds a new, unconnected [Node]. Returns `false` (leaving the graph untouched)
    /// if a node with the same id already exists.
    pub(crate) fn insert_node(&mut self, node: Node) -> bool {
        match self.nodes.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert((node, BTreeSet::default()));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub(crate) fn get_node_mut(&mut self, id: i64) -> Option<&mut Node> {
        self.nodes.get_mut(&id).map(|(node, _)| node)
    }

    /// Connects two existing nodes in both directions. Returns `false` if any
    /// of the nodes doesn't exist.
    pub(crate) fn insert_edge(&mut self, a: i64, b: i64) -> bool {
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return false;
        }

        if let Some((_, neighbors)) = self.nodes.get_mut(&a) {
            neighbors.insert(b);
        }
        if let Some((_, neighbors)) = self.nodes.get_mut(&b) {
            neighbors.insert(a);
        }
        true
    }

    pub(crate) fn insert_name(&mut self, name: &str) {
        self.names.insert(&clean_name(name), name);
    }

    /// Indexes named nodes for [Graph::get_locations], and then removes all nodes
    /// without any edges.
    pub(crate) fn finalize(&mut self) {
        self.locations = LocationIndex::build(self.iter());

        let before = self.nodes.len();
        self.nodes.retain(|_, (_, neighbors)| !neighbors.is_empty());

        info!(
            "graph finalized: {} nodes kept, {} unconnected nodes removed, {} locations and {} names indexed",
            self.nodes.len(),
            before - self.nodes.len(),
            self.locations.len(),
            self.names.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphBuilder;

    //   1───2───3
    //       │
    //       4       5 (unconnected, "Lonely Cafe")
    fn small_graph() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_node(1, 0.0, 0.0).unwrap();
        b.add_node(2, 1.0, 0.0).unwrap();
        b.add_name_to_node("Main & 1st").unwrap();
        b.add_node(3, 2.0, 0.0).unwrap();
        b.add_node(4, 1.0, -1.0).unwrap();
        b.add_node(5, 5.0, 5.0).unwrap();
        b.add_name_to_node("Lonely Cafe").unwrap();

        for id in [1, 2, 3] {
            b.add_way_node(id);
        }
        b.set_valid_way(true);
        b.process_way();

        b.add_way_node(2);
        b.add_way_node(4);
        b.set_valid_way(true);
        b.process_way();

        b.finish()
    }

    #[test]
    fn vertices_after_pruning() {
        let g = small_graph();
        assert_eq!(g.len(), 4);
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(g.vertices().count(), g.vertices().count());
        assert!(g.get_node(5).is_none());
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = small_graph();
        assert_eq!(g.adjacent(2).collect::<Vec<_>>(), vec![1, 3, 4]);
        for a in g.vertices() {
            for b in g.adjacent(a) {
                assert!(g.adjacent(b).any(|x| x == a), "{b} should neighbor {a}");
            }
        }
        assert_eq!(g.adjacent(5).count(), 0);
        assert_eq!(g.adjacent(42).count(), 0);
    }

    #[test]
    fn accessors() {
        let g = small_graph();
        assert_eq!(g.lon(4), Some(1.0));
        assert_eq!(g.lat(4), Some(-1.0));
        assert_eq!(g.lon(5), None);
        assert_eq!(g.distance(1, 3), Some(2.0));
        assert_eq!(g.distance(1, 5), None);
        assert_eq!(g.get_node(2).map(|n| n.name.as_str()), Some("Main & 1st"));
    }

    #[test]
    fn closest() {
        let g = small_graph();
        assert_eq!(g.closest(0.1, 0.1), Some(1));
        assert_eq!(g.closest(1.2, -0.8), Some(4));
        // 5 was pruned, so 3 is the closest remaining node
        assert_eq!(g.closest(5.0, 5.0), Some(3));
        assert!(Graph::default().closest(0.0, 0.0).is_none());
    }

    #[test]
    fn closest_single_node() {
        let mut b = GraphBuilder::new();
        b.add_node(1, 0.0, 0.0).unwrap();
        b.add_node(2, 0.0, 1.0).unwrap();
        b.add_way_node(1);
        b.add_way_node(2);
        b.set_valid_way(true);
        b.process_way();
        let mut g = b.finish();
        g.nodes.remove(&2);

        assert_eq!(g.closest(100.0, -100.0), Some(1));
        assert_eq!(g.closest(0.0, 0.0), Some(1));
    }

    #[test]
    fn locations_survive_pruning() {
        let g = small_graph();
        assert_eq!(
            g.get_locations("lonely cafe"),
            &[Location {
                id: 5,
                name: "Lonely Cafe".to_string(),
                lon: 5.0,
                lat: 5.0,
            }]
        );
        assert_eq!(g.get_locations("MAIN 1ST").len(), 0);
        assert_eq!(g.get_locations("main  st")[0].id, 2);
        assert!(g.get_locations("Unknown").is_empty());
    }

    #[test]
    fn find_shortest_path_from_positions() {
        let g = small_graph();
        assert_eq!(
            g.find_shortest_path(-0.1, 0.1, 1.1, -0.9),
            Ok(vec![1, 2, 4])
        );
        assert_eq!(g.find_shortest_path(2.0, 0.0, 2.1, 0.1), Ok(vec![3]));
        assert_eq!(
            Graph::default().find_shortest_path(0.0, 0.0, 1.0, 1.0),
            Err(AStarError::EmptyGraph)
        );
    }
}
