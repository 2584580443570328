// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest routes and place name lookup over [OpenStreetMap](https://www.openstreetmap.org/) data.
//!
//! Road intersections become nodes of an undirected [Graph], and consecutive nodes of
//! every road [way](https://wiki.openstreetmap.org/wiki/Way) become its edges.
//! Edges cost the planar euclidean distance between their endpoints, and A* is used
//! to find shortest paths. Named nodes additionally feed a prefix index for
//! autocompletion and an exact (case- and punctuation-insensitive) name lookup.
//!
//! # Example
//!
//! ```no_run
//! let osm_options = roadmap::osm::Options {
//!     profile: &roadmap::osm::ROAD_PROFILE,
//!     file_format: roadmap::osm::FileFormat::Unknown,
//!     bbox: [0.0; 4],
//! };
//! let g = roadmap::osm::load_graph_from_file(&osm_options, "path/to/berkeley.osm")
//!     .expect("failed to load berkeley.osm");
//!
//! let route = g
//!     .find_shortest_path(-122.2588, 37.8723, -122.2683, 37.8705)
//!     .expect("failed to find route");
//! println!("Route: {:?}", route);
//!
//! for name in g.autocomplete("top") {
//!     println!("{name}: {:?}", g.get_locations(&name));
//! }
//! ```

mod astar;
mod builder;
mod clean;
mod distance;
mod graph;
mod locations;
pub mod osm;
mod trie;

pub use astar::{find_route, AStarError, Route, DEFAULT_STEP_LIMIT};
pub use builder::{BuildError, GraphBuilder};
pub use clean::clean_name;
pub use distance::euclidean_distance;
pub use graph::Graph;
pub use trie::NameTrie;

/// Represents an element of the [Graph]: a road intersection,
/// optionally carrying the name of a place.
///
/// Nodes are immutable once the [Graph] is [built](GraphBuilder::finish);
/// route search keeps all of its state outside of the nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,

    /// Display name of the node, empty if the node has no name.
    pub name: String,
}

/// A named place returned by [Graph::get_locations].
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl From<&Node> for Location {
    fn from(n: &Node) -> Self {
        Self {
            id: n.id,
            name: n.name.clone(),
            lon: n.lon,
            lat: n.lat,
        }
    }
}
