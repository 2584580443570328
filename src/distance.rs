// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Calculates the planar euclidean distance between two lon-lat positions,
/// treating degrees of longitude and latitude as equal units.
///
/// This is not a geodesic distance, but it is consistently used both as the edge cost
/// and as the A* heuristic, which keeps the heuristic admissible.
pub fn euclidean_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    (lon1 - lon2).hypot(lat1 - lat2)
}
