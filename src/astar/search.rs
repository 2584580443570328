// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::{euclidean_distance, AStarError, Graph};

/// Result of a successful [find_route].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Ids of nodes on the route, from the start to the end node (both inclusive).
    pub nodes: Vec<i64>,

    /// Sum of lengths of all edges on the route.
    pub cost: f64,
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: i64,
    cost: f64,
    score: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.score.total_cmp(&other.score).is_eq()
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.score.total_cmp(&self.score)
    }
}

fn reconstruct_path(came_from: &HashMap<i64, i64>, mut last: i64) -> Vec<i64> {
    let mut path = vec![last];

    while let Some(&nd) = came_from.get(&last) {
        path.push(nd);
        last = nd;
    }

    path.reverse();
    path
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest route between two nodes in the provided graph.
///
/// Edges cost the [euclidean distance](euclidean_distance) between their endpoints,
/// and the same distance to the end node is used as the heuristic.
///
/// All search state is kept in the function, and the graph is only read,
/// so multiple searches may run over the same graph concurrently.
///
/// `step_limit` limits how many nodes may be expanded during the search
/// before returning [AStarError::StepLimitExceeded]. The recommended value is
/// [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_route(
    g: &Graph,
    from_id: i64,
    to_id: i64,
    step_limit: usize,
) -> Result<Route, AStarError> {
    let to_node = g
        .get_node(to_id)
        .ok_or(AStarError::InvalidReference(to_id))?;
    let from_node = g
        .get_node(from_id)
        .ok_or(AStarError::InvalidReference(from_id))?;

    if from_id == to_id {
        return Ok(Route {
            nodes: vec![from_id],
            cost: 0.0,
        });
    }

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<i64, i64> = HashMap::default();
    let mut known_costs: HashMap<i64, f64> = HashMap::default();
    let mut expanded: HashSet<i64> = HashSet::default();
    let mut steps: usize = 0;

    queue.push(QueueItem {
        at: from_id,
        cost: 0.0,
        score: euclidean_distance(from_node.lon, from_node.lat, to_node.lon, to_node.lat),
    });
    known_costs.insert(from_id, 0.0);

    while let Some(item) = queue.pop() {
        // A node is re-pushed whenever a cheaper way to it is found,
        // so older items for already expanded nodes must be skipped.
        if !expanded.insert(item.at) {
            continue;
        }

        if item.at == to_id {
            return Ok(Route {
                nodes: reconstruct_path(&came_from, to_id),
                cost: item.cost,
            });
        }

        steps += 1;
        if steps > step_limit {
            return Err(AStarError::StepLimitExceeded);
        }

        let Some(at_node) = g.get_node(item.at) else {
            continue;
        };

        for neighbor_id in g.adjacent(item.at) {
            let Some(neighbor) = g.get_node(neighbor_id) else {
                continue;
            };

            // Check if this is the cheapest way to the neighbor
            let neighbor_cost = item.cost
                + euclidean_distance(at_node.lon, at_node.lat, neighbor.lon, neighbor.lat);
            if neighbor_cost
                >= known_costs
                    .get(&neighbor_id)
                    .copied()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            // Push the new item into the queue
            came_from.insert(neighbor_id, item.at);
            known_costs.insert(neighbor_id, neighbor_cost);
            queue.push(QueueItem {
                at: neighbor_id,
                cost: neighbor_cost,
                score: neighbor_cost
                    + euclidean_distance(neighbor.lon, neighbor.lat, to_node.lon, to_node.lat),
            });
        }
    }

    Err(AStarError::Unreachable {
        from: from_id,
        to: to_id,
    })
}
