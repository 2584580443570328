// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use log::debug;

use crate::GraphBuilder;

use super::{model, Error, Options};

/// Helper object translating a stream of [OSM features](super::model::Feature)
/// into calls on a [GraphBuilder].
pub(super) struct Loader<'a> {
    b: &'a mut GraphBuilder,
    options: &'a Options<'a>,
    ignore_bbox: bool,
}

impl<'a> Loader<'a> {
    pub(super) fn new(b: &'a mut GraphBuilder, options: &'a Options<'a>) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());

        Self {
            b,
            options,
            ignore_bbox,
        }
    }

    /// Add all features from the provided iterator.
    pub(super) fn add_features<I, E>(&mut self, features: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Result<model::Feature, E>>,
        Error: From<E>,
    {
        for f in features {
            self.add_feature(f?)?;
        }
        Ok(())
    }

    fn add_feature(&mut self, f: model::Feature) -> Result<(), Error> {
        match f {
            model::Feature::Node(n) => self.add_node(n),
            model::Feature::Way(w) => {
                self.add_way(w);
                Ok(())
            }
        }
    }

    fn add_node(&mut self, n: model::Node) -> Result<(), Error> {
        if !self.is_in_bbox(n.lon, n.lat) {
            debug!("skipping node {}: outside of the bounding box", n.id);
            return Ok(());
        }

        self.b.add_node(n.id, n.lon, n.lat)?;

        if let Some(name) = n.tags.get("name") {
            self.b.add_name_to_node(name)?;
            self.b.add_name_to_trie(name);
        }

        Ok(())
    }

    fn is_in_bbox(&self, lon: f64, lat: f64) -> bool {
        if self.ignore_bbox {
            return true;
        }
        let [min_lon, min_lat, max_lon, max_lat] = self.options.bbox;
        lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
    }

    fn add_way(&mut self, w: model::Way) {
        for &node_id in &w.nodes {
            self.b.add_way_node(node_id);
        }
        self.b.set_valid_way(self.options.profile.is_valid_way(&w.tags));
        self.b.process_way();
    }
}
