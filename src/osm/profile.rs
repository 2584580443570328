// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Describes which OSM ways become edges of a [Graph](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Human readable name of the profile. Not used for OSM data interpretation.
    pub name: &'a str,

    /// Tag key checked against [Profile::values], e.g. "highway".
    pub key: &'a str,

    /// Values under [Profile::key] of ways which can be used for routing.
    ///
    /// For example, with `key: "highway"` and `values: &["primary", "residential"]`,
    /// a `highway=primary` way becomes a sequence of edges, while
    /// `highway=footway` and `building=yes` ways are ignored.
    pub values: &'a [&'a str],
}

impl<'a> Profile<'a> {
    /// Checks if a way with the given tags should become edges of the graph.
    pub fn is_valid_way(&self, tags: &HashMap<String, String>) -> bool {
        tags.get(self.key)
            .is_some_and(|v| self.values.contains(&v.as_str()))
    }
}

/// Profile for routing over roads open to general traffic.
pub const ROAD_PROFILE: Profile<'static> = Profile {
    name: "road",
    key: "highway",
    values: &[
        "motorway",
        "trunk",
        "primary",
        "secondary",
        "tertiary",
        "unclassified",
        "residential",
        "living_street",
        "motorway_link",
        "trunk_link",
        "primary_link",
        "secondary_link",
        "tertiary_link",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! tags {
        {} => { HashMap::default() };
        {$( $k:literal : $v:literal ),+} => {
            HashMap::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
        };
    }

    #[test]
    fn is_valid_way() {
        assert!(ROAD_PROFILE.is_valid_way(&tags! {"highway": "primary"}));
        assert!(ROAD_PROFILE.is_valid_way(&tags! {"highway": "living_street", "name": "Elm"}));
        assert!(ROAD_PROFILE.is_valid_way(&tags! {"highway": "tertiary_link"}));

        assert!(!ROAD_PROFILE.is_valid_way(&tags! {}));
        assert!(!ROAD_PROFILE.is_valid_way(&tags! {"highway": "footway"}));
        assert!(!ROAD_PROFILE.is_valid_way(&tags! {"highway": "unclassified_link"}));
        assert!(!ROAD_PROFILE.is_valid_way(&tags! {"railway": "rail"}));
        assert!(!ROAD_PROFILE.is_valid_way(&tags! {"building": "yes"}));
    }

    #[test]
    fn custom_profile() {
        const RAIL: Profile<'static> = Profile {
            name: "rail",
            key: "railway",
            values: &["rail", "light_rail"],
        };

        assert!(RAIL.is_valid_way(&tags! {"railway": "light_rail"}));
        assert!(!RAIL.is_valid_way(&tags! {"highway": "primary"}));
    }
}
