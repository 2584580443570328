// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::io;
use std::str::{from_utf8, FromStr};

use log::warn;
use quick_xml::events::{BytesStart, Event};

use super::model;

/// Parser is a trait for objects which can parse XML.
///
/// This trait only exists to fix the mismatch of
/// [quick_xml::Reader::read_event] when working on buffered data
/// and [quick_xml::Reader::read_event_into] when working on IO.
pub(super) trait Parser {
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<Event<'a>>;
}

/// IoParser implements [Parser] over an [std::io::BufRead].
pub(super) struct IoParser<R: io::BufRead>(quick_xml::Reader<R>, Vec<u8>);

impl<R: io::BufRead> IoParser<R> {
    #[inline]
    fn new(reader: R) -> Self {
        Self(quick_xml::Reader::from_reader(reader), Vec::default())
    }
}

impl<R: io::BufRead> Parser for IoParser<R> {
    #[inline]
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<Event<'a>> {
        self.1.clear();
        self.0.read_event_into(&mut self.1)
    }
}

/// BufParser implements [Parser] over a slice of bytes (`&[u8]`).
pub(super) struct BufParser<'a>(quick_xml::Reader<&'a [u8]>);

impl<'a> BufParser<'a> {
    #[inline]
    fn new(data: &'a [u8]) -> Self {
        Self(quick_xml::Reader::from_reader(data))
    }
}

impl<'a> Parser for BufParser<'a> {
    #[inline]
    fn read_event<'b>(&'b mut self) -> quick_xml::Result<Event<'b>> {
        self.0.read_event()
    }
}

/// Reader reads osm [Features](model::Feature) from an XML file.
pub(super) struct Reader<P: Parser> {
    parser: P,
    eof: bool,
}

impl<P: Parser> Reader<P> {
    #[inline]
    fn new(parser: P) -> Self {
        Self { parser, eof: false }
    }
}

impl<P: Parser> Iterator for Reader<P> {
    type Item = Result<model::Feature, quick_xml::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut f: Option<model::Feature> = None;

        while !self.eof {
            let event = match self.parser.read_event() {
                Ok(e) => e,
                Err(e) => return Some(Err(e)),
            };

            match event {
                Event::Empty(start) => match start.local_name().as_ref() {
                    b"node" => {
                        if let Some(n) = parse_node(&start) {
                            return Some(Ok(model::Feature::Node(n)));
                        }
                    }
                    // "way" can't be self-closing
                    b"tag" => {
                        if let Some(tags) = feature_tags(&mut f) {
                            if let Some((k, v)) = parse_tag(&start) {
                                tags.insert(k, v);
                            }
                        }
                    }
                    b"nd" => {
                        if let Some(nodes) = feature_nodes(&mut f) {
                            if let Some(ref_) = parse_nd(&start) {
                                nodes.push(ref_);
                            }
                        }
                    }
                    _ => {}
                },

                Event::Start(start) => match start.local_name().as_ref() {
                    b"node" => f = parse_node(&start).map(model::Feature::Node),
                    b"way" => f = parse_way(&start).map(model::Feature::Way),
                    // "tag" and "nd" must be self-closing
                    _ => {}
                },

                Event::End(end) => match end.local_name().as_ref() {
                    b"node" | b"way" => {
                        if let Some(f) = f.take() {
                            return Some(Ok(f));
                        }
                    }
                    _ => {}
                },

                Event::Eof => {
                    self.eof = true;
                }

                _ => {}
            }
        }

        f.map(Ok)
    }
}

impl<'a> Reader<BufParser<'a>> {
    #[inline]
    pub(super) fn from_buffer(data: &'a [u8]) -> Self {
        Self::new(BufParser::new(data))
    }
}

impl<R: io::BufRead> Reader<IoParser<R>> {
    #[inline]
    pub(super) fn from_io(reader: R) -> Self {
        Self::new(IoParser::new(reader))
    }
}

fn parse_number<T: FromStr>(value: &[u8]) -> Option<T> {
    from_utf8(value).ok()?.parse().ok()
}

fn parse_node(start: &BytesStart<'_>) -> Option<model::Node> {
    let mut id: Option<i64> = None;
    let mut lat = f64::NAN;
    let mut lon = f64::NAN;

    for attr in start.attributes() {
        let attr = attr
            .map_err(|e| warn!("skipping node with a malformed attribute: {e}"))
            .ok()?;
        match attr.key.as_ref() {
            b"id" => id = parse_number(&attr.value),
            b"lat" => lat = parse_number(&attr.value).unwrap_or(f64::NAN),
            b"lon" => lon = parse_number(&attr.value).unwrap_or(f64::NAN),
            _ => {}
        }
    }

    match id {
        Some(id) if lat.is_finite() && lon.is_finite() => Some(model::Node {
            id,
            lon,
            lat,
            tags: HashMap::default(),
        }),
        _ => {
            warn!("skipping node {id:?}: missing or invalid id, lat or lon");
            None
        }
    }
}

fn parse_way(start: &BytesStart<'_>) -> Option<model::Way> {
    let mut id: Option<i64> = None;

    for attr in start.attributes() {
        let attr = attr
            .map_err(|e| warn!("skipping way with a malformed attribute: {e}"))
            .ok()?;
        if attr.key.as_ref() == b"id" {
            id = parse_number(&attr.value);
        }
    }

    if let Some(id) = id {
        Some(model::Way {
            id,
            nodes: Vec::default(),
            tags: HashMap::default(),
        })
    } else {
        warn!("skipping way without a valid id");
        None
    }
}

fn parse_tag(start: &BytesStart<'_>) -> Option<(String, String)> {
    let mut k = None;
    let mut v = None;

    for attr in start.attributes() {
        let attr = attr
            .map_err(|e| warn!("skipping tag with a malformed attribute: {e}"))
            .ok()?;
        let value = || {
            attr.unescape_value()
                .map_err(|e| warn!("skipping tag with a malformed value: {e}"))
                .ok()
                .map(|s| s.into_owned())
        };
        match attr.key.as_ref() {
            b"k" => k = Some(value()?),
            b"v" => v = Some(value()?),
            _ => {}
        }
    }

    k.map(|k| (k, v.unwrap_or_default()))
}

fn parse_nd(start: &BytesStart<'_>) -> Option<i64> {
    let mut ref_: Option<i64> = None;

    for attr in start.attributes() {
        let attr = attr
            .map_err(|e| warn!("skipping way member with a malformed attribute: {e}"))
            .ok()?;
        if attr.key.as_ref() == b"ref" {
            ref_ = parse_number(&attr.value);
        }
    }

    if ref_.is_none() {
        warn!("skipping way member without a valid ref");
    }
    ref_
}

fn feature_tags(f: &mut Option<model::Feature>) -> Option<&mut HashMap<String, String>> {
    match f {
        Some(model::Feature::Node(ref mut n)) => Some(&mut n.tags),
        Some(model::Feature::Way(ref mut w)) => Some(&mut w.tags),
        None => None,
    }
}

fn feature_nodes(f: &mut Option<model::Feature>) -> Option<&mut Vec<i64>> {
    match f {
        Some(model::Feature::Way(ref mut w)) => Some(&mut w.nodes),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::model::{Feature, Node, Way};
    use super::*;

    macro_rules! tags {
        {} => { HashMap::default() };
        {$( $k:literal : $v:literal ),+} => {
            HashMap::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
        };
    }

    const SIMPLE_XML: &[u8] = include_bytes!("test_fixtures/simple.osm");

    fn node(id: i64, lon: f64, lat: f64, tags: HashMap<String, String>) -> Node {
        Node { id, lon, lat, tags }
    }

    fn get_expected_nodes() -> Vec<Node> {
        vec![
            node(1, 0.0, 0.0, tags! {}),
            node(
                2,
                0.001,
                0.0,
                tags! {"name": "Main & 1st", "highway": "traffic_signals"},
            ),
            node(3, 0.002, 0.0, tags! {}),
            node(4, 0.001, 0.001, tags! {}),
            node(
                5,
                0.003,
                0.003,
                tags! {"amenity": "restaurant", "name": "Top Dog"},
            ),
            node(6, 0.002, 0.001, tags! {}),
            node(7, 0.004, 0.0, tags! {"name": "Top Dog"}),
        ]
    }

    fn get_expected_ways() -> Vec<Way> {
        vec![
            Way {
                id: 100,
                nodes: vec![1, 2, 3],
                tags: tags! {"highway": "primary", "name": "Main Street"},
            },
            Way {
                id: 101,
                nodes: vec![2, 4],
                tags: tags! {"highway": "residential"},
            },
            Way {
                id: 102,
                nodes: vec![3, 6],
                tags: tags! {"highway": "footway"},
            },
            Way {
                id: 103,
                nodes: vec![3, 7, 9],
                tags: tags! {"highway": "tertiary_link"},
            },
            Way {
                id: 104,
                nodes: vec![4, 5],
                tags: tags! {"building": "yes"},
            },
        ]
    }

    fn check_against_expected<I>(features: I) -> Result<(), quick_xml::Error>
    where
        I: Iterator<Item = Result<Feature, quick_xml::Error>>,
    {
        let mut nodes = Vec::default();
        let mut ways = Vec::default();

        for f in features {
            match f? {
                Feature::Node(n) => nodes.push(n),
                Feature::Way(w) => ways.push(w),
            }
        }

        assert_eq!(nodes, get_expected_nodes());
        assert_eq!(ways, get_expected_ways());
        Ok(())
    }

    #[test]
    fn parse_from_buf() -> Result<(), quick_xml::Error> {
        check_against_expected(Reader::from_buffer(SIMPLE_XML))
    }

    #[test]
    fn parse_from_io() -> Result<(), quick_xml::Error> {
        check_against_expected(Reader::from_io(io::Cursor::new(SIMPLE_XML)))
    }

    #[test]
    fn malformed_document() {
        const BROKEN: &[u8] = b"<osm><node id=\"1\" lat=\"0\" lon=\"0\"></way></osm>";
        let result: Result<Vec<_>, _> = Reader::from_buffer(BROKEN).collect();
        assert!(result.is_err());
    }
}
