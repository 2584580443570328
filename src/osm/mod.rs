// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod profile;
mod reader;

pub use profile::{Profile, ROAD_PROFILE};
pub use reader::{
    add_features_from_buffer, add_features_from_file, add_features_from_io,
    load_graph_from_file, Error, FileFormat, Options,
};

#[cfg(test)]
mod tests {
    use super::super::{Graph, GraphBuilder};
    use super::*;

    const SIMPLE_XML: &[u8] = include_bytes!("reader/test_fixtures/simple.osm");
    const SIMPLE_XML_GZ: &[u8] = include_bytes!("reader/test_fixtures/simple.osm.gz");
    const SIMPLE_XML_BZ2: &[u8] = include_bytes!("reader/test_fixtures/simple.osm.bz2");

    fn load(data: &[u8], file_format: FileFormat, bbox: [f64; 4]) -> Graph {
        let mut b = GraphBuilder::new();
        let options = Options {
            profile: &ROAD_PROFILE,
            file_format,
            bbox,
        };
        add_features_from_buffer(&mut b, &options, data).unwrap();
        b.finish()
    }

    fn check_simple_graph(g: &Graph) {
        //            (5: Top Dog)
        //
        //   4
        //   │   6 (footway only)
        //   │
        //   1───2───3───────7───(9: missing)
        //      Main & 1st   Top Dog

        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![1, 2, 3, 4, 7]);
        assert_eq!(g.adjacent(2).collect::<Vec<_>>(), vec![1, 3, 4]);
        assert_eq!(g.adjacent(3).collect::<Vec<_>>(), vec![2, 7]);
        assert_eq!(g.adjacent(7).collect::<Vec<_>>(), vec![3]);

        assert_eq!(g.autocomplete("top"), vec!["Top Dog"]);
        assert_eq!(g.autocomplete("MAIN"), vec!["Main & 1st"]);
        assert!(g.autocomplete("main street").is_empty());

        let top_dogs: Vec<i64> = g.get_locations("Top Dog").iter().map(|l| l.id).collect();
        assert_eq!(top_dogs, vec![5, 7]);
        assert_eq!(g.get_locations("main  st")[0].name, "Main & 1st");

        assert_eq!(
            g.find_shortest_path(0.0, 0.0, 0.0041, 0.0001),
            Ok(vec![1, 2, 3, 7])
        );
        assert_eq!(
            g.find_shortest_path(0.0011, 0.0012, 0.0021, 0.0),
            Ok(vec![4, 2, 3])
        );
    }

    #[test]
    fn test_build_graph_xml() {
        check_simple_graph(&load(SIMPLE_XML, FileFormat::Xml, [0.0; 4]));
    }

    #[test]
    fn test_build_graph_gz() {
        check_simple_graph(&load(SIMPLE_XML_GZ, FileFormat::XmlGz, [0.0; 4]));
    }

    #[test]
    fn test_build_graph_bz2() {
        check_simple_graph(&load(SIMPLE_XML_BZ2, FileFormat::XmlBz2, [0.0; 4]));
    }

    #[test]
    fn test_build_graph_detect_format() {
        check_simple_graph(&load(SIMPLE_XML, FileFormat::Unknown, [0.0; 4]));
        check_simple_graph(&load(SIMPLE_XML_GZ, FileFormat::Unknown, [0.0; 4]));
        check_simple_graph(&load(SIMPLE_XML_BZ2, FileFormat::Unknown, [0.0; 4]));
    }

    #[test]
    fn test_build_graph_from_io() {
        let mut b = GraphBuilder::new();
        let options = Options {
            profile: &ROAD_PROFILE,
            file_format: FileFormat::Unknown,
            bbox: [0.0; 4],
        };
        add_features_from_io(&mut b, &options, std::io::Cursor::new(SIMPLE_XML_GZ)).unwrap();
        check_simple_graph(&b.finish());
    }

    #[test]
    fn test_build_graph_bbox() {
        let g = load(SIMPLE_XML, FileFormat::Xml, [-0.0005, -0.0005, 0.0025, 0.0025]);
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(g.get_locations("top dog").is_empty());
        assert!(g.autocomplete("top").is_empty());
    }

    #[test]
    fn test_duplicate_node_fails() {
        const DATA: &[u8] = br#"<osm>
            <node id="1" lat="0" lon="0"/>
            <node id="1" lat="1" lon="1"/>
        </osm>"#;

        let mut b = GraphBuilder::new();
        let options = Options {
            profile: &ROAD_PROFILE,
            file_format: FileFormat::Xml,
            bbox: [0.0; 4],
        };
        let err = add_features_from_buffer(&mut b, &options, DATA).unwrap_err();
        assert!(matches!(
            err,
            Error::Build(crate::BuildError::DuplicateNode(1))
        ));
    }

    #[test]
    fn test_missing_file() {
        let options = Options {
            profile: &ROAD_PROFILE,
            file_format: FileFormat::Unknown,
            bbox: [0.0; 4],
        };
        let err = load_graph_from_file(&options, "this/file/does/not/exist.osm").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
