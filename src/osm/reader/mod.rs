// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use log::debug;

use loader::Loader;

use crate::osm::Profile;
use crate::{BuildError, Graph, GraphBuilder};

mod loader;
mod model;
mod xml;

const GZIP_MAGIC: &[u8] = b"\x1f\x8b";
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format of a file by looking at its first bytes.
    fn detect(head: &[u8]) -> Self {
        if head.starts_with(GZIP_MAGIC) {
            Self::XmlGz
        } else if head.starts_with(BZIP2_MAGIC) {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Additional controls for interpreting OSM data as a road [Graph].
#[derive(Debug)]
pub struct Options<'a> {
    /// Which OSM ways should be converted into edges of the [Graph].
    pub profile: &'a Profile<'a>,

    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter nodes by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). Ignored if all values are set to zero, or at least one
    /// of them is not finite.
    pub bbox: [f64; 4],
}

/// Error which can occur when loading OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("graph: {0}")]
    Build(#[from] BuildError),
}

/// Parse OSM features from a reader into a [GraphBuilder] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_features_from_io<R: io::Read>(
    b: &mut GraphBuilder,
    options: &Options<'_>,
    reader: R,
) -> Result<(), Error> {
    let mut reader = io::BufReader::new(reader);

    let format = match options.file_format {
        FileFormat::Unknown => {
            let format = FileFormat::detect(reader.fill_buf()?);
            debug!("detected input format: {:?}", format);
            format
        }
        format => format,
    };

    match format {
        FileFormat::Unknown | FileFormat::Xml => add_xml_features(b, options, reader),

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            add_xml_features(b, options, io::BufReader::new(d))
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            add_xml_features(b, options, io::BufReader::new(d))
        }
    }
}

fn add_xml_features<R: io::BufRead>(
    b: &mut GraphBuilder,
    options: &Options<'_>,
    reader: R,
) -> Result<(), Error> {
    Loader::new(b, options).add_features(xml::Reader::from_io(reader))
}

/// Parse OSM features from a file at the provided path into a [GraphBuilder]
/// as per the provided [Options].
pub fn add_features_from_file<P: AsRef<Path>>(
    b: &mut GraphBuilder,
    options: &Options<'_>,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_features_from_io(b, options, f)
}

/// Parse OSM features from a static buffer into a [GraphBuilder] as per the provided [Options].
pub fn add_features_from_buffer(
    b: &mut GraphBuilder,
    options: &Options<'_>,
    data: &[u8],
) -> Result<(), Error> {
    let is_xml = match options.file_format {
        FileFormat::Xml => true,
        FileFormat::Unknown => FileFormat::detect(data) == FileFormat::Xml,
        _ => false,
    };

    if is_xml {
        // Fast path is available for in-memory XML data
        Loader::new(b, options).add_features(xml::Reader::from_buffer(data))
    } else {
        // Wrap the buffer in a cursor and use the IO path
        add_features_from_io(b, options, io::Cursor::new(data))
    }
}

/// Loads a whole OSM file into a new, [finished](GraphBuilder::finish) [Graph].
pub fn load_graph_from_file<P: AsRef<Path>>(options: &Options<'_>, path: P) -> Result<Graph, Error> {
    let mut b = GraphBuilder::new();
    add_features_from_file(&mut b, options, path)?;
    Ok(b.finish())
}
