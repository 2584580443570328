use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] roadmap::osm::Error);

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file
    osm_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the shortest route between two points and print it as GeoJSON
    Route {
        /// Longitude of the start point
        start_lon: f64,

        /// Latitude of the start point
        start_lat: f64,

        /// Longitude of the end point
        end_lon: f64,

        /// Latitude of the end point
        end_lat: f64,
    },

    /// Print names of all places starting with a prefix
    Autocomplete { prefix: String },

    /// Print all places with the given name
    Locations { name: String },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let g = load_graph(&cli.osm_file)?;

    match cli.command {
        Command::Route {
            start_lon,
            start_lat,
            end_lon,
            end_lat,
        } => {
            let route = g.find_shortest_path(start_lon, start_lat, end_lon, end_lat)?;
            print_route(&g, &route);
        }

        Command::Autocomplete { prefix } => {
            for name in g.autocomplete(&prefix) {
                println!("{}", name);
            }
        }

        Command::Locations { name } => {
            for l in g.get_locations(&name) {
                println!("{}\t{}\t{}\t{}", l.id, l.lon, l.lat, l.name);
            }
        }
    }

    Ok(())
}

fn print_route(g: &roadmap::Graph, route: &[i64]) {
    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{}},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut nodes = route.iter().filter_map(|&node_id| g.get_node(node_id)).peekable();
    while let Some(node) = nodes.next() {
        let suffix = if nodes.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", node.lon, node.lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");
}

fn load_graph<P: AsRef<Path>>(path: P) -> Result<roadmap::Graph, GraphLoadError> {
    let options = roadmap::osm::Options {
        profile: &roadmap::osm::ROAD_PROFILE,
        file_format: roadmap::osm::FileFormat::Unknown,
        bbox: [0.0; 4],
    };
    roadmap::osm::load_graph_from_file(&options, path.as_ref())
        .map_err(|e| GraphLoadError(PathBuf::from(path.as_ref()), e))
}
