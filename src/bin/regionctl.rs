//! Region authoring CLI
//!
//! Creates, deletes, and lists geofence regions against the durable
//! region store used by the daemon.
//!
//! Usage:
//!   regionctl --config config/dev.toml list
//!   regionctl add-circle --name "Home" --lat 40.7128 --lng -74.0060 --radius 500
//!   regionctl add-polygon --name "Yard" --points "40.71,-74.00;40.72,-74.00;40.71,-74.01"
//!   regionctl delete <id>

use clap::{Parser, Subcommand};
use geofence_notify::domain::{Point, Region, RegionDraft, RegionId, RegionShape};
use geofence_notify::infra::Config;
use geofence_notify::io::RegionStorage;
use geofence_notify::services::RegionStore;

#[derive(Parser, Debug)]
#[command(name = "regionctl", version, about = "Manage geofence regions")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stored regions in insertion order
    List,
    /// Create a circular region
    AddCircle {
        #[arg(long)]
        name: String,
        /// Center latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Center longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Radius in meters
        #[arg(long, default_value_t = 500.0)]
        radius: f64,
        /// Display color, e.g. "#3388ff"
        #[arg(long)]
        color: Option<String>,
    },
    /// Create a polygonal region
    AddPolygon {
        #[arg(long)]
        name: String,
        /// Vertices as "lat1,lng1;lat2,lng2;lat3,lng3"
        #[arg(long, allow_hyphen_values = true)]
        points: String,
        /// Display color, e.g. "#3388ff"
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a region by id
    Delete {
        id: String,
    },
}

/// Parse the "lat,lng;lat,lng;..." vertex form
fn parse_points(input: &str) -> anyhow::Result<Vec<Point>> {
    input
        .split(';')
        .map(|pair| {
            let (lat, lng) = pair
                .trim()
                .split_once(',')
                .ok_or_else(|| anyhow::anyhow!("expected \"lat,lng\", got {pair:?}"))?;
            Ok(Point::new(lat.trim().parse()?, lng.trim().parse()?))
        })
        .collect()
}

fn describe(region: &Region) -> String {
    match &region.shape {
        RegionShape::Circle { center, radius } => {
            format!("circle  center={:.6},{:.6}  radius={}m", center.lat, center.lng, radius)
        }
        RegionShape::Polygon { points } => format!("polygon {} points", points.len()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    let storage = RegionStorage::new(config.regions_file());
    let mut store = RegionStore::from_regions(storage.load());

    match args.command {
        Command::List => {
            if store.is_empty() {
                println!("no regions stored in {}", config.regions_file());
            }
            for region in store.list() {
                println!("{}  {:24}  {}", region.id, region.name, describe(&region));
            }
        }
        Command::AddCircle { name, lat, lng, radius, color } => {
            let mut draft = RegionDraft::circle(&name, Point::new(lat, lng), radius);
            draft.color = color;
            let region = store.create(draft)?;
            if !storage.save(&store) {
                eprintln!("warning: region kept in memory only, storage write failed");
            }
            println!("created {}  {}", region.id, region.name);
        }
        Command::AddPolygon { name, points, color } => {
            let points = parse_points(&points)?;
            let mut draft = RegionDraft::polygon(&name, points);
            draft.color = color;
            let region = store.create(draft)?;
            if !storage.save(&store) {
                eprintln!("warning: region kept in memory only, storage write failed");
            }
            println!("created {}  {}", region.id, region.name);
        }
        Command::Delete { id } => {
            let id = RegionId(id);
            if store.delete(&id) {
                if !storage.save(&store) {
                    eprintln!("warning: deletion kept in memory only, storage write failed");
                }
                println!("deleted {id}");
            } else {
                anyhow::bail!("no region with id {id}");
            }
        }
    }

    Ok(())
}
