use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use route_snap::config::load_config;
use route_snap::geo::{Coordinate, FeatureCollection, SearchRadius};
use route_snap::MapboxMatcher;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Command-line client for the route capture service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match the last line of a GeoJSON file directly against the matching service
    Match {
        /// FeatureCollection to read the line from
        #[arg(short, long)]
        file: PathBuf,
        /// Override the configured search radius (meters)
        #[arg(short, long)]
        radius: Option<f64>,
        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Draw a new line, e.g. `draw 69.24,41.31 69.25,41.32`
    Draw { points: Vec<String> },
    /// Replace the geometry of an existing line
    Redraw { id: String, points: Vec<String> },
    /// Delete a line
    Trash { id: String },
    /// Show the current route geometry
    Route,
    /// List drawn features
    Features,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Match {
            file,
            radius,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let collection: FeatureCollection =
                serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let feature = collection.last().ok_or("file contains no features")?;
            let path = feature
                .geometry
                .as_path()
                .ok_or_else(|| format!("last feature is a {}", feature.geometry.kind()))?;

            let radii = SearchRadius::uniform(
                radius.unwrap_or(config.matching.search_radius_m),
                path.len(),
            );
            let matcher = MapboxMatcher::new(config.matching)?;
            let matching = matcher.try_match(&path, &radii).await?;
            println!("{}", serde_json::to_string_pretty(&matching)?);
        }
        Commands::Draw { points } => {
            let res = client
                .post(format!("{}/features", cli.url))
                .json(&json!({ "coordinates": parse_points(&points)? }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Redraw { id, points } => {
            let res = client
                .put(format!("{}/features/{}", cli.url, id))
                .json(&json!({ "coordinates": parse_points(&points)? }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Trash { id } => {
            let res = client
                .delete(format!("{}/features/{}", cli.url, id))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Route => {
            let res = client.get(format!("{}/route", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Features => {
            let res = client.get(format!("{}/features", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn parse_points(points: &[String]) -> Result<Vec<Coordinate>, Box<dyn std::error::Error>> {
    points
        .iter()
        .map(|point| -> Result<Coordinate, Box<dyn std::error::Error>> {
            let (lon, lat) = point
                .split_once(',')
                .ok_or_else(|| format!("expected lon,lat but got '{}'", point))?;
            Ok(Coordinate::new(lon.trim().parse()?, lat.trim().parse()?))
        })
        .collect()
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Details: {}", text);
        }
        return Ok(());
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) if text.is_empty() => println!("{}", status),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
