//! Route capture service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http (features, route, map)
//!                  │
//!                  ▼
//!              drawing ──DrawEvent──▶ pipeline ──▶ matching ──▶ Mapbox
//!                                        │
//!                                        ▼
//!                                      render ──▶ "route" layer
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_snap::config::load_config;
use route_snap::lifecycle::signals::shutdown_on_ctrl_c;
use route_snap::observability::{logging, metrics};
use route_snap::{RouteService, Shutdown};

#[derive(Parser)]
#[command(name = "route-snap")]
#[command(about = "Snap drawn lines to the road network", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init(&config.observability);
    tracing::info!("route-snap v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        profile = %config.matching.profile,
        search_radius_m = config.matching.search_radius_m,
        render_policy = ?config.render.policy,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    let service = RouteService::build(config)?;
    service.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
