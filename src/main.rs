use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use drug_use_viewer::{web, Dataset};
use tracing::{error, info};

/// Report server for age-bucketed substance-use statistics.
#[derive(Parser, Debug)]
#[command(name = "drug-use-viewer")]
#[command(about = "Navigable report server for age-bucketed substance-use statistics")]
struct Args {
    /// Path to the comma-separated source table
    #[arg(long, default_value = "data/drug-use-by-age.csv", env = "VIEWER_DATA")]
    data: PathBuf,

    /// Directory holding the AgePhotos/ and DrugPhotos/ image roots
    #[arg(long, default_value = "img", env = "VIEWER_IMG_ROOT")]
    img_root: PathBuf,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0:3000", env = "VIEWER_LISTEN")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
            |_| tracing_subscriber::EnvFilter::new("drug_use_viewer=info,tower_http=info"),
        ))
        .init();

    let args = Args::parse();

    // The snapshot must be fully built before the listen socket is bound.
    let dataset = match Dataset::load(&args.data, &args.img_root) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to initialize data: {e}");
            error!(
                "Hint: ensure {} exists and is included in your deployed files.",
                args.data.display()
            );
            std::process::exit(1);
        }
    };

    let app = web::router(Arc::new(dataset), &args.img_root);

    let listener = match tokio::net::TcpListener::bind(args.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Cannot bind {}: {e}", args.listen);
            error!("If another process is listening on this port, stop it or set --listen / VIEWER_LISTEN to a different address.");
            std::process::exit(1);
        }
    };

    info!(address = %args.listen, "Server listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
