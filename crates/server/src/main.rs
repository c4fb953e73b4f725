use anyhow::Context;
use clap::Parser;
use geo_nearby::{IndexKind, NearbyService};
use geo_nearby_server::{dataset, run_server};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The service port
    #[arg(short, long, default_value_t = 8082)]
    port: u16,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Dataset file; the bundled hotel dataset is used when omitted
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Index strategy: linear, geohash or rtree
    #[arg(long, default_value_t = IndexKind::Geohash)]
    index: IndexKind,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geo_nearby_server=info,geo_nearby=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let points = dataset::load(args.data.as_deref()).context("Failed to load hotels")?;
    let index = args.index.build(points);
    let stats = index.stats();
    info!(
        "Built {} index: {} points, {} buckets, {} overflow",
        stats.kind,
        stats.points,
        stats
            .buckets
            .map_or_else(|| "n/a".to_string(), |b| b.to_string()),
        stats.overflow
    );

    let service = NearbyService::new(index);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    run_server(listener, service, shutdown).await
}
