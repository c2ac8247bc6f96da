mod argument_parsing;
mod charts;
mod clickhouse;
mod clickhouse_queries;
mod error;
mod routes;
mod sqlite;
mod sqlite_queries;
mod store;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use crate::argument_parsing::Args;
use crate::store::ChecksStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("uptime_charts=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "uptime-charts stopped");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    args.validate()?;

    let store = ChecksStore::from_args(&args).await?;
    tracing::info!(backend = store.backend(), "checks store ready");

    let app = routes::router(store);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
