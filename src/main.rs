use std::env;
use std::path::Path;

use alumni_loader::{pipeline, store};
use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Default export location; override with ALUMNI_CSV.
const DEFAULT_CSV: &str = "data/alumni_data.csv";

#[tokio::main]
async fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,alumni_loader=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // Failure is signaled to callers only through the printed count; the
    // process exits 0 either way and operators read the logs for cause.
    let count = match run().await {
        Ok(count) => count,
        Err(err) => {
            error!(error = ?err, "alumni load failed");
            0
        }
    };
    println!("data load complete: {} records", count);
}

async fn run() -> Result<u64> {
    // ─── 2) configuration ────────────────────────────────────────────
    let mongo_url = env::var("MONGO_URL").context("MONGO_URL must be set")?;
    let db_name = env::var("DB_NAME").context("DB_NAME must be set")?;
    let csv_path = env::var("ALUMNI_CSV").unwrap_or_else(|_| DEFAULT_CSV.to_string());

    // ─── 3) connect + run the pipeline ───────────────────────────────
    let db = store::connect(&mongo_url, &db_name).await?;
    let summary = pipeline::run_load(&db, Path::new(&csv_path)).await?;

    // ─── 4) operator summary ─────────────────────────────────────────
    if summary.inserted > 0 {
        println!(
            "loaded {} alumni records into {}",
            summary.inserted,
            store::COLLECTION
        );
        if let Some(sample) = &summary.sample {
            println!("sample record: {}", serde_json::to_string(sample)?);
        }
    } else {
        println!("no records to insert");
    }
    Ok(summary.inserted)
}
