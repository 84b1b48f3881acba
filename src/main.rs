mod analyzer;
mod config;
mod fetch;
mod model;
mod normalizer;
mod pipeline;
mod source;
mod timeseries;
mod utils;

use analyzer::FamilySummary;
use chrono::{DateTime, Utc};
use config::{load_config, AppConfig};
use model::{AggregatedVariant, Asin};
use pipeline::Pipeline;
use serde::Serialize;
use source::KeepaClient;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use utils::SystemClock;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    anchor: &'a Asin,
    generated_at: DateTime<Utc>,
    summary: FamilySummary,
    variants: &'a [AggregatedVariant],
}

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration from file, environment overrides on top
    let path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", path, e);
            std::process::exit(1);
        }
    };

    let client = match KeepaClient::new(&config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = Pipeline::new(client, Arc::new(SystemClock), &config);
    let anchor = Asin::new(config.anchor_asin.clone());

    // Ctrl-C stops the run before any result is applied
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling...");
            on_signal.cancel();
        }
    });

    let variants = match pipeline.run(&anchor, &cancel).await {
        Ok(v) => v,
        Err(e) => {
            warn!("{}", e);
            std::process::exit(130);
        }
    };

    if variants.is_empty() {
        warn!("No variant data for {}", anchor);
    }
    for v in &variants {
        info!(
            "{} | size {} | color {} | ratings {} {} | reviews {} {} | lowest {} | image {}",
            v.record.asin,
            v.record.size.as_deref().unwrap_or("-"),
            v.record.color.as_deref().unwrap_or("-"),
            v.record.total_ratings,
            format_delta(v.rating_difference),
            v.record.total_reviews,
            format_delta(v.review_difference),
            v.record.lowest_price.as_deref().unwrap_or("n/a"),
            v.record.primary_image_url().unwrap_or_default(),
        );
    }

    let report = Report {
        anchor: &anchor,
        generated_at: Utc::now(),
        summary: FamilySummary::from_variants(&variants),
        variants: &variants,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}

fn format_delta(delta: Option<i64>) -> String {
    match delta {
        Some(d) => format!("{:+}", d),
        None => "(+?)".to_string(),
    }
}
