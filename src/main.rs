//! eld-planner - HOS-compliant ELD trip schedule simulator
//!
//! Reads a trip request as JSON and prints the resulting duty-status
//! schedule, also as JSON, to stdout.

mod cli;

use std::io::Read;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eld_planner::config;
use eld_planner::services::{self, routing::create_route_client};
use eld_planner::types::TripInput;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging();

    let mut config = config::Config::from_env()?;

    match cli.command {
        cli::Command::Simulate {
            trip,
            base_date,
            routing_url,
        } => {
            if let Some(url) = routing_url {
                config.routing_base_url = url;
            }

            let trip_input = read_trip_input(&trip)?;
            let base_date = match base_date {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("invalid --base-date {raw:?}"))?,
                None => chrono::Local::now().date_naive(),
            };

            let route_client = create_route_client(
                Some(config.routing_base_url.clone()),
                config.routing_timeout_seconds,
            );
            info!(trip_id = %trip_input.id, "simulating trip");

            let schedule = services::simulate(&trip_input, route_client.as_ref(), &config, base_date)
                .await
                .context("trip simulation failed")?;

            println!("{}", serde_json::to_string_pretty(&schedule)?);
            Ok(())
        }
    }
}

fn read_trip_input(path: &str) -> Result<TripInput> {
    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading trip input from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading trip file {path}"))?
    };

    serde_json::from_str(&raw).with_context(|| format!("parsing trip input from {path}"))
}

fn init_logging() {
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "eld-planner.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // Leaked deliberately: the guard must outlive `main`, and this process
    // never tears the subscriber down before exit.
    Box::leak(Box::new(guard));

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,eld_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();
}
