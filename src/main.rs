use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use rentmatch::config::AppConfig;
use rentmatch::error::AppError;
use rentmatch::marketplace::import::ListingCsvImporter;
use rentmatch::marketplace::preapproval::letter::render_letter;
use rentmatch::marketplace::preapproval::{
    calculate_preapproval, PreapprovalInput, PreapprovalResult,
};
use rentmatch::marketplace::repository::{seed_catalog, InMemoryListingRepository};
use rentmatch::marketplace::service::ListingService;
use rentmatch::marketplace::{marketplace_router, RequirementExtractor};
use rentmatch::telemetry;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "RentMatch",
    about = "Run the rental listing marketplace service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute a pre-approval assessment for demos and support
    Preapproval(PreapprovalArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Optional listing CSV export to hydrate the catalog instead of the
    /// built-in sample listings
    #[arg(long)]
    seed_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PreapprovalArgs {
    /// Gross monthly income in dollars
    #[arg(long)]
    monthly_income: f64,
    /// Credit band label: <580, 580–649, 650–699, 700–749, or 750+
    #[arg(long)]
    credit_band: String,
    /// Liquid savings in dollars
    #[arg(long)]
    savings: f64,
    /// Whether a co-signer is available
    #[arg(long)]
    cosigner: bool,
    /// Monthly rent the renter is targeting
    #[arg(long)]
    target_rent: f64,
    /// Also print the printable pre-approval letter
    #[arg(long)]
    letter: bool,
    /// Applicant name used on the letter
    #[arg(long, default_value = "Applicant")]
    renter_name: String,
    /// Market area used on the letter
    #[arg(long, default_value = "Los Angeles")]
    city: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Preapproval(args) => run_preapproval(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let repository = Arc::new(InMemoryListingRepository::new());
    let service = Arc::new(ListingService::new(repository));

    let catalog = match args.seed_csv.take() {
        Some(path) => {
            let extractor = RequirementExtractor::new();
            ListingCsvImporter::from_path(path, &extractor)?
        }
        None => seed_catalog(),
    };
    let listing_count = service.ingest(catalog)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(marketplace_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, listing_count, "rental marketplace service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_preapproval(args: PreapprovalArgs) -> Result<(), AppError> {
    let PreapprovalArgs {
        monthly_income,
        credit_band,
        savings,
        cosigner,
        target_rent,
        letter,
        renter_name,
        city,
    } = args;

    let input = PreapprovalInput {
        monthly_income,
        credit_band,
        savings,
        has_cosigner: cosigner,
        target_rent,
    };
    let result = calculate_preapproval(&input);

    render_preapproval_summary(&input, &result);

    if letter {
        println!();
        println!(
            "{}",
            render_letter(
                &renter_name,
                &city,
                &input,
                &result,
                Local::now().date_naive()
            )
        );
    }

    Ok(())
}

fn render_preapproval_summary(input: &PreapprovalInput, result: &PreapprovalResult) {
    println!("Pre-approval assessment");
    println!(
        "Inputs: income {:.0}/month, credit band {}, savings {:.0}, co-signer {}, target rent {:.0}",
        input.monthly_income,
        input.credit_band,
        input.savings,
        if input.has_cosigner { "yes" } else { "no" },
        input.target_rent
    );
    println!("\nStrength: {}", result.strength.label());
    println!(
        "Maximum recommended rent: {}/month",
        result.max_recommended_rent
    );
    if let Some(top_up) = result.suggested_top_up_deposit {
        println!("Suggested top-up deposit: {top_up}");
    }
    println!("\n{}", result.explanation);
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ok"));
    }

    #[test]
    fn preapproval_command_runs_without_letter() {
        let args = PreapprovalArgs {
            monthly_income: 6250.0,
            credit_band: "700–749".to_string(),
            savings: 10_000.0,
            cosigner: false,
            target_rent: 2500.0,
            letter: false,
            renter_name: "Applicant".to_string(),
            city: "Los Angeles".to_string(),
        };

        run_preapproval(args).expect("preapproval command succeeds");
    }
}
