use std::time::Duration;

use campaign_quiz::{
    models::QuestionBank,
    names,
    services::campaign::{CampaignService, HttpCampaignApi},
    AppState,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Origin of the campaign backend the `/api` calls go to.
    #[arg(long, env, default_value = names::DEFAULT_API_ORIGIN)]
    api_origin: String,

    /// Campaign namespace under `/api/`.
    #[arg(long, env, default_value = names::DEFAULT_API_NAMESPACE)]
    api_namespace: String,

    /// Timeout for campaign backend requests, in seconds.
    #[arg(long, env, default_value_t = names::DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    /// Mark cookies `Secure` (serve behind HTTPS).
    #[arg(long, env)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,campaign_quiz=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let bank = QuestionBank::embedded()?;
    let api = HttpCampaignApi::new(
        &args.api_origin,
        &args.api_namespace,
        Duration::from_secs(args.request_timeout_secs),
    )?;
    tracing::info!(
        "campaign backend {} (namespace {})",
        args.api_origin,
        args.api_namespace
    );

    let state = AppState::new(CampaignService::new(api), bank, args.secure_cookies);
    let routes = campaign_quiz::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, routes).await?;

    Ok(())
}
