#[path = "solana-bounty-service/cli.rs"]
mod cli;
#[path = "solana-bounty-service/setup.rs"]
mod setup;

use crate::cli::Cli;
use bounty_core::infrastructure::webhook::SignatureValidator;
use bounty_service::api::{run_webhook_server, AppState};
use bounty_service::service::flow::ServiceFlow;
use bounty_service::service::metrics::Metrics;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse_args();
    args.apply_to_env();

    // Logging comes up only after the config is read, so the configured
    // log_level applies; config load errors surface through main's Err.
    let config = setup::load_config()?;
    let log_level = setup::effective_log_level(args.log_level.as_deref(), &config.log_level);
    setup::init_logging(log_level)?;
    info!("solana-bounty-service starting log_level={}", log_level);
    info!(
        "config loaded tracker_api_base={} ledger_rpc_url={} commitment={} listen_addr={}",
        config.tracker.api_base, config.ledger.rpc_url, config.ledger.commitment, config.http.listen_addr
    );
    // The program address must parse before any event arrives; a bounty
    // service that cannot derive addresses has nothing to reconcile.
    let program_id = config.ledger.program_id()?;
    info!("reconciling against program_id={}", program_id);

    let flow = Arc::new(ServiceFlow::new(&config)?);
    spawn_status_reporter(flow.metrics());

    let state = Arc::new(AppState {
        processor: flow.clone(),
        ledger: flow.ledger(),
        signature: SignatureValidator::new(config.tracker.webhook_secret()),
        metrics: flow.metrics(),
        auth_token: config.http.auth_token.clone(),
    });

    let addr: SocketAddr =
        config.http.listen_addr.parse().map_err(|err| format!("invalid http.listen_addr: {}", err))?;
    run_webhook_server(addr, state).await?;
    Ok(())
}

fn spawn_status_reporter(metrics: Arc<Metrics>) {
    tokio::spawn(async move {
        let interval_seconds = 300u64;
        info!("status reporter started interval_seconds={}", interval_seconds);
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));
        loop {
            interval.tick().await;
            let snapshot = metrics.snapshot();
            info!(
                "periodic status report uptime_minutes={} deliveries_accepted={} deliveries_ignored={} deliveries_rejected={} flows_settled={} flows_failed={} ledger_commits_ok={} ledger_commits_failed={}",
                snapshot.uptime.as_secs() / 60,
                snapshot.deliveries_accepted,
                snapshot.deliveries_ignored,
                snapshot.deliveries_rejected,
                snapshot.flows_settled,
                snapshot.flows_failed,
                snapshot.ledger_commits_ok,
                snapshot.ledger_commits_failed
            );
        }
    });
}
