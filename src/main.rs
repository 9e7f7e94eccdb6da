use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &commit_pulse::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        owner = %cfg.repo_owner,
        repo = %cfg.repo_name,
        base_url = %cfg.base_url,
        database_url = %cfg.database_url,
        loglevel = %cfg.loglevel
    );

    let store = commit_pulse::CommitStore::connect(&cfg.database_url).await?;
    store.init_schema().await?;

    let client = reqwest::Client::new();
    let target = commit_pulse::RepoTarget::new(
        cfg.base_url.clone(),
        cfg.repo_owner.clone(),
        cfg.repo_name.clone(),
        cfg.token.clone(),
    );

    // Build axum router and serve
    let state = commit_pulse::router::PulseState::new(store, client, target);
    let app = commit_pulse::router::pulse_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
