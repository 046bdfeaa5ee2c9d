use mimalloc::MiMalloc;
use ocean_cadastro::config::Config;
use ocean_cadastro::db::CadastroStorage;
use ocean_cadastro::{CadastroState, cadastro_router};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        listen_addr = %cfg.basic.listen_addr,
        public_url = %cfg.basic.public_url.as_ref().map(|u| u.as_str()).unwrap_or("<from Host header>"),
        loglevel = %cfg.basic.loglevel,
        page_size = cfg.pagination.default_size,
        max_page_size = cfg.pagination.max_size
    );

    let storage = CadastroStorage::connect(&cfg.basic.database_url).await?;

    let addr = cfg.basic.listen_addr.clone();
    let app = cadastro_router(CadastroState::new(storage.clone(), cfg));

    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.pool().close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
