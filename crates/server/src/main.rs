use folio_server::{app, config::Config, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting folio server...");

    let config = Config::load()?;
    tracing::info!(
        "Configuration loaded (backend: {}, site: {})",
        config.render.backend,
        config.site.name
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let router = app(AppState::new(config)?);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET  /Pdf/Index");
    tracing::info!("  - POST /Pdf/Generate");
    tracing::info!("  - GET  /health");

    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    let json = std::env::var("FOLIO_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,folio_server=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
