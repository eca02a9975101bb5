use chained_select::config::loader::{build_registry, load_settings, DEFAULT_CONFIG_FILE};
use chained_select::filterchain::allowlist::AllowList;
use chained_select::filterchain::handlers::router;
use chained_select::filterchain::service::ChainService;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chained-select")]
#[command(about = "Serve allow-listed chained select choices as JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Address to listen on, overrides the settings file
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(cli.verbose >= 2)
        .init();

    // 1. Settings:
    let mut settings = load_settings(&cli.config).await?;
    if let Some(bind) = cli.bind {
        settings.server.bind = bind;
    }

    // 2. Catalog:
    let registry = build_registry(&settings)?;
    let allowed: AllowList = settings.allow_list();
    tracing::info!(
        "Catalog ready: {} models, {} allow-listed",
        registry.model_count(),
        allowed.len()
    );
    for label in allowed.labels() {
        tracing::debug!("  - allowed: {}", label);
    }

    // 3. HTTP Router:
    let service = Arc::new(ChainService::new(registry, allowed));
    let app = router(service, &settings.server.prefix);

    // 4. Start HTTP server:
    tracing::info!(
        "HTTP server listening on {} (prefix '{}')",
        settings.server.bind,
        settings.server.prefix
    );
    let listener = tokio::net::TcpListener::bind(settings.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
