//! `hrmsd`: the HR workflow server binary.
//!
//! Usage:
//!   hrmsd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/hrms/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod auth;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use hrms_core::{AllowAll, Authenticator};
use hrms_workflows::HrModule;
use tracing::{info, warn};

use auth::JwtAuthenticator;
use config::ServerConfig;

/// HR workflow server.
#[derive(Parser, Debug)]
#[command(name = "hrmsd", about = "HR workflow server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?.with_listen(cli.listen);
    server_config.verify()?;

    let core_config = server_config.service_config();
    if let Some(data_dir) = &core_config.data_dir {
        std::fs::create_dir_all(data_dir)?;
    }

    let sqlite_path = core_config.resolve_sqlite_path();
    let sql: Arc<dyn hrms_sql::SQLStore> = Arc::new(
        hrms_sql::SqliteStore::open(&sqlite_path)
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );
    info!("SQL store opened at {}", sqlite_path.display());

    let authenticator: Arc<dyn Authenticator> = if server_config.auth.jwt_secret.is_empty() {
        warn!("auth.jwt_secret is empty; protected resources accept every request");
        Arc::new(AllowAll)
    } else {
        Arc::new(JwtAuthenticator::new(&server_config.auth.jwt_secret))
    };

    let hr_module = HrModule::new(sql, authenticator, server_config.audit.enabled)
        .map_err(|e| anyhow::anyhow!("failed to initialize HR module: {}", e))?;
    info!("HR module initialized");

    let app = routes::build_router(&[&hr_module]);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("hrmsd listening on {}", core_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
