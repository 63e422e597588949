use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, anyhow};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rigdex_core::CatalogUnitOfWork;
use rigdex_core::database::PostgresDatabase;
use rigdex_server::{
    AppState, create_app,
    db::validate_primary_database_url,
    infra::config::{Config, ConfigLoad, ConfigLoader},
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "rigdex-server")]
#[command(about = "REST catalog of PC-component reference data")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path to a rigdex.toml configuration file
    #[arg(short, long, env = "RIGDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Serve from an in-process store instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let pg = connect_postgres(&config).await?;
    pg.migrate().await.context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }
    for warning in warnings.items {
        match warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }

    Ok(config)
}

async fn connect_postgres(config: &Config) -> anyhow::Result<PostgresDatabase> {
    let database_url = config.database.primary_url.as_deref().ok_or_else(|| {
        anyhow!("DATABASE_URL is not configured; set it or pass --in-memory")
    })?;
    validate_primary_database_url(database_url)?;

    PostgresDatabase::new(database_url, config.database.pool_settings())
        .await
        .context("failed to connect to PostgreSQL")
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = Arc::new(load_runtime_config(&args)?);

    let unit_of_work = if args.in_memory {
        info!("serving from the in-memory store; data is lost on exit");
        CatalogUnitOfWork::in_memory()
    } else {
        let pg = connect_postgres(&config).await?;
        pg.migrate().await.context("database migration failed")?;
        CatalogUnitOfWork::from_postgres(Arc::new(pg))
    };

    let state = AppState::new(Arc::new(unit_of_work), config.clone());
    let app = create_app(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, dev_mode = config.dev_mode, "rigdex-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from([
            "rigdex-server",
            "--port",
            "9090",
            "--host",
            "127.0.0.1",
            "--in-memory",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, Some(9090));
        assert_eq!(cli.serve.host.as_deref(), Some("127.0.0.1"));
        assert!(cli.serve.in_memory);
    }

    #[test]
    fn parses_db_migrate() {
        let cli = Cli::try_parse_from([
            "rigdex-server",
            "--config",
            "conf/rigdex.toml",
            "db",
            "migrate",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Db(DbCommand::Migrate))));
        assert_eq!(cli.serve.config, Some(PathBuf::from("conf/rigdex.toml")));
    }
}
