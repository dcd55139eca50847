//! PasteBox server entrypoint.

use pastebox_server::sweeper::sweep_once;
use pastebox_server::{
    resolve_bind_address, serve_router, AppState, Config, Database, RetentionSweeper,
    DEFAULT_PORT,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
    sweep: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => flags.help = true,
            "--sweep" => flags.sweep = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "pastebox=info,pastebox_server=info,pastebox_core=info,tower_http=warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    let database = Arc::new(Database::new(&config.db_path)?);

    if cli_flags.sweep {
        let deleted = sweep_once(&database, &config.retention)?;
        println!("Deleted {} expired paste(s)", deleted);
        return Ok(());
    }

    let sweeper = RetentionSweeper::new(database.clone(), config.retention).start();
    let state = AppState::with_shared_db(config.clone(), database);

    let bind_addr = resolve_bind_address(&config);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("PasteBox running at http://{}", actual_addr);
    tracing::info!("Share links use {}", config.site_url);

    let serve_result = serve_router(listener, state, shutdown_signal()).await;

    sweeper.shutdown().await;
    tracing::info!("Shutdown complete");

    serve_result?;
    Ok(())
}

fn print_help() {
    println!("PasteBox Server\n");
    println!("Usage: pastebox [OPTIONS]\n");
    println!("Options:");
    println!("  --sweep           Delete expired pastes once and exit");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  DB_PATH           Database directory (default: ~/.cache/pastebox/db)");
    println!("  PORT              Server port (default: {})", DEFAULT_PORT);
    println!(
        "  SITE_URL          Public base URL for share links (default: http://localhost:{})",
        DEFAULT_PORT
    );
    println!("  MAX_PASTE_SIZE    Maximum paste size in bytes (default: 10MB)");
    println!(
        "  BIND              Override bind address (e.g. 127.0.0.1:{})",
        DEFAULT_PORT
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
