use std::sync::Arc;

use clap::Parser;
use itemshop::{config, create_app, db, run_migrations};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter(debug: bool) -> EnvFilter {
    let default_directives = if debug {
        "itemshop=debug,tower_http=debug"
    } else {
        "itemshop=info,tower_http=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Installs the global subscriber: human-readable output on stdout, plus
/// daily-rolling JSON files when a log directory is configured
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
fn init_tracing(debug: bool, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "itemshop.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = config::CliArgs::parse();

    // Config loading logs through a temporary stdout subscriber, since the
    // global one depends on the resolved log directory.
    let bootstrap = fmt().with_env_filter(env_filter(args.debug)).finish();
    let config = tracing::subscriber::with_default(bootstrap, || config::get_config(&args));

    let _guard = init_tracing(args.debug, config.log_dir.as_deref());

    let pool = Arc::new(db::init_pool(&config.database_url)?);
    {
        let mut conn = pool.get()?;
        run_migrations(&mut conn)?;
    }

    let app = create_app(pool);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
