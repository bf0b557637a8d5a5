//! Mail header analyzer service
//!
//! Serves `POST /` with `{"email": "<raw message>"}` and answers with the
//! reconstructed relay path.

use std::path::{Path, PathBuf};

use clap::Parser;
use mail_header_analyzer::config::{LoggingConfig, load_config};
use mail_header_analyzer::http::serve;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser)]
#[command(name = "mha", version, about = "Email relay path analyzer")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, env = "MHA_CONFIG", value_name = "FILE")]
    config_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config_file.as_deref())?;
    let _guard = setup_logging(&config.logging);

    if let Err(e) = serve(&config.server).await {
        tracing::error!(error = %e, "Failed to start HTTP server");
        return Err(e.into());
    }
    Ok(())
}

/// Set up tracing with stderr output and optional file logging.
///
/// The returned guard flushes the file writer and must live until exit.
fn setup_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let target = logging.file.as_deref().and_then(|path| {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Some((dir, path.file_name()?))
    });

    if let Some((dir, file_name)) = target {
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        None
    }
}
