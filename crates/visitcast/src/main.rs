use clap::Parser;
use std::path::PathBuf;
use visitcast::{App, AppConfig, init_logging};

#[derive(Parser, Debug)]
#[command(name = "visitcast")]
#[command(about = "A terminal dashboard for predicting and analysing library visits")]
struct Args {
    /// Path to the data directory (default: ~/.visitcast/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// GWR results CSV: a path or an http(s) URL (overrides config.yaml)
    #[arg(long)]
    dataset: Option<String>,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".visitcast")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    if let Err(e) = AppConfig::write_default_if_missing(&data_dir) {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let config = AppConfig::load(&data_dir);
    let source = config.dataset_source(&data_dir, args.dataset.as_deref());
    tracing::info!(%source, "starting dashboard");

    let mut app = App::new(&config, data_dir, source);

    ratatui::run(|terminal| app.run(terminal))?;

    tracing::info!("Application shutting down");

    if let Err(err) = ratatui::try_restore() {
        tracing::error!("Failed to restore terminal: {err}");
    }

    Ok(())
}
