use clap::Parser;
use log::LevelFilter;
use pagewise::{app::App, start_ui, Args};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Configure log
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    tui_logger::init_logger(level)
        .map_err(|err| anyhow::anyhow!("Failed to set up logging: {err}"))?;
    tui_logger::set_default_level(level);

    let app = Arc::new(tokio::sync::Mutex::new(App::new(args)?));

    start_ui(&app).await?;
    Ok(())
}
