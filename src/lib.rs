pub mod app;
pub mod client;
pub mod input;
pub mod pager;

use crate::app::{ui, AppReturn};
use crate::client::RunError;
use crate::input::events::Events;
use crate::input::InputEvent;
use crate::pager::PagerConfig;
use app::App;
use clap::{Parser, ValueEnum};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// How the browse view moves through the collection.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Fixed pages, jump to any of them
    #[default]
    Random,
    /// By single item, or by a page worth of items
    Sequential,
}

impl Mode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Random => Self::Sequential,
            Self::Sequential => Self::Random,
        }
    }
}

/// Page through a JSON document
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// JSON document serving the pages
    #[clap(value_parser)]
    pub file: PathBuf,
    /// Items per page
    #[clap(short = 'n', long, env = "PAGEWISE_PAGE_LENGTH")]
    pub page_length: Option<usize>,
    /// Initial page
    #[clap(short, long)]
    pub page: Option<i64>,
    /// Known last page
    #[clap(long)]
    pub max: Option<i64>,
    /// Navigation mode of the browse view
    #[clap(short, long, value_enum, default_value_t)]
    pub mode: Mode,
    /// Simulated transport delay, e.g. "250ms"
    #[clap(long, value_parser = humantime::parse_duration)]
    pub latency: Option<Duration>,
    /// Pager settings as JSON (pageLength, page, max)
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    /// Verbose
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Settings from the config file, if any, overridden by the command line.
    pub fn pager_config(&self) -> Result<PagerConfig, RunError> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_slice(&std::fs::read(path)?)?,
            None => PagerConfig::default(),
        };

        if let Some(page_length) = self.page_length {
            config.page_length = page_length;
        }
        if let Some(page) = self.page {
            config.page = page;
        }
        if self.max.is_some() {
            config.max = self.max;
        }

        config.validate()?;
        Ok(config)
    }
}

pub async fn start_ui(app: &Arc<tokio::sync::Mutex<App>>) -> anyhow::Result<()> {
    // Configure Crossterm backend for tui
    let stdout = stdout();
    crossterm::terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    terminal.hide_cursor()?;

    let render_rate = Duration::from_millis(200);
    let mut events = Events::new(render_rate);

    loop {
        let event = events.next().await;
        {
            let mut app = app.lock().await;
            match event {
                InputEvent::Input(key) => {
                    if let AppReturn::Exit = app.do_action(key).await {
                        break;
                    }
                }
                InputEvent::Render => {}
                InputEvent::Quit => {
                    break;
                }
            }
            // fetch results land in the background, so always redraw
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    // Restore the terminal and close application
    terminal.clear()?;
    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;

    Ok(())
}
