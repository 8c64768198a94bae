use crate::app::state::{AppState, Browse, Remote};
use crate::client::Client;
use crate::input::key::Key;
use crate::pager::PagerConfig;
use crate::Args;

pub mod state;
pub mod ui;

#[derive(Debug, PartialEq, Eq)]
pub enum AppReturn {
    Exit,
    Continue,
}

pub struct App {
    state: AppState,
    client: Client,
    config: PagerConfig,
    args: Args,
    global: Global,
}

#[derive(Default)]
pub struct Global {
    pub logs: bool,
    pub help: bool,
}

impl App {
    pub fn new(args: Args) -> anyhow::Result<Self> {
        let config = args.pager_config()?;
        let client = Client::new(args.clone());
        let remote = Remote::new(client.clone(), config.clone())?;

        Ok(Self {
            state: AppState::Remote(remote),
            client,
            config,
            args,
            global: Default::default(),
        })
    }

    /// Handle a user action
    pub async fn do_action(&mut self, key: Key) -> AppReturn {
        log::debug!("Key: {key:?}");

        match key {
            Key::Ctrl('c') | Key::Char('q') => return AppReturn::Exit,
            Key::Esc => {
                if self.global.help {
                    self.global.help = false;
                } else {
                    return AppReturn::Exit;
                }
            }
            Key::Char('r') => match Remote::new(self.client.clone(), self.config.clone()) {
                Ok(remote) => self.state = AppState::Remote(remote),
                Err(err) => log::error!("Failed to start fetching: {err}"),
            },
            Key::Char('b') => {
                self.state = AppState::Browse(Browse::new(
                    self.client.clone(),
                    self.args.mode,
                    self.config.page_length,
                ))
            }
            Key::Char('l') => self.global.logs = !self.global.logs,
            Key::Char('h') | Key::Char('?') => self.global.help = !self.global.help,
            _ => {
                self.state.on_key(key).await;
            }
        }
        AppReturn::Continue
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn global(&self) -> &Global {
        &self.global
    }
}
