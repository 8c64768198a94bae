mod browse;
mod remote;

pub use browse::Browse;
pub use remote::Remote;

use crate::app::ui::StateRenderer;
use crate::input::key::Key;

pub enum AppState {
    Remote(Remote),
    Browse(Browse),
}

impl AppState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Remote(_) => "fetching by page",
            Self::Browse(_) => "browsing",
        }
    }

    pub fn render<R: StateRenderer>(&self, r: R) {
        match self {
            Self::Remote(remote) => remote.render(r),
            Self::Browse(browse) => browse.render(r),
        }
    }

    pub async fn on_key(&self, key: Key) {
        match self {
            Self::Remote(remote) => remote.on_key(key).await,
            Self::Browse(browse) => browse.on_key(key).await,
        }
    }
}
