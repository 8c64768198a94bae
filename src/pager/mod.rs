//! Keeping a page (or item) position consistent with a changing collection.
//!
//! Nothing in here renders or fetches anything. Adapters feed the engine
//! "go to" requests and fetch results, and read back validity and which
//! controls are enabled.

pub mod circular;
mod config;
mod error;
mod fetch;
mod navigator;
mod pages;
mod state;

pub use config::*;
pub use error::*;
pub use fetch::*;
pub use navigator::*;
pub use pages::*;
pub use state::*;
