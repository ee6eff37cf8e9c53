pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod state;
pub mod view;

pub use app::Copilot;
pub use config::Settings;
pub use state::{Outcome, PageState};
