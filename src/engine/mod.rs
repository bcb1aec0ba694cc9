// otacheck Engine - Core module structure
pub mod config;
pub mod cli;
pub mod updater;

pub use config::Config;
pub use updater::{check_for_update, QueryOutcome};
