#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

pub mod export;
pub mod log;
pub mod platform;
pub mod service;
pub mod session;
pub mod settings;
pub mod view;

pub use settings::{Settings, SettingsRepository, SettingsService};
