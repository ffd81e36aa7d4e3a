#![warn(clippy::pedantic)]

pub mod chart;
pub mod log;
mod service;
mod settings;

pub use service::Service;
pub use settings::{
    CHART_WIDTH_MAX, CHART_WIDTH_MIN, Settings, SettingsError, SettingsRepository,
    SettingsService, Theme, Unit,
};
