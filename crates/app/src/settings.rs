use std::{fmt, str::FromStr};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

pub const CHART_WIDTH_MIN: u32 = 300;
pub const CHART_WIDTH_MAX: u32 = 960;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub unit: Unit,
    pub theme: Theme,
    pub chart_width: u32,
}

impl Settings {
    pub fn validate_chart_width(width: &str) -> Result<u32, SettingsError> {
        match width.trim().parse::<u32>() {
            Ok(parsed_width) if (CHART_WIDTH_MIN..=CHART_WIDTH_MAX).contains(&parsed_width) => {
                Ok(parsed_width)
            }
            _ => Err(SettingsError::ChartWidth),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit: Unit::Lbs,
            theme: Theme::Light,
            chart_width: 480,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    Lbs,
    Kg,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Unit::Lbs => "lbs",
                Unit::Kg => "kg",
            }
        )
    }
}

impl FromStr for Unit {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lbs" | "lb" => Ok(Unit::Lbs),
            "kg" => Ok(Unit::Kg),
            _ => Err(SettingsError::Unit(s.to_string())),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Theme::Light => "light",
                Theme::Dark => "dark",
            }
        )
    }
}

impl FromStr for Theme {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(SettingsError::Theme(s.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Unit must be lbs or kg ({0})")]
    Unit(String),
    #[error("Theme must be light or dark ({0})")]
    Theme(String),
    #[error("Chart width must be an integer between {CHART_WIDTH_MIN} and {CHART_WIDTH_MAX}")]
    ChartWidth,
}
