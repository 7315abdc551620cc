//! Panel configuration.
//!
//! Every field has a default matching the stock access panel markup, so a
//! host page only needs to supply the values it changes. The browser entry
//! point reads an optional JSON block (`<script type="application/json"
//! id="panel-config">`) and falls back to [`PanelConfig::default`] when it is
//! missing or malformed.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

pub const DEFAULT_THEME_KEY: &str = "stafanet-theme";
pub const DEFAULT_MANUAL_KEY: &str = "stafanet-manual-theme";
pub const DEFAULT_CONFIG_ELEMENT_ID: &str = "panel-config";

/// Errors produced while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but holds a value the panel cannot use.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Storage keys for the persisted theme state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub manual: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { theme: DEFAULT_THEME_KEY.to_owned(), manual: DEFAULT_MANUAL_KEY.to_owned() }
    }
}

/// Ids and selectors of the host page elements the panel drives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub auto_indicator: String,
    pub theme_toggle: String,
    pub clock: String,
    pub date: String,
    pub button_selector: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            auto_indicator: "autoIndicator".to_owned(),
            theme_toggle: "themeToggle".to_owned(),
            clock: "clock".to_owned(),
            date: "date".to_owned(),
            button_selector: ".btn".to_owned(),
        }
    }
}

/// Timer periods and animation durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub clock_tick_ms: u32,
    pub theme_check_ms: u32,
    pub ripple_ms: u32,
    pub toggle_pulse_ms: u32,
    /// How long a toggle click waits for a second click. Matches the
    /// common 500 ms desktop double-click time.
    pub double_click_window_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            clock_tick_ms: 1_000,
            theme_check_ms: 60_000,
            ripple_ms: 600,
            toggle_pulse_ms: 300,
            double_click_window_ms: 500,
        }
    }
}

/// Local hours during which the automatic theme is light: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LightWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for LightWindow {
    fn default() -> Self {
        Self { start_hour: 6, end_hour: 18 }
    }
}

impl LightWindow {
    #[must_use]
    pub fn contains(self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub storage: StorageKeys,
    pub elements: ElementIds,
    pub timings: Timings,
    pub light_window: LightWindow,
    /// `log` level name for the browser console logger.
    pub log_level: Option<String>,
}

impl PanelConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = self.light_window;
        if window.end_hour > 24 || window.start_hour >= window.end_hour {
            return Err(ConfigError::Invalid {
                field: "light_window",
                reason: format!("expected start < end <= 24, got {}..{}", window.start_hour, window.end_hour),
            });
        }
        let periods = [
            ("timings.clock_tick_ms", self.timings.clock_tick_ms),
            ("timings.theme_check_ms", self.timings.theme_check_ms),
            ("timings.ripple_ms", self.timings.ripple_ms),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(ConfigError::Invalid { field, reason: "must be greater than zero".to_owned() });
            }
        }
        if self.storage.theme.is_empty() || self.storage.manual.is_empty() {
            return Err(ConfigError::Invalid { field: "storage", reason: "keys must not be empty".to_owned() });
        }
        if self.storage.theme == self.storage.manual {
            return Err(ConfigError::Invalid { field: "storage", reason: "keys must differ".to_owned() });
        }
        Ok(())
    }

    /// Resolve the configured log level, defaulting to `Info`.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        self.log_level
            .as_deref()
            .and_then(|raw| raw.trim().parse::<log::Level>().ok())
            .unwrap_or(log::Level::Info)
    }
}
