//! Light/dark theme selection.
//!
//! The page follows the time of day (light from 06:00 until 17:59, dark
//! otherwise) until the visitor clicks the theme toggle. From then on the
//! chosen mode is manual: it is restored on every visit and the periodic
//! re-check leaves it alone, until a double-click returns to automatic mode.
//!
//! PERSISTENCE
//! ===========
//! Two independent storage entries: the last applied mode (`light`/`dark`)
//! and a manual flag (`true` or absent). Storage is best-effort; failures
//! and malformed values are logged and treated as "nothing stored".

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::rc::Rc;

use chrono::{NaiveDateTime, Timelike};

use crate::config::{LightWindow, PanelConfig, StorageKeys};
use crate::page::{Page, PageError};
use crate::schedule::Scheduler;
use crate::storage::KeyValueStore;
use crate::time::TimeSource;

pub const MANUAL_FLAG_VALUE: &str = "true";
pub const AUTO_LABEL: &str = "AUTO";
pub const TOGGLE_PULSE_TRANSFORM: &str = "scale(0.9) rotate(360deg)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// Attribute and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored or applied value. Anything but `light`/`dark` is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Applied mode plus whether it came from a manual override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub is_manual: bool,
}

/// Automatic mode for `now` with the stock 06:00–18:00 light window.
pub fn compute_auto_theme(now: &NaiveDateTime) -> ThemeMode {
    auto_theme_in(now, LightWindow::default())
}

/// Automatic mode for `now` with a custom light window.
pub fn auto_theme_in(now: &NaiveDateTime, window: LightWindow) -> ThemeMode {
    if window.contains(now.hour()) { ThemeMode::Light } else { ThemeMode::Dark }
}

/// Owns the manual-override flag and every theme side effect.
pub struct ThemeController {
    store: Rc<dyn KeyValueStore>,
    page: Rc<dyn Page>,
    clock: Rc<dyn TimeSource>,
    scheduler: Rc<dyn Scheduler>,
    keys: StorageKeys,
    light_window: LightWindow,
    pulse_ms: u32,
    manual: bool,
}

impl ThemeController {
    pub fn new(
        store: Rc<dyn KeyValueStore>,
        page: Rc<dyn Page>,
        clock: Rc<dyn TimeSource>,
        scheduler: Rc<dyn Scheduler>,
        config: &PanelConfig,
    ) -> Self {
        Self {
            store,
            page,
            clock,
            scheduler,
            keys: config.storage.clone(),
            light_window: config.light_window,
            pulse_ms: config.timings.toggle_pulse_ms,
            manual: false,
        }
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Mode currently applied to the page, if it holds a recognised value.
    pub fn applied_mode(&self) -> Option<ThemeMode> {
        self.page.applied_theme().as_deref().and_then(ThemeMode::parse)
    }

    /// Snapshot of the applied mode and override flag. An unrecognised
    /// applied value reports the automatic mode for now.
    pub fn state(&self) -> ThemeState {
        let mode = self.applied_mode().unwrap_or_else(|| self.auto_mode());
        ThemeState { mode, is_manual: self.manual }
    }

    /// Automatic mode for the current time.
    pub fn auto_mode(&self) -> ThemeMode {
        auto_theme_in(&self.clock.now(), self.light_window)
    }

    /// Restore a persisted manual choice, or fall back to automatic mode.
    pub fn initialize(&mut self) -> ThemeState {
        let (restored, flag_present) = self.read_manual_choice();
        if let Some(mode) = restored {
            self.manual = true;
            self.apply(mode);
            log::debug!("theme: restored manual {}", mode.as_str());
        } else {
            self.manual = false;
            let mode = self.auto_mode();
            self.apply(mode);
            self.persist(&self.keys.theme, mode.as_str());
            if flag_present {
                self.forget(&self.keys.manual);
            }
            log::debug!("theme: automatic {}", mode.as_str());
        }
        self.update_indicator();
        self.state()
    }

    /// Flip the applied mode and mark it as a manual choice.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.applied_mode().map_or(ThemeMode::Dark, ThemeMode::flipped);
        self.manual = true;
        self.apply(next);
        self.persist(&self.keys.theme, next.as_str());
        self.persist(&self.keys.manual, MANUAL_FLAG_VALUE);
        self.update_indicator();
        self.pulse_toggle();
        log::info!("theme: manual {}", next.as_str());
        next
    }

    /// Drop the manual override and apply the automatic mode.
    pub fn reset_to_automatic(&mut self) -> ThemeMode {
        self.manual = false;
        self.forget(&self.keys.manual);
        let mode = self.auto_mode();
        self.apply(mode);
        self.persist(&self.keys.theme, mode.as_str());
        self.update_indicator();
        log::info!("theme: back to automatic {}", mode.as_str());
        mode
    }

    /// Periodic re-check. Returns whether the applied mode changed.
    pub fn reconcile(&mut self) -> bool {
        if self.manual {
            return false;
        }
        let mode = self.auto_mode();
        if self.applied_mode() == Some(mode) {
            return false;
        }
        self.apply(mode);
        self.persist(&self.keys.theme, mode.as_str());
        log::debug!("theme: time-based switch to {}", mode.as_str());
        true
    }

    /// Returns the restorable manual mode and whether a manual flag entry
    /// exists at all.
    fn read_manual_choice(&self) -> (Option<ThemeMode>, bool) {
        let flag = match self.store.get(&self.keys.manual) {
            Ok(flag) => flag,
            Err(err) => {
                log::warn!("theme: cannot read manual flag: {err}");
                return (None, false);
            }
        };
        let Some(flag) = flag else {
            return (None, false);
        };
        if flag != MANUAL_FLAG_VALUE {
            log::debug!("theme: ignoring manual flag {flag:?}");
            return (None, true);
        }
        match self.store.get(&self.keys.theme) {
            Ok(Some(raw)) => {
                let mode = ThemeMode::parse(&raw);
                if mode.is_none() {
                    log::warn!("theme: ignoring stored theme {raw:?}");
                }
                (mode, true)
            }
            Ok(None) => (None, true),
            Err(err) => {
                log::warn!("theme: cannot read stored theme: {err}");
                (None, true)
            }
        }
    }

    fn apply(&self, mode: ThemeMode) {
        if let Err(err) = self.page.apply_theme(mode.as_str()) {
            log::warn!("theme: cannot apply {}: {err}", mode.as_str());
        }
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            log::warn!("theme: {err}");
        }
    }

    fn forget(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            log::warn!("theme: {err}");
        }
    }

    fn update_indicator(&self) {
        let (opacity, label) = if self.manual { ("0", "") } else { ("1", AUTO_LABEL) };
        if let Err(err) = self.page.set_auto_indicator(opacity, label) {
            log::debug!("theme: indicator skipped: {err}");
        }
    }

    fn pulse_toggle(&self) {
        match self.page.set_toggle_transform(TOGGLE_PULSE_TRANSFORM) {
            Ok(()) => {
                let page = Rc::clone(&self.page);
                self.scheduler
                    .once(
                        self.pulse_ms,
                        Box::new(move || {
                            if let Err(err) = page.set_toggle_transform("") {
                                log::debug!("theme: pulse reset skipped: {err}");
                            }
                        }),
                    )
                    .detach();
            }
            Err(PageError::MissingElement(_)) => {}
            Err(err) => log::debug!("theme: pulse skipped: {err}"),
        }
    }
}
