//! # stafanet-panel
//!
//! Client-side enhancements for the Stafa.Net access panel page, compiled to
//! WebAssembly. The page markup and stylesheet stay static; this crate owns
//! the three live behaviours layered on top of them:
//!
//! - light/dark theme selection, automatic by time of day unless the visitor
//!   overrides it,
//! - a ticking clock and Indonesian date line,
//! - a ripple animation on `.btn` clicks.
//!
//! All decisions run against small ports ([`storage::KeyValueStore`],
//! [`schedule::Scheduler`], [`time::TimeSource`], [`page::Page`]) so the
//! logic is testable natively. The `browser` feature adds the `web-sys`
//! adapters and the auto-start entry point.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Tunables: storage keys, element ids, timer periods |
//! | [`theme`] | [`theme::ThemeController`] and the automatic theme rule |
//! | [`clock`] | Clock/date formatting and rendering |
//! | [`ripple`] | Ripple geometry, style and overlay lifecycle |
//! | [`panel`] | One-shot initializer wiring everything to the page |
//! | [`storage`] | Key-value storage port and in-memory store |
//! | [`schedule`] | Timer port, cancel handles and a virtual-time scheduler |
//! | [`time`] | Wall-clock port |
//! | [`page`] | DOM side-effect port and an in-memory page |

pub mod clock;
pub mod config;
pub mod page;
pub mod panel;
pub mod ripple;
pub mod schedule;
pub mod storage;
pub mod theme;
pub mod time;

#[cfg(feature = "browser")]
pub mod browser;
