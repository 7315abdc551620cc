//! One-shot page initializer.
//!
//! ARCHITECTURE
//! ============
//! [`Panel::start`] builds the three components over shared ports and wires
//! them to the page in a fixed order: theme first (so the page never shows
//! the wrong theme), then the toggle control, clock, reconciliation timer,
//! ripples and finally the cosmetic hover transition. A missing element only
//! disables its own feature.
//!
//! The toggle's click and double-click gestures are disambiguated: browsers
//! deliver two `click` events ahead of every `dblclick`, so a click waits
//! out the double-click window before toggling and a second click inside
//! that window cancels it. Clicks the browser already counts as the second
//! of a double-click (`detail >= 2`) are left to the `dblclick` handler, so
//! a slow double-click never toggles.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::clock::ClockDisplay;
use crate::config::PanelConfig;
use crate::page::Page;
use crate::ripple::RippleEffect;
use crate::schedule::{Scheduler, TaskHandle};
use crate::storage::KeyValueStore;
use crate::theme::{ThemeController, ThemeState};
use crate::time::TimeSource;

pub const HOVER_TRANSITION: &str = "all 0.3s cubic-bezier(0.4, 0, 0.2, 1)";

/// Environment adapters shared by every component.
#[derive(Clone)]
pub struct Ports {
    pub store: Rc<dyn KeyValueStore>,
    pub page: Rc<dyn Page>,
    pub clock: Rc<dyn TimeSource>,
    pub scheduler: Rc<dyn Scheduler>,
}

/// Document parsing state at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Loading,
    Ready,
}

/// Run `init` immediately when the document is parsed, otherwise hand it to
/// `defer` (which registers it for `DOMContentLoaded`).
pub fn when_ready(readiness: Readiness, init: Box<dyn FnOnce()>, defer: impl FnOnce(Box<dyn FnOnce()>)) {
    match readiness {
        Readiness::Ready => init(),
        Readiness::Loading => defer(init),
    }
}

/// The running panel. Keeps the periodic timers alive.
pub struct Panel {
    theme: Rc<RefCell<ThemeController>>,
    timers: Vec<TaskHandle>,
    toggle_wired: bool,
    buttons: usize,
}

impl Panel {
    pub fn start(ports: Ports, config: &PanelConfig) -> Self {
        let timings = config.timings;

        let mut theme = ThemeController::new(
            Rc::clone(&ports.store),
            Rc::clone(&ports.page),
            Rc::clone(&ports.clock),
            Rc::clone(&ports.scheduler),
            config,
        );
        theme.initialize();
        let theme = Rc::new(RefCell::new(theme));

        let toggle_wired = wire_toggle(&ports, &theme, timings.double_click_window_ms);

        let clock = Rc::new(ClockDisplay::new(Rc::clone(&ports.page), Rc::clone(&ports.clock)));
        clock.tick();
        let mut timers = Vec::with_capacity(2);
        let ticking = Rc::clone(&clock);
        timers.push(ports.scheduler.every(
            timings.clock_tick_ms,
            Box::new(move || {
                ticking.tick();
            }),
        ));

        let reconciling = Rc::clone(&theme);
        timers.push(ports.scheduler.every(
            timings.theme_check_ms,
            Box::new(move || {
                reconciling.borrow_mut().reconcile();
            }),
        ));

        let ripple = Rc::new(RippleEffect::new(Rc::clone(&ports.scheduler), timings.ripple_ms));
        let buttons = ripple.attach_to(ports.page.as_ref());

        let hovered = ports.page.on_button_hover(HOVER_TRANSITION);
        log::debug!("panel: hover transition on {hovered} buttons");

        log::info!("Stafa.Net Access Panel initialized ({buttons} buttons, toggle wired: {toggle_wired})");
        Self { theme, timers, toggle_wired, buttons }
    }

    pub fn theme_state(&self) -> ThemeState {
        self.theme.borrow().state()
    }

    pub fn toggle_wired(&self) -> bool {
        self.toggle_wired
    }

    /// Number of buttons carrying the ripple handler.
    pub fn buttons(&self) -> usize {
        self.buttons
    }

    /// Cancel the clock and reconciliation timers.
    pub fn stop(self) {
        for timer in self.timers {
            timer.cancel();
        }
    }
}

fn wire_toggle(ports: &Ports, theme: &Rc<RefCell<ThemeController>>, window_ms: u32) -> bool {
    let pending: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));

    let click = {
        let pending = Rc::clone(&pending);
        let theme = Rc::clone(theme);
        let scheduler = Rc::clone(&ports.scheduler);
        move |detail: u32| {
            if detail >= 2 {
                // Part of a double-click; the dblclick handler owns it.
                return;
            }
            let queued = pending.borrow_mut().take();
            if let Some(queued) = queued {
                // Second click of a double-click.
                queued.cancel();
                return;
            }
            let slot = Rc::clone(&pending);
            let theme = Rc::clone(&theme);
            let handle = scheduler.once(
                window_ms,
                Box::new(move || {
                    slot.borrow_mut().take();
                    theme.borrow_mut().toggle();
                }),
            );
            *pending.borrow_mut() = Some(handle);
        }
    };

    let double_click = {
        let theme = Rc::clone(theme);
        move || {
            let queued = pending.borrow_mut().take();
            if let Some(queued) = queued {
                queued.cancel();
            }
            theme.borrow_mut().reset_to_automatic();
        }
    };

    match ports.page.on_toggle(Box::new(click), Box::new(double_click)) {
        Ok(()) => true,
        Err(err) => {
            log::info!("panel: theme toggle disabled: {err}");
            false
        }
    }
}
