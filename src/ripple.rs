//! Click ripple on button-class elements.
//!
//! Each click appends a circular overlay centred on the pointer, sized to the
//! element's larger side. A shared `ripple` keyframe scales it from 0 to 2.5
//! while fading it out, and a one-shot timer detaches it when the animation
//! ends. Overlapping clicks produce independent overlays.

#[cfg(test)]
#[path = "ripple_test.rs"]
mod ripple_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::page::{ButtonClickHandler, Page, PageError, Point, Rect, RippleHost};
use crate::schedule::Scheduler;

pub const RIPPLE_KEYFRAMES: &str = "@keyframes ripple { to { transform: scale(2.5); opacity: 0; } }";

/// Overlay placement relative to the host element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub diameter: f64,
}

impl RippleGeometry {
    /// Square overlay sized to the larger side, centred on `click`.
    pub fn from_click(bounds: Rect, click: Point) -> Self {
        let diameter = bounds.width.max(bounds.height);
        Self {
            origin_x: click.x - bounds.left - diameter / 2.0,
            origin_y: click.y - bounds.top - diameter / 2.0,
            diameter,
        }
    }

    /// Inline style for an overlay animated over `duration_ms`.
    pub fn style(&self, duration_ms: u32) -> String {
        let seconds = f64::from(duration_ms) / 1000.0;
        format!(
            "position: absolute; width: {d}px; height: {d}px; left: {x}px; top: {y}px; \
             background: rgba(255, 255, 255, 0.3); border-radius: 50%; transform: scale(0); \
             animation: ripple {seconds}s ease-out forwards; pointer-events: none;",
            d = self.diameter,
            x = self.origin_x,
            y = self.origin_y,
        )
    }
}

pub struct RippleEffect {
    scheduler: Rc<dyn Scheduler>,
    duration_ms: u32,
    style_installed: Cell<bool>,
}

impl RippleEffect {
    pub fn new(scheduler: Rc<dyn Scheduler>, duration_ms: u32) -> Self {
        Self { scheduler, duration_ms, style_installed: Cell::new(false) }
    }

    /// Register the keyframes with the page. Only the first call injects.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when the style element cannot be added.
    pub fn install_style(&self, page: &dyn Page) -> Result<(), PageError> {
        if self.style_installed.get() {
            return Ok(());
        }
        page.inject_style(RIPPLE_KEYFRAMES)?;
        self.style_installed.set(true);
        Ok(())
    }

    /// Install the keyframes and register click handlers on every button.
    /// Returns how many buttons were wired.
    pub fn attach_to(self: &Rc<Self>, page: &dyn Page) -> usize {
        if let Err(err) = self.install_style(page) {
            log::warn!("ripple: keyframes not installed: {err}");
        }
        let effect = Rc::clone(self);
        let handler: ButtonClickHandler = Rc::new(move |host: &dyn RippleHost, at: Point| {
            effect.spawn(host, at);
        });
        page.on_button_click(handler)
    }

    /// Create one ripple on `host` and schedule its removal.
    pub fn spawn(&self, host: &dyn RippleHost, click: Point) -> Option<RippleGeometry> {
        let geometry = RippleGeometry::from_click(host.bounds(), click);
        match host.append_overlay(&geometry.style(self.duration_ms)) {
            Ok(overlay) => {
                self.scheduler.once(self.duration_ms, Box::new(move || overlay.remove())).detach();
                Some(geometry)
            }
            Err(err) => {
                log::debug!("ripple: overlay skipped: {err}");
                None
            }
        }
    }
}
