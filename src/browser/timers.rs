//! `setTimeout` / `setInterval` adapter.

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsValue;

use crate::schedule::{Scheduler, TaskHandle};

#[derive(Debug, Clone, Copy, Default)]
pub struct TimerScheduler;

// Timer ids are small positive integers; anything else cannot be cleared.
#[allow(clippy::cast_possible_truncation)]
fn timer_id(raw: &JsValue) -> Option<i32> {
    raw.as_f64().map(|id| id as i32)
}

impl Scheduler for TimerScheduler {
    fn once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let Some(id) = timer_id(&Timeout::new(delay_ms, task).forget()) else {
            return TaskHandle::inert();
        };
        TaskHandle::new(move || {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(id);
            }
        })
    }

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle {
        let Some(id) = timer_id(&Interval::new(period_ms, task).forget()) else {
            return TaskHandle::inert();
        };
        TaskHandle::new(move || {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id);
            }
        })
    }
}
