//! Browser adapters and the WebAssembly entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only compiled with the `browser` feature. Each submodule implements one
//! port over `web-sys`; [`boot`] runs automatically when the module is
//! instantiated and starts the panel once the document is parsed.

mod dom;
mod local_store;
mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::{DEFAULT_CONFIG_ELEMENT_ID, PanelConfig};
use crate::panel::{Panel, Ports, Readiness, when_ready};
use crate::time::SystemClock;

pub use dom::DomPage;
pub use local_store::LocalStore;
pub use timers::TimerScheduler;

thread_local! {
    static PANEL: RefCell<Option<Panel>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (config, problem) = read_config(&document);
    let level = config.log_level();
    if console_log::init_with_level(level).is_ok() {
        log::debug!("panel: console logging at {level}");
    }
    if let Some(problem) = problem {
        log::warn!("panel: using default config: {problem}");
    }

    let readiness = if document.ready_state() == "loading" {
        Readiness::Loading
    } else {
        Readiness::Ready
    };
    let target = document.clone();
    when_ready(readiness, Box::new(move || launch(&document, &config)), |init| defer_until_parsed(&target, init));
}

fn launch(document: &Document, config: &PanelConfig) {
    PANEL.with(|slot| {
        if slot.borrow().is_some() {
            log::debug!("panel: already running");
            return;
        }
        let ports = Ports {
            store: Rc::new(LocalStore::open()),
            page: Rc::new(DomPage::new(document.clone(), config.elements.clone())),
            clock: Rc::new(SystemClock),
            scheduler: Rc::new(TimerScheduler),
        };
        let panel = Panel::start(ports, config);
        *slot.borrow_mut() = Some(panel);
    });
}

fn defer_until_parsed(document: &Document, init: Box<dyn FnOnce()>) {
    let callback = Closure::once_into_js(move || init());
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref()) {
        log::error!("panel: cannot wait for DOMContentLoaded: {err:?}");
    }
}

fn read_config(document: &Document) -> (PanelConfig, Option<String>) {
    let Some(raw) = document
        .get_element_by_id(DEFAULT_CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return (PanelConfig::default(), None);
    };
    match PanelConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(err) => (PanelConfig::default(), Some(err.to_string())),
    }
}
