//! `web-sys` implementation of the page port.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent};

use crate::config::ElementIds;
use crate::page::{ButtonClickHandler, Overlay, Page, PageError, Point, Rect, RippleHost, TextTarget};

const THEME_ATTRIBUTE: &str = "data-theme";

fn dom_err(err: JsValue) -> PageError {
    PageError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

pub struct DomPage {
    document: Document,
    ids: ElementIds,
}

impl DomPage {
    pub fn new(document: Document, ids: ElementIds) -> Self {
        Self { document, ids }
    }

    fn element(&self, id: &str) -> Result<HtmlElement, PageError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| PageError::MissingElement(id.to_owned()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::Dom(format!("#{id} is not an HTML element")))
    }

    fn root(&self) -> Result<Element, PageError> {
        self.document
            .document_element()
            .ok_or_else(|| PageError::MissingElement("html".to_owned()))
    }

    fn buttons(&self) -> Vec<HtmlElement> {
        let list = match self.document.query_selector_all(&self.ids.button_selector) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("page: bad button selector {:?}: {err:?}", self.ids.button_selector);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn listen(target: &HtmlElement, event: &str, callback: Closure<dyn FnMut(Event)>) -> Result<(), PageError> {
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        // Listeners live as long as the page.
        callback.forget();
        Ok(())
    }
}

impl Page for DomPage {
    fn applied_theme(&self) -> Option<String> {
        self.document.document_element()?.get_attribute(THEME_ATTRIBUTE)
    }

    fn apply_theme(&self, theme: &str) -> Result<(), PageError> {
        self.root()?.set_attribute(THEME_ATTRIBUTE, theme).map_err(dom_err)
    }

    fn set_auto_indicator(&self, opacity: &str, label: &str) -> Result<(), PageError> {
        let indicator = self.element(&self.ids.auto_indicator)?;
        indicator.style().set_property("opacity", opacity).map_err(dom_err)?;
        indicator.set_text_content(Some(label));
        Ok(())
    }

    fn set_toggle_transform(&self, transform: &str) -> Result<(), PageError> {
        self.element(&self.ids.theme_toggle)?
            .style()
            .set_property("transform", transform)
            .map_err(dom_err)
    }

    fn set_text(&self, target: TextTarget, text: &str) -> Result<(), PageError> {
        let id = match target {
            TextTarget::Clock => &self.ids.clock,
            TextTarget::Date => &self.ids.date,
        };
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn inject_style(&self, css: &str) -> Result<(), PageError> {
        let head = self.document.head().ok_or_else(|| PageError::MissingElement("head".to_owned()))?;
        let style = self.document.create_element("style").map_err(dom_err)?;
        style.set_text_content(Some(css));
        head.append_child(&style).map_err(dom_err)?;
        Ok(())
    }

    fn on_toggle(&self, mut click: Box<dyn FnMut(u32)>, mut double_click: Box<dyn FnMut()>) -> Result<(), PageError> {
        let toggle = self.element(&self.ids.theme_toggle)?;
        Self::listen(
            &toggle,
            "click",
            Closure::new(move |event: Event| {
                // Keyboard activation reports no detail; count it as a first click.
                let detail = event
                    .dyn_ref::<MouseEvent>()
                    .map_or(1, |mouse| u32::try_from(mouse.detail()).unwrap_or(1).max(1));
                click(detail);
            }),
        )?;
        Self::listen(
            &toggle,
            "dblclick",
            Closure::new(move |event: Event| {
                event.prevent_default();
                double_click();
            }),
        )
    }

    fn on_button_click(&self, handler: ButtonClickHandler) -> usize {
        let mut wired = 0;
        for button in self.buttons() {
            let handler = Rc::clone(&handler);
            let host = DomHost(button.clone());
            let callback = Closure::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let at = Point { x: f64::from(event.client_x()), y: f64::from(event.client_y()) };
                handler(&host, at);
            });
            match Self::listen(&button, "click", callback) {
                Ok(()) => wired += 1,
                Err(err) => log::debug!("page: ripple not attached: {err}"),
            }
        }
        wired
    }

    fn on_button_hover(&self, transition: &str) -> usize {
        let mut wired = 0;
        for button in self.buttons() {
            let target = button.clone();
            let transition = transition.to_owned();
            let callback = Closure::new(move |_: Event| {
                if let Err(err) = target.style().set_property("transition", &transition) {
                    log::trace!("page: hover transition rejected: {err:?}");
                }
            });
            match Self::listen(&button, "mouseenter", callback) {
                Ok(()) => wired += 1,
                Err(err) => log::debug!("page: hover not attached: {err}"),
            }
        }
        wired
    }
}

struct DomHost(HtmlElement);

impl RippleHost for DomHost {
    fn bounds(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect { left: rect.left(), top: rect.top(), width: rect.width(), height: rect.height() }
    }

    fn append_overlay(&self, css: &str) -> Result<Box<dyn Overlay>, PageError> {
        let document = self
            .0
            .owner_document()
            .ok_or_else(|| PageError::Dom("button is detached".to_owned()))?;
        let span = document.create_element("span").map_err(dom_err)?;
        span.set_attribute("style", css).map_err(dom_err)?;
        self.0.append_child(&span).map_err(dom_err)?;
        Ok(Box::new(DomOverlay(span)))
    }
}

struct DomOverlay(Element);

impl Overlay for DomOverlay {
    fn remove(&self) {
        self.0.remove();
    }
}
