//! DOM side-effect port.
//!
//! DESIGN
//! ======
//! Components never touch `web-sys` directly. They describe what the page
//! should show through [`Page`], and ripples talk to the clicked element
//! through [`RippleHost`]. The browser adapter resolves element ids from
//! config; [`MemoryPage`] records every effect so tests can assert on it and
//! replays user gestures by invoking the registered handlers.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Errors produced by page adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// The element the operation targets is not in the document.
    #[error("element not found: {0}")]
    MissingElement(String),

    /// The DOM rejected the operation.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Text-only display targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTarget {
    Clock,
    Date,
}

/// Element bounds in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A transient element appended to the page.
pub trait Overlay {
    /// Detach the element from the document.
    fn remove(&self);
}

/// An element that can carry ripple overlays.
pub trait RippleHost {
    fn bounds(&self) -> Rect;

    /// Append a child element styled with `css`.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when the element cannot be created or attached.
    fn append_overlay(&self, css: &str) -> Result<Box<dyn Overlay>, PageError>;
}

/// Handler invoked with the clicked button and the pointer position.
pub type ButtonClickHandler = Rc<dyn Fn(&dyn RippleHost, Point)>;

/// The host page as seen by the panel.
pub trait Page {
    /// Value of the `data-theme` attribute on the root element.
    fn applied_theme(&self) -> Option<String>;

    /// Set the `data-theme` attribute on the root element.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when the root element is unavailable.
    fn apply_theme(&self, theme: &str) -> Result<(), PageError>;

    /// Set the auto indicator's opacity and label.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::MissingElement`] when the indicator is absent.
    fn set_auto_indicator(&self, opacity: &str, label: &str) -> Result<(), PageError>;

    /// Set the theme toggle control's CSS transform (empty string clears it).
    ///
    /// # Errors
    ///
    /// Returns [`PageError::MissingElement`] when the toggle is absent.
    fn set_toggle_transform(&self, transform: &str) -> Result<(), PageError>;

    /// Replace the text content of a display target.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::MissingElement`] when the target is absent.
    fn set_text(&self, target: TextTarget, text: &str) -> Result<(), PageError>;

    /// Append a `<style>` element with `css` to the document head.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when the head is unavailable.
    fn inject_style(&self, css: &str) -> Result<(), PageError>;

    /// Register single- and double-click handlers on the theme toggle.
    /// `click` receives the click's repeat count (`MouseEvent.detail`):
    /// 1 for a first click, 2 for the second click of a double-click.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::MissingElement`] when the toggle is absent.
    fn on_toggle(&self, click: Box<dyn FnMut(u32)>, double_click: Box<dyn FnMut()>) -> Result<(), PageError>;

    /// Register `handler` for clicks on every button-class element.
    /// Returns how many elements received it.
    fn on_button_click(&self, handler: ButtonClickHandler) -> usize;

    /// Apply `transition` to each button-class element when hovered.
    /// Returns how many elements received it.
    fn on_button_hover(&self, transition: &str) -> usize;
}

// =============================================================================
// IN-MEMORY PAGE
// =============================================================================

/// Optional page elements that [`MemoryPage`] can leave out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    AutoIndicator,
    ThemeToggle,
    Clock,
    Date,
}

/// State of a single button in a [`MemoryPage`].
#[derive(Debug, Default)]
pub struct MemoryButton {
    bounds: Rect,
    next_overlay: Cell<u64>,
    overlays: RefCell<Vec<(u64, String)>>,
    hover_transition: RefCell<Option<String>>,
}

impl MemoryButton {
    /// Styles of overlays currently attached to this button.
    pub fn overlays(&self) -> Vec<String> {
        self.overlays.borrow().iter().map(|(_, css)| css.clone()).collect()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.borrow().len()
    }

    /// Transition applied once the button is hovered.
    pub fn hover_transition(&self) -> Option<String> {
        self.hover_transition.borrow().clone()
    }
}

struct MemoryOverlay {
    id: u64,
    button: Rc<MemoryButton>,
}

impl Overlay for MemoryOverlay {
    fn remove(&self) {
        self.button.overlays.borrow_mut().retain(|(id, _)| *id != self.id);
    }
}

struct ButtonRef(Rc<MemoryButton>);

impl RippleHost for ButtonRef {
    fn bounds(&self) -> Rect {
        self.0.bounds
    }

    fn append_overlay(&self, css: &str) -> Result<Box<dyn Overlay>, PageError> {
        let id = self.0.next_overlay.get();
        self.0.next_overlay.set(id + 1);
        self.0.overlays.borrow_mut().push((id, css.to_owned()));
        Ok(Box::new(MemoryOverlay { id, button: Rc::clone(&self.0) }))
    }
}

type ToggleHandlers = (Box<dyn FnMut(u32)>, Box<dyn FnMut()>);

/// Recording [`Page`] for tests and headless hosts.
#[derive(Default)]
pub struct MemoryPage {
    missing: Vec<Part>,
    theme: RefCell<Option<String>>,
    theme_writes: Cell<usize>,
    indicator: RefCell<Option<(String, String)>>,
    indicator_writes: Cell<usize>,
    toggle_transforms: RefCell<Vec<String>>,
    texts: RefCell<HashMap<TextTarget, String>>,
    styles: RefCell<Vec<String>>,
    toggle_handlers: RefCell<Option<ToggleHandlers>>,
    buttons: Vec<Rc<MemoryButton>>,
    button_handler: RefCell<Option<ButtonClickHandler>>,
    journal: RefCell<Vec<String>>,
}

impl MemoryPage {
    /// Page with every optional element present and no buttons.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave `part` out of the markup.
    #[must_use]
    pub fn without(mut self, part: Part) -> Self {
        self.missing.push(part);
        self
    }

    /// Add a button-class element with the given bounds.
    #[must_use]
    pub fn with_button(mut self, bounds: Rect) -> Self {
        self.buttons.push(Rc::new(MemoryButton { bounds, ..MemoryButton::default() }));
        self
    }

    /// Pre-set the root `data-theme` attribute.
    #[must_use]
    pub fn with_theme(self, theme: &str) -> Self {
        *self.theme.borrow_mut() = Some(theme.to_owned());
        self
    }

    pub fn theme(&self) -> Option<String> {
        self.theme.borrow().clone()
    }

    /// Number of `apply_theme` calls so far.
    pub fn theme_writes(&self) -> usize {
        self.theme_writes.get()
    }

    /// Current `(opacity, label)` of the auto indicator.
    pub fn indicator(&self) -> Option<(String, String)> {
        self.indicator.borrow().clone()
    }

    /// Number of indicator updates so far.
    pub fn indicator_writes(&self) -> usize {
        self.indicator_writes.get()
    }

    /// Every transform written to the toggle control, oldest first.
    pub fn toggle_transforms(&self) -> Vec<String> {
        self.toggle_transforms.borrow().clone()
    }

    pub fn text(&self, target: TextTarget) -> Option<String> {
        self.texts.borrow().get(&target).cloned()
    }

    pub fn styles(&self) -> Vec<String> {
        self.styles.borrow().clone()
    }

    pub fn button(&self, index: usize) -> Option<Rc<MemoryButton>> {
        self.buttons.get(index).cloned()
    }

    /// Coarse ordered record of effects and registrations.
    pub fn journal(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    /// Whether handlers are registered on the theme toggle.
    pub fn toggle_wired(&self) -> bool {
        self.toggle_handlers.borrow().is_some()
    }

    /// Replay a first `click` on the theme toggle.
    pub fn click_toggle(&self) {
        self.repeat_click_toggle(1);
    }

    /// Replay a `click` whose repeat count is `detail`, as the browser
    /// reports for the later clicks of a multi-click.
    pub fn repeat_click_toggle(&self, detail: u32) {
        self.with_toggle_handlers(|(click, _)| click(detail));
    }

    /// Replay a `dblclick` on the theme toggle.
    pub fn double_click_toggle(&self) {
        self.with_toggle_handlers(|(_, double_click)| double_click());
    }

    /// Replay a click on button `index` at `at`. Returns false when no such
    /// button exists or no handler is registered.
    pub fn click_button(&self, index: usize, at: Point) -> bool {
        let Some(button) = self.buttons.get(index) else {
            return false;
        };
        let Some(handler) = self.button_handler.borrow().clone() else {
            return false;
        };
        handler(&ButtonRef(Rc::clone(button)), at);
        true
    }

    fn has(&self, part: Part) -> bool {
        !self.missing.contains(&part)
    }

    fn require(&self, part: Part, id: &str) -> Result<(), PageError> {
        if self.has(part) { Ok(()) } else { Err(PageError::MissingElement(id.to_owned())) }
    }

    fn note(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }

    // Handlers are taken out while running so they can touch the page.
    fn with_toggle_handlers(&self, run: impl FnOnce(&mut ToggleHandlers)) {
        let Some(mut handlers) = self.toggle_handlers.borrow_mut().take() else {
            return;
        };
        run(&mut handlers);
        *self.toggle_handlers.borrow_mut() = Some(handlers);
    }
}

impl Page for MemoryPage {
    fn applied_theme(&self) -> Option<String> {
        self.theme()
    }

    fn apply_theme(&self, theme: &str) -> Result<(), PageError> {
        *self.theme.borrow_mut() = Some(theme.to_owned());
        self.theme_writes.set(self.theme_writes.get() + 1);
        self.note(format!("theme:{theme}"));
        Ok(())
    }

    fn set_auto_indicator(&self, opacity: &str, label: &str) -> Result<(), PageError> {
        self.require(Part::AutoIndicator, "autoIndicator")?;
        *self.indicator.borrow_mut() = Some((opacity.to_owned(), label.to_owned()));
        self.indicator_writes.set(self.indicator_writes.get() + 1);
        self.note("indicator");
        Ok(())
    }

    fn set_toggle_transform(&self, transform: &str) -> Result<(), PageError> {
        self.require(Part::ThemeToggle, "themeToggle")?;
        self.toggle_transforms.borrow_mut().push(transform.to_owned());
        Ok(())
    }

    fn set_text(&self, target: TextTarget, text: &str) -> Result<(), PageError> {
        match target {
            TextTarget::Clock => self.require(Part::Clock, "clock")?,
            TextTarget::Date => self.require(Part::Date, "date")?,
        }
        self.texts.borrow_mut().insert(target, text.to_owned());
        self.note(format!("text:{target:?}"));
        Ok(())
    }

    fn inject_style(&self, css: &str) -> Result<(), PageError> {
        self.styles.borrow_mut().push(css.to_owned());
        self.note("style");
        Ok(())
    }

    fn on_toggle(&self, click: Box<dyn FnMut(u32)>, double_click: Box<dyn FnMut()>) -> Result<(), PageError> {
        self.require(Part::ThemeToggle, "themeToggle")?;
        *self.toggle_handlers.borrow_mut() = Some((click, double_click));
        self.note("bind:toggle");
        Ok(())
    }

    fn on_button_click(&self, handler: ButtonClickHandler) -> usize {
        *self.button_handler.borrow_mut() = Some(handler);
        self.note("bind:buttons");
        self.buttons.len()
    }

    fn on_button_hover(&self, transition: &str) -> usize {
        for button in &self.buttons {
            *button.hover_transition.borrow_mut() = Some(transition.to_owned());
        }
        self.note("bind:hover");
        self.buttons.len()
    }
}
