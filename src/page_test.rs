use std::cell::Cell;

use super::*;

fn button_rect() -> Rect {
    Rect { left: 10.0, top: 20.0, width: 120.0, height: 40.0 }
}

#[test]
fn missing_indicator_reports_its_id() {
    let page = MemoryPage::new().without(Part::AutoIndicator);
    let err = page.set_auto_indicator("1", "AUTO").expect_err("indicator is absent");
    assert_eq!(err, PageError::MissingElement("autoIndicator".to_owned()));
    assert_eq!(page.indicator(), None);
}

#[test]
fn text_targets_are_independent() {
    let page = MemoryPage::new().without(Part::Clock);
    assert!(page.set_text(TextTarget::Clock, "09:00:00").is_err());
    assert!(page.set_text(TextTarget::Date, "Senin, 1 Januari 2024").is_ok());
    assert_eq!(page.text(TextTarget::Clock), None);
    assert_eq!(page.text(TextTarget::Date).as_deref(), Some("Senin, 1 Januari 2024"));
}

#[test]
fn toggle_handlers_replay_clicks() {
    let page = MemoryPage::new();
    let clicks = Rc::new(Cell::new(0));
    let doubles = Rc::new(Cell::new(0));
    let (c, d) = (Rc::clone(&clicks), Rc::clone(&doubles));
    page.on_toggle(Box::new(move |_| c.set(c.get() + 1)), Box::new(move || d.set(d.get() + 1)))
        .expect("toggle exists");

    page.click_toggle();
    page.click_toggle();
    page.double_click_toggle();
    assert_eq!(clicks.get(), 2);
    assert_eq!(doubles.get(), 1);
}

#[test]
fn toggle_clicks_carry_repeat_count() {
    let page = MemoryPage::new();
    let details = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&details);
    page.on_toggle(Box::new(move |detail| seen.borrow_mut().push(detail)), Box::new(|| {}))
        .expect("toggle exists");

    page.click_toggle();
    page.repeat_click_toggle(2);
    assert_eq!(*details.borrow(), vec![1, 2]);
}

#[test]
fn toggle_binding_fails_without_toggle() {
    let page = MemoryPage::new().without(Part::ThemeToggle);
    assert!(page.on_toggle(Box::new(|_| {}), Box::new(|| {})).is_err());
    assert!(!page.toggle_wired());
    page.click_toggle();
}

#[test]
fn overlays_attach_and_detach() {
    let page = MemoryPage::new().with_button(button_rect());
    let handler: ButtonClickHandler = Rc::new(|host: &dyn RippleHost, _at: Point| {
        let overlay = host.append_overlay("color: red").expect("append");
        assert_eq!(host.bounds().width, 120.0);
        overlay.remove();
    });
    assert_eq!(page.on_button_click(handler), 1);
    assert!(page.click_button(0, Point { x: 15.0, y: 25.0 }));
    let button = page.button(0).expect("button 0");
    assert_eq!(button.overlay_count(), 0);
}

#[test]
fn click_on_unknown_button_is_ignored() {
    let page = MemoryPage::new();
    assert!(!page.click_button(3, Point::default()));
}

#[test]
fn hover_sets_transition_on_every_button() {
    let page = MemoryPage::new().with_button(button_rect()).with_button(button_rect());
    assert_eq!(page.on_button_hover("all 0.3s"), 2);
    for index in 0..2 {
        let button = page.button(index).expect("button");
        assert_eq!(button.hover_transition().as_deref(), Some("all 0.3s"));
    }
}

#[test]
fn journal_records_effect_order() {
    let page = MemoryPage::new();
    page.apply_theme("dark").expect("theme");
    page.inject_style("x").expect("style");
    assert_eq!(page.journal(), vec!["theme:dark".to_owned(), "style".to_owned()]);
}
