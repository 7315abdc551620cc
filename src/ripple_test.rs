#![allow(clippy::float_cmp)]

use super::*;
use crate::page::MemoryPage;
use crate::schedule::ManualScheduler;

fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect { left, top, width, height }
}

fn setup(buttons: usize) -> (Rc<MemoryPage>, ManualScheduler, Rc<RippleEffect>) {
    let mut page = MemoryPage::new();
    for _ in 0..buttons {
        page = page.with_button(rect(100.0, 50.0, 200.0, 40.0));
    }
    let page = Rc::new(page);
    let scheduler = ManualScheduler::new();
    let effect = Rc::new(RippleEffect::new(Rc::new(scheduler.clone()), 600));
    (page, scheduler, effect)
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn geometry_uses_larger_side() {
    let g = RippleGeometry::from_click(rect(0.0, 0.0, 200.0, 40.0), Point { x: 0.0, y: 0.0 });
    assert_eq!(g.diameter, 200.0);
    let g = RippleGeometry::from_click(rect(0.0, 0.0, 30.0, 90.0), Point { x: 0.0, y: 0.0 });
    assert_eq!(g.diameter, 90.0);
}

#[test]
fn geometry_centres_on_click_relative_to_bounds() {
    let g = RippleGeometry::from_click(rect(100.0, 50.0, 200.0, 40.0), Point { x: 150.0, y: 70.0 });
    assert_eq!(g.origin_x, 150.0 - 100.0 - 100.0);
    assert_eq!(g.origin_y, 70.0 - 50.0 - 100.0);
    assert_eq!(g.origin_x + g.diameter / 2.0, 50.0);
    assert_eq!(g.origin_y + g.diameter / 2.0, 20.0);
}

#[test]
fn style_carries_geometry_and_animation() {
    let g = RippleGeometry { origin_x: -50.0, origin_y: -80.0, diameter: 200.0 };
    let css = g.style(600);
    assert!(css.contains("width: 200px; height: 200px;"));
    assert!(css.contains("left: -50px; top: -80px;"));
    assert!(css.contains("animation: ripple 0.6s ease-out forwards;"));
    assert!(css.contains("transform: scale(0);"));
    assert!(css.contains("pointer-events: none;"));
}

// =============================================================
// Styles
// =============================================================

#[test]
fn keyframes_scale_to_two_and_a_half_and_fade() {
    assert!(RIPPLE_KEYFRAMES.contains("@keyframes ripple"));
    assert!(RIPPLE_KEYFRAMES.contains("scale(2.5)"));
    assert!(RIPPLE_KEYFRAMES.contains("opacity: 0"));
}

#[test]
fn style_is_injected_once() {
    let (page, _scheduler, effect) = setup(1);
    effect.install_style(page.as_ref()).expect("inject");
    effect.attach_to(page.as_ref());
    assert_eq!(page.styles(), vec![RIPPLE_KEYFRAMES.to_owned()]);
}

#[test]
fn style_precedes_click_binding() {
    let (page, _scheduler, effect) = setup(1);
    effect.attach_to(page.as_ref());
    assert_eq!(page.journal(), vec!["style".to_owned(), "bind:buttons".to_owned()]);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn ripple_lives_exactly_for_its_duration() {
    let (page, scheduler, effect) = setup(1);
    assert_eq!(effect.attach_to(page.as_ref()), 1);
    let button = page.button(0).expect("button 0");

    assert!(page.click_button(0, Point { x: 150.0, y: 70.0 }));
    assert_eq!(button.overlay_count(), 1);
    scheduler.advance(599);
    assert_eq!(button.overlay_count(), 1);
    scheduler.advance(1);
    assert_eq!(button.overlay_count(), 0);
}

#[test]
fn overlapping_clicks_are_independent() {
    let (page, scheduler, effect) = setup(1);
    effect.attach_to(page.as_ref());
    let button = page.button(0).expect("button 0");

    page.click_button(0, Point { x: 110.0, y: 60.0 });
    scheduler.advance(200);
    page.click_button(0, Point { x: 250.0, y: 80.0 });
    page.click_button(0, Point { x: 260.0, y: 80.0 });
    assert_eq!(button.overlay_count(), 3);

    scheduler.advance(400);
    assert_eq!(button.overlay_count(), 2);
    scheduler.advance(200);
    assert_eq!(button.overlay_count(), 0);
}

#[test]
fn ripples_stay_on_their_own_button() {
    let (page, scheduler, effect) = setup(2);
    assert_eq!(effect.attach_to(page.as_ref()), 2);
    page.click_button(1, Point { x: 120.0, y: 60.0 });
    let first = page.button(0).expect("button 0");
    let second = page.button(1).expect("button 1");
    assert_eq!(first.overlay_count(), 0);
    assert_eq!(second.overlay_count(), 1);
    scheduler.advance(600);
    assert_eq!(second.overlay_count(), 0);
}

#[test]
fn overlay_style_reflects_click_position() {
    let (page, _scheduler, effect) = setup(1);
    effect.attach_to(page.as_ref());
    let button = page.button(0).expect("button 0");
    page.click_button(0, Point { x: 200.0, y: 70.0 });
    let css = button.overlays().pop().expect("overlay");
    assert!(css.contains("width: 200px;"));
    assert!(css.contains("left: 0px; top: -80px;"));
}
