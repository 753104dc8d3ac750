//! Affine widget demonstration.
//!
//! This demo shows:
//! - Attaching an affine widget to an actor in a headless viewport
//! - Loading the widget configuration from JSON
//! - Scripted mouse drags on a translation arrow and a rotation ring
//! - Receiving the committed matrix in the release callback
//! - Moving the widget origin and resetting the transform
//!
//! Run with: `RUST_LOG=debug cargo run --example affine_widget_demo`

use std::cell::RefCell;
use std::rc::Rc;

use vizkit::gizmo::{ARROW_LENGTH_FACTOR, RING_RADIUS_FACTOR};
use vizkit::mesh::cube;
use vizkit::transform::to_rows;
use vizkit::*;

const CONFIG: &str = r#"{
    "scale": 0.15,
    "line_radius": 0.02,
    "always_visible": true
}"#;

fn print_matrix(label: &str, matrix: &Mat4) {
    println!("{label}:");
    for row in to_rows(matrix) {
        println!(
            "  [{:8.4} {:8.4} {:8.4} {:8.4}]",
            row[0], row[1], row[2], row[3]
        );
    }
}

/// Moves onto `from`, presses, drags to `to` in a few steps, and releases.
fn scripted_drag(viewport: &Rc<RefCell<HeadlessViewport>>, from: Vec2, to: Vec2) {
    HeadlessViewport::dispatch(viewport, &MouseEvent::moved(from.x, from.y));
    HeadlessViewport::dispatch(viewport, &MouseEvent::pressed(from.x, from.y));
    for step in 1..=4u8 {
        let p = from.lerp(to, f32::from(step) / 4.0);
        HeadlessViewport::dispatch(viewport, &MouseEvent::moved(p.x, p.y));
    }
    HeadlessViewport::dispatch(viewport, &MouseEvent::released(to.x, to.y));
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let viewport = HeadlessViewport::new(1280, 720).into_shared();
    let actor = Rc::new(RefCell::new(Actor::new("cube", cube(Vec3::ZERO, 1.0))));

    let config = AffineWidgetConfig::from_json(CONFIG)?;
    let size = actor.borrow().length() * config.scale;
    let widget = AffineWidget::new(
        &viewport,
        &actor,
        config,
        Some(Box::new(|matrix: Mat4| {
            print_matrix("committed", &matrix);
            Ok(())
        })),
    )?;
    println!(
        "widget with {} handles at origin {}",
        widget.handles().len(),
        widget.origin()
    );

    // Drag the X arrow along its own screen direction.
    let on_arrow = widget.origin() + Vec3::X * size * ARROW_LENGTH_FACTOR * 0.6;
    let (from, to) = {
        let vp = viewport.borrow();
        (
            vp.world_to_screen(on_arrow),
            vp.world_to_screen(on_arrow + Vec3::X * 0.2),
        )
    };
    if let (Some(from), Some(to)) = (from, to) {
        println!("translating along X: {from} -> {to}");
        scripted_drag(&viewport, from, to);
    }

    // Drag the Z ring a quarter of the way around its arc.
    let radius = size * RING_RADIUS_FACTOR;
    let ring_at = |degrees: f32| {
        let (s, c) = degrees.to_radians().sin_cos();
        widget.origin() + Vec3::new(c, s, 0.0) * radius
    };
    let (from, to) = {
        let vp = viewport.borrow();
        (
            vp.world_to_screen(ring_at(21.6)),
            vp.world_to_screen(ring_at(68.4)),
        )
    };
    if let (Some(from), Some(to)) = (from, to) {
        println!("rotating about Z: {from} -> {to}");
        scripted_drag(&viewport, from, to);
    }

    let euler = Transform::from_matrix(widget.cached_matrix()).euler_angles_degrees();
    println!("rotation (XYZ degrees): {euler}");

    widget.set_origin(Vec3::new(0.5, 0.5, 0.5))?;
    println!("origin moved to {}", widget.origin());

    widget.reset();
    print_matrix("after reset", &widget.cached_matrix());

    println!("{} render passes issued", viewport.borrow().render_count());
    widget.remove();
    Ok(())
}
