//! 02 - Rotated Split Scenes
//!
//! Composes two independently-rotated sub-scenes onto one canvas and snaps
//! a column onto existing geometry through the rotation-equivalence lookup.
//!
//! This example demonstrates:
//! - `split()` sharing one canvas between scenes
//! - Quarter-turn rotation and the derived rotation quadrant
//! - `equivalent_point` lookups under rotation
//!
//! Run with: `cargo run --example 02_rotated_split`

use std::f64::consts::FRAC_PI_2;

use isoroute_core::{BlockGroup, Color, Direction, Point3, Scene, SceneConfig};
use isoroute_render::RasterCanvas;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let canvas = RasterCanvas::new(800, 600).with_scale(26.0);
    let mut scene = Scene::new(canvas, SceneConfig::default());

    scene.set_origin(Point3::new(2.0, 2.0, 0.0));
    scene.add_track(6, Direction::X)?;
    scene.add_column(3, Direction::Up)?;
    scene.draw()?;

    // A quarter-turned sub-scene on the same surface.
    let mut turned = scene.split();
    turned.set_rotation(FRAC_PI_2);
    println!("sub-scene quadrant: {:?}", turned.rotation_quadrant());

    turned.set_origin(Point3::new(4.0, 4.0, 0.0));
    turned.add_track(4, Direction::Y)?;

    // Snap a column wherever the track offers an equivalent anchor.
    match turned.equivalent_point(Point3::new(4.0, 5.0, 1.0)) {
        Some(anchor) => {
            println!("anchor found at {}", anchor);
            turned.add_group(
                BlockGroup::column(anchor, 2, Direction::Up)?
                    .with_color(Color::new(160, 60, 50)),
            );
        }
        None => println!("no equivalent anchor under this rotation"),
    }
    turned.draw()?;

    scene.canvas_handle().borrow().save("rotated_split.png")?;
    println!("wrote rotated_split.png");
    Ok(())
}
