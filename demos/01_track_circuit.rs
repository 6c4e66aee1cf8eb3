//! 01 - Track Circuit
//!
//! The simplest isoroute example: a flat circuit of tracks with extrusion
//! caps, painted in occlusion order onto a PNG.
//!
//! This example demonstrates:
//! - Creating a raster canvas and a scene over it
//! - Building tracks with the route builder
//! - Adding pre-built groups with caps and colors
//! - Drawing and saving the result
//!
//! Run with: `cargo run --example 01_track_circuit`

use isoroute_core::{BlockGroup, Color, Direction, Point3, Scene, SceneConfig};
use isoroute_render::RasterCanvas;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let canvas = RasterCanvas::new(800, 600).with_scale(30.0);
    let mut scene = Scene::new(canvas, SceneConfig::default());

    scene.draw_grid(10, false);

    scene.set_origin(Point3::new(1.0, 1.0, 0.0));
    scene.add_track(5, Direction::X)?;
    scene.add_track(5, Direction::Y)?;
    scene.add_track(-5, Direction::X)?;
    scene.add_track(-5, Direction::Y)?;

    // A capped red track floating above the circuit.
    scene.add_group(
        BlockGroup::track(Point3::new(2.0, 3.0, 2.0), 3, Direction::X)?
            .with_color(Color::new(160, 60, 50))
            .with_start_cap()?
            .with_end_cap()?,
    );

    let painted = scene.draw()?;
    println!("painted {} blocks", painted);

    scene.canvas_handle().borrow().save("track_circuit.png")?;
    println!("wrote track_circuit.png");
    Ok(())
}
