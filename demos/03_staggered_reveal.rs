//! 03 - Staggered Reveal
//!
//! Draws a route with a per-block delay, advancing the cooperative clock in
//! steps and writing a frame after each step. There is no double buffering,
//! so every frame shows the partially painted sequence.
//!
//! Run with: `cargo run --example 03_staggered_reveal`

use std::time::Duration;

use isoroute_core::{Direction, Point3, Scene, SceneConfig};
use isoroute_render::RasterCanvas;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let canvas = RasterCanvas::new(800, 600).with_scale(30.0);
    let mut scene = Scene::new(
        canvas,
        SceneConfig {
            delay: Duration::from_millis(50),
            ..SceneConfig::default()
        },
    );

    scene.set_origin(Point3::new(2.0, 2.0, 0.0));
    scene.add_track(4, Direction::X)?;
    scene.add_stairs(2, Direction::X, 4)?;
    scene.add_column(2, Direction::Up)?;

    let total = scene.draw()?;
    println!("scheduled {} blocks", total);

    let mut frame = 0;
    while scene.pending_dispatches() > 0 {
        scene.advance(Duration::from_millis(200));
        frame += 1;
        let path = format!("reveal_{:02}.png", frame);
        scene.canvas_handle().borrow().save(&path)?;
        println!(
            "frame {}: {} dispatches still pending",
            frame,
            scene.pending_dispatches()
        );
    }
    Ok(())
}
