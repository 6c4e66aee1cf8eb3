//! isoroute - isometric block route renderer
//!
//! Builds a demo route from the configured scene settings and writes the
//! occlusion-ordered rendering to a PNG.

use std::time::Duration;

use isoroute_core::{BlockGroup, Color, Direction, Point3, Scene, SceneConfig};
use isoroute_render::RasterCanvas;

use isoroute::config::AppConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.debug.log_level),
    )
    .init();

    let canvas = RasterCanvas::new(config.canvas.width, config.canvas.height)
        .with_scale(config.canvas.scale);
    let [r, g, b] = config.scene.color;
    let mut scene = Scene::new(
        canvas,
        SceneConfig {
            rotation: config.scene.rotation,
            grid_size: config.scene.grid_size,
            delay: Duration::from_millis(config.scene.delay_ms),
            color: Color::new(r, g, b),
            ..SceneConfig::default()
        },
    );

    if config.scene.draw_grid {
        scene.draw_grid(config.scene.grid_size, false);
    }

    // A small route: a capped track, a corner, a climb, and a plateau.
    scene.set_origin(Point3::new(2.0, 2.0, 0.0));
    scene.add_track(4, Direction::X)?;
    scene.add_track(3, Direction::Y)?;
    scene.add_stairs(2, Direction::X, 4)?;
    scene.add_column(2, Direction::Up)?;
    scene.add_group(
        BlockGroup::track(scene.origin(), 3, Direction::Y)?
            .with_color(Color::new(160, 60, 50))
            .with_end_cap()?,
    );

    // Snap one more column under an existing anchor, if any matches.
    if let Some(anchor) = scene.equivalent_point(Point3::new(6.0, 2.0, 1.0)) {
        log::info!("snapping column to anchor {}", anchor);
        scene.add_group(BlockGroup::column(anchor, 2, Direction::Up)?);
    }

    let dispatched = scene.draw()?;
    // Deliver any staggered dispatches before writing the file.
    while scene.pending_dispatches() > 0 {
        scene.advance(Duration::from_millis(config.scene.delay_ms.max(1)));
    }
    log::info!("painted {} blocks", dispatched);

    scene
        .canvas_handle()
        .borrow()
        .save(&config.canvas.output)?;
    log::info!("wrote {}", config.canvas.output);
    Ok(())
}
