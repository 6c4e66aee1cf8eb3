//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use isoroute::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("ISO_CANVAS__OUTPUT", "from-env.png");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.canvas.output, "from-env.png");
    std::env::remove_var("ISO_CANVAS__OUTPUT");
}

#[test]
#[serial]
fn test_nested_env_override() {
    std::env::set_var("ISO_SCENE__GRID_SIZE", "32");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.scene.grid_size, 32);
    std::env::remove_var("ISO_SCENE__GRID_SIZE");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("ISO_CANVAS__OUTPUT");
    let config = AppConfig::load().unwrap();
    // Values from config/default.toml.
    assert_eq!(config.canvas.width, 800);
    assert_eq!(config.scene.color, [59, 188, 188]);
}

#[test]
#[serial]
fn test_missing_directory_falls_back_to_defaults() {
    let config = AppConfig::load_from("no-such-config-dir").unwrap();
    assert_eq!(config.canvas.width, AppConfig::default().canvas.width);
}
