//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ISO_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Output canvas configuration
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneSettings,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ISO_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // ISO_CANVAS__WIDTH=1024 -> canvas.width = 1024
        figment = figment.merge(Env::prefixed("ISO_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Output canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Pixel size of one world unit
    pub scale: f64,
    /// Output PNG path
    pub output: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale: 28.0,
            output: "isoroute.png".to_string(),
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Grid extent (also the rotation pivot)
    pub grid_size: u32,
    /// Initial rotation in radians
    pub rotation: f64,
    /// Delay between staggered draw dispatches, in milliseconds
    pub delay_ms: u64,
    /// Default structure color [r, g, b]
    pub color: [u8; 3],
    /// Whether to paint the ground grid
    pub draw_grid: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            grid_size: 16,
            rotation: 0.0,
            delay_ms: 0,
            color: [59, 188, 188],
            draw_grid: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.scene.grid_size, 16);
        assert_eq!(config.scene.color, [59, 188, 188]);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("width"));
        assert!(toml.contains("grid_size"));
        assert!(toml.contains("log_level"));
    }
}
