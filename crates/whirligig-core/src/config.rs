use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Easing curve applied to transition progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end on the last frame
    None,
    Linear,
    /// Cubic ease-out
    #[default]
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Quadratic ease-in-out
    EaseInOut,
}

/// Navigation behaviour of a single track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Wrap past the last slide back to the first (and vice versa)
    #[serde(default)]
    pub infinite: bool,
    /// Realign to the nearest slide once interaction settles
    #[serde(default)]
    pub snap_to_slide: bool,
    #[serde(default)]
    pub prevent_auto_correct: bool,
    /// Disable native overflow scrolling of the track
    #[serde(default)]
    pub prevent_scroll: bool,
    #[serde(default)]
    pub prevent_swipe: bool,
    /// Transition duration in milliseconds (0 = jump)
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Key names that advance to the next slide
    #[serde(default = "default_next_keys")]
    pub next_keys: Vec<String>,
    /// Key names that go back to the previous slide
    #[serde(default = "default_prev_keys")]
    pub prev_keys: Vec<String>,
    /// Slides advanced per step (falls back to `visible_slides`)
    #[serde(default)]
    pub slide_by: Option<usize>,
    /// Slides shown per page (0 = unconstrained)
    #[serde(default)]
    pub visible_slides: usize,
    #[serde(default)]
    pub start_at: i64,
    /// Externally driven target index
    #[serde(default)]
    pub slide_to: Option<i64>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            infinite: false,
            snap_to_slide: false,
            prevent_auto_correct: false,
            prevent_scroll: false,
            prevent_swipe: false,
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            next_keys: default_next_keys(),
            prev_keys: default_prev_keys(),
            slide_by: None,
            visible_slides: 0,
            start_at: 0,
            slide_to: None,
        }
    }
}

impl CarouselConfig {
    /// Slides advanced per step: explicit `slide_by`, else `visible_slides`,
    /// else 0 (continuous stepping).
    pub fn effective_slide_by(&self) -> usize {
        match self.slide_by {
            Some(n) if n > 0 => n,
            _ => self.visible_slides,
        }
    }
}

/// Parameters of the terminal demo host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_slide_count")]
    pub slide_count: usize,
    /// Slide width in terminal columns
    #[serde(default = "default_slide_width")]
    pub slide_width: u16,
    #[serde(default = "default_gutter")]
    pub gutter: u16,
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a transition is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Columns moved per wheel notch or free-scroll key press
    #[serde(default = "default_scroll_step")]
    pub scroll_step: u16,
    /// Quiet period after which free scrolling counts as settled
    #[serde(default = "default_scroll_end_debounce")]
    pub scroll_end_debounce_ms: u64,
    /// Minimum horizontal drag (columns) recognised as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: u16,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            slide_count: default_slide_count(),
            slide_width: default_slide_width(),
            gutter: default_gutter(),
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            scroll_step: default_scroll_step(),
            scroll_end_debounce_ms: default_scroll_end_debounce(),
            swipe_threshold: default_swipe_threshold(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_animation_duration() -> u64 {
    500
}

fn default_next_keys() -> Vec<String> {
    vec!["ArrowRight".to_string()]
}

fn default_prev_keys() -> Vec<String> {
    vec!["ArrowLeft".to_string()]
}

fn default_slide_count() -> usize {
    8
}

fn default_slide_width() -> u16 {
    24
}

fn default_gutter() -> u16 {
    2
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_scroll_step() -> u16 {
    3
}

fn default_scroll_end_debounce() -> u64 {
    150
}

fn default_swipe_threshold() -> u16 {
    6
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/whirligig/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("whirligig")
            .join("config.toml")
    }
}
