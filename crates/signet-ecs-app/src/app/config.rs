use signet_ecs_core::{EngineConfig, MAX_ENTITIES};

pub const DEFAULT_WINDOW_WIDTH: u32 = 512;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 512;
pub const DEFAULT_WINDOW_TITLE: &str = "ECS Game";

///
/// Settings for the application window. The app itself never opens a
/// window, a presentation plugin reads these.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    window: WindowConfig,
    max_entities: usize,
    frame_limit: Option<u64>,
}

impl WindowConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_TITLE)
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            window: WindowConfig::default(),
            max_entities: MAX_ENTITIES,
            frame_limit: None,
        }
    }

    pub fn window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    pub fn max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Number of frames `App::run` executes. Without a limit `run` loops
    /// until a system fails.
    pub fn frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn get_window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn get_frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new().max_entities(self.max_entities)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
