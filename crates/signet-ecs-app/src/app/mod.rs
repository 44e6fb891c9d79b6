mod app;
mod config;
mod plugin;

pub use app::App;

pub use config::{
    AppConfig, WindowConfig,
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH,
};

pub use plugin::Plugin;
