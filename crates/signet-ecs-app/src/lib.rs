mod app;

pub use crate::app::*;

pub mod prelude {
    pub use crate::app::{
        App, AppConfig, WindowConfig,
        Plugin,
    };
}
