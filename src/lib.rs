//!
//! Signature-based entity component system with a frame-driven app shell.
//!

pub mod core {
    pub use signet_ecs_core::*;
}

pub mod app {
    pub use signet_ecs_app::*;
}

pub mod prelude {
    pub use signet_ecs_core::prelude::*;
    pub use signet_ecs_app::prelude::*;
}
