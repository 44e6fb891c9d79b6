//!
//! Signature-based entity component system.
//!
//! Entities are IDs, components are plain data stored densely per type and
//! systems receive every entity whose signature (its set of component
//! types) covers the system's signature.
//!

mod config;
mod engine;
mod signature;
mod types;
pub mod component;
pub mod entity;
pub mod error;
pub mod system;

pub use signet_ecs_core_macros::Component;

pub use component::Component;

pub use config::EngineConfig;

pub use engine::Engine;

pub use error::{Error, ErrorKind, Result};

pub use signature::Signature;

pub use system::System;

pub use types::{
    ComponentType, Entity, SystemId,
    MAX_COMPONENTS, MAX_ENTITIES,
};

pub mod prelude {
    pub use crate::{
        Component, Engine, EngineConfig, Entity, Signature, System,
    };
    pub use crate::error::{Error, ErrorKind, Result};
}
