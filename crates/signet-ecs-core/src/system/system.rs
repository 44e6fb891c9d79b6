use std::any::type_name;

use downcast_rs::{impl_downcast, Downcast};

use crate::{engine::Engine, error::Result, types::Entity};

///
/// Logic that processes every entity whose signature matches the signature
/// registered for the system.
///
/// While `update` runs the system is lent out of the engine, so the engine
/// can be mutated freely, but the system itself can't be fetched from it.
///
pub trait System: Downcast {
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Called once per frame with a snapshot of the matching entities in
    /// ascending ID order.
    fn update(&mut self, _engine: &mut Engine, _entities: &[Entity]) -> Result<()> {
        Ok(())
    }
}
impl_downcast!(System);
