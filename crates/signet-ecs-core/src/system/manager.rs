use std::any::{type_name, TypeId};
use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::{
    error::{Error, ErrorKind, Result},
    signature::Signature,
    types::{Entity, SystemId},
};

use super::System;

///
/// Owns the registered systems together with their signatures and the sets
/// of entities compatible with them.
///
/// Systems are kept in registration order, which is also the update order.
///
pub struct SystemManager {
    system_map: HashMap<TypeId, SystemId>,
    systems: Vec<SystemItem>,
}

struct SystemItem {
    name: &'static str,

    // None while the system is lent out for its update
    system: Option<Box<dyn System>>,

    signature: Signature,

    entities: BTreeSet<Entity>,
}

impl SystemManager {
    pub fn new() -> Self {
        Self {
            system_map: HashMap::new(),
            systems: Vec::new(),
        }
    }

    pub fn register<T: System>(&mut self, system: T) -> Result<SystemId> {
        let type_id = TypeId::of::<T>();

        if self.system_map.contains_key(&type_id) {
            return Err(Error::new(
                ErrorKind::DuplicateSystem,
                format!("Tried to register a system {} which is already registered.", type_name::<T>())
            ));
        }

        let id = SystemId::new(self.systems.len());

        self.systems.push(SystemItem {
            name: type_name::<T>(),
            system: Some(Box::new(system)),
            signature: Signature::new(),
            entities: BTreeSet::new(),
        });
        self.system_map.insert(type_id, id);

        debug!("System manager registered system {}.", type_name::<T>());

        Ok(id)
    }

    pub fn system_id<T: System>(&self) -> Result<SystemId> {
        match self.system_map.get(&TypeId::of::<T>()) {
            Some(id) => Ok(*id),
            None => Err(Error::new(
                ErrorKind::UnregisteredSystem,
                format!("System {} is not registered.", type_name::<T>())
            )),
        }
    }

    pub fn set_signature<T: System>(&mut self, signature: Signature) -> Result<()> {
        let id = self.system_id::<T>()?;

        debug!("System manager set signature {} to system {}.", signature, type_name::<T>());

        self.systems[id.index()].signature = signature;

        Ok(())
    }

    pub fn signature<T: System>(&self) -> Result<&Signature> {
        let id = self.system_id::<T>()?;

        Ok(&self.systems[id.index()].signature)
    }

    pub fn get<T: System>(&self) -> Result<&T> {
        let id = self.system_id::<T>()?;

        debug!("System manager retrieves system {}.", type_name::<T>());

        match &self.systems[id.index()].system {
            Some(system) => system.downcast_ref::<T>().ok_or_else(|| in_use::<T>()),
            None => Err(in_use::<T>()),
        }
    }

    pub fn get_mut<T: System>(&mut self) -> Result<&mut T> {
        let id = self.system_id::<T>()?;

        debug!("System manager retrieves system {}.", type_name::<T>());

        match &mut self.systems[id.index()].system {
            Some(system) => system.downcast_mut::<T>().ok_or_else(|| in_use::<T>()),
            None => Err(in_use::<T>()),
        }
    }

    pub fn entities<T: System>(&self) -> Result<&BTreeSet<Entity>> {
        let id = self.system_id::<T>()?;

        Ok(&self.systems[id.index()].entities)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn entity_destroyed(&mut self, entity: Entity) {
        for item in &mut self.systems {
            if item.entities.remove(&entity) {
                debug!("System manager erased entity {} from system {}.", entity, item.name);
            }
        }

        debug!("System manager erased entity {} from all systems it was associated to.", entity);
    }

    /// Adds the entity to every system whose signature it matches and
    /// removes it from all others.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: &Signature) {
        for item in &mut self.systems {
            if signature.matches(&item.signature) {
                if item.entities.insert(entity) {
                    debug!(
                        "System manager added entity {} to system {} because of updated signature.",
                        entity, item.name
                    );
                }
            } else if item.entities.remove(&entity) {
                debug!(
                    "System manager removed entity {} from system {} because of updated signature.",
                    entity, item.name
                );
            }
        }

        debug!("System manager updated all systems based on entity {} signature change.", entity);
    }

    /// Rebuilds the entity set of `T` from the given entity signatures.
    pub fn reevaluate<T: System>(
        &mut self,
        signatures: impl IntoIterator<Item=(Entity, Signature)>
    ) -> Result<()> {
        let id = self.system_id::<T>()?;
        let item = &mut self.systems[id.index()];

        item.entities.clear();

        for (entity, signature) in signatures {
            if signature.matches(&item.signature) {
                item.entities.insert(entity);
            }
        }

        debug!("System manager re-evaluated {} entities for system {}.", item.entities.len(), item.name);

        Ok(())
    }

    /// Lends the system out for its update. Must be paired with `restore`.
    pub(crate) fn take(&mut self, id: SystemId) -> Result<(Box<dyn System>, Vec<Entity>)> {
        let item = &mut self.systems[id.index()];

        match item.system.take() {
            Some(system) => Ok((system, item.entities.iter().copied().collect())),
            None => Err(Error::new(
                ErrorKind::SystemInUse,
                format!("System {} is already running.", item.name)
            )),
        }
    }

    pub(crate) fn restore(&mut self, id: SystemId, system: Box<dyn System>) {
        let item = &mut self.systems[id.index()];

        assert!(item.system.is_none());

        item.system = Some(system);
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item=SystemId> {
        (0..self.systems.len()).map(SystemId::new)
    }
}

impl Default for SystemManager {
    fn default() -> Self {
        Self::new()
    }
}

fn in_use<T>() -> Error {
    Error::new(
        ErrorKind::SystemInUse,
        format!("System {} is running its update and can't be borrowed.", type_name::<T>())
    )
}
