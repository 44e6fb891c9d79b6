use core::fmt;
use std::any::type_name;
use std::collections::HashMap;

use downcast_rs::{impl_downcast, Downcast};
use log::debug;

use crate::{error::{Error, ErrorKind, Result}, types::Entity};

use super::Component;

///
/// Common interface over all component lists, so lists of different
/// component types share a single container in the component manager.
///
pub trait ComponentStore: Downcast {
    fn type_name(&self) -> &'static str;

    fn len(&self) -> usize;

    fn contains(&self, entity: Entity) -> bool;

    /// Drops the entity's component if there is one. Entities without a
    /// component in this list are ignored.
    fn entity_destroyed(&mut self, entity: Entity);
}
impl_downcast!(ComponentStore);

///
/// Stores the components of type `T` densely packed.
///
/// Removal moves the last component into the freed slot, so the live
/// components always occupy `0..len`.
///
pub struct ComponentList<T: Component> {
    components: Vec<T>,

    // index -> entity, parallel to components
    entities: Vec<Entity>,

    entity_to_index: HashMap<Entity, usize>,
}

impl<T: Component> ComponentList<T> {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entities: Vec::new(),
            entity_to_index: HashMap::new(),
        }
    }

    pub fn insert(&mut self, entity: Entity, component: T) -> Result<()> {
        if self.entity_to_index.contains_key(&entity) {
            return Err(Error::new(
                ErrorKind::DuplicateComponent,
                format!("Tried to insert duplicate entity {} in {} list", entity, type_name::<T>())
            ));
        }

        let index = self.components.len();

        self.components.push(component);
        self.entities.push(entity);
        self.entity_to_index.insert(entity, index);

        debug!("Component list inserted component {} for entity {}.", type_name::<T>(), entity);

        Ok(())
    }

    pub fn remove(&mut self, entity: Entity) -> Result<T> {
        let Some(index) = self.entity_to_index.remove(&entity) else {
            return Err(Error::new(
                ErrorKind::MissingComponent,
                format!("Tried to remove entity {} which is not in {} list", entity, type_name::<T>())
            ));
        };

        let component = self.components.swap_remove(index);
        self.entities.swap_remove(index);

        // the former last entity now lives at index
        if index < self.entities.len() {
            let moved = self.entities[index];
            self.entity_to_index.insert(moved, index);
        }

        debug!("Component list removed component {} for entity {}.", type_name::<T>(), entity);

        Ok(component)
    }

    pub fn get(&self, entity: Entity) -> Result<&T> {
        match self.entity_to_index.get(&entity) {
            Some(index) => Ok(&self.components[*index]),
            None => Err(self.missing(entity)),
        }
    }

    pub fn get_mut(&mut self, entity: Entity) -> Result<&mut T> {
        match self.entity_to_index.get(&entity) {
            Some(index) => Ok(&mut self.components[*index]),
            None => Err(self.missing(entity)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Entities in storage order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Components in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.components
    }

    pub fn iter(&self) -> impl Iterator<Item=(Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item=(Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }

    fn missing(&self, entity: Entity) -> Error {
        Error::new(
            ErrorKind::MissingComponent,
            format!("Tried to get entity {} which is not in {} list", entity, type_name::<T>())
        )
    }
}

impl<T: Component> ComponentStore for ComponentList<T> {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    fn entity_destroyed(&mut self, entity: Entity) {
        if self.entity_to_index.contains_key(&entity) && self.remove(entity).is_ok() {
            debug!("Component list {} removed entity {}.", type_name::<T>(), entity);
        }
    }
}

impl<T: Component> Default for ComponentList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> fmt::Debug for ComponentList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentList")
         .field("type", &type_name::<T>())
         .field("len", &self.len())
         .finish()
    }
}
