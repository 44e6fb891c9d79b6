use std::any::{type_name, TypeId};
use std::collections::HashMap;

use log::{debug, info, warn};

use crate::{
    error::{Error, ErrorKind, Result},
    types::{ComponentType, Entity, MAX_COMPONENTS},
};

use super::{Component, ComponentList, ComponentStore};

///
/// Owns one component list per registered component type and maps each
/// Rust type to its runtime `ComponentType`.
///
/// The `ComponentType` of a type doubles as the index of its list.
///
pub struct ComponentManager {
    component_map: HashMap<TypeId, ComponentType>,
    lists: Vec<Box<dyn ComponentStore>>,
}

impl ComponentManager {
    pub fn new() -> Self {
        Self {
            component_map: HashMap::new(),
            lists: Vec::new(),
        }
    }

    /// Registers `T`. Registering a type twice only logs a warning.
    pub fn register<T: Component>(&mut self) -> Result<ComponentType> {
        if let Some(ty) = self.component_map.get(&TypeId::of::<T>()) {
            warn!(
                "Tried to register component {} which is already registered. \
                Consider removing register_component calls and use add_component directly instead.",
                type_name::<T>()
            );

            return Ok(*ty);
        }

        if self.lists.len() >= MAX_COMPONENTS {
            return Err(Error::new(
                ErrorKind::TooManyComponents,
                format!(
                    "Cannot register component {}, the maximum of {} component types is reached.",
                    type_name::<T>(),
                    MAX_COMPONENTS
                )
            ));
        }

        let ty = ComponentType::new(self.lists.len());

        self.lists.push(Box::new(ComponentList::<T>::new()));
        self.component_map.insert(TypeId::of::<T>(), ty);

        debug!("Component manager registered component {} as {}.", type_name::<T>(), ty);

        Ok(ty)
    }

    /// Adds the component to the entity, registering `T` first if needed.
    pub fn add<T: Component>(&mut self, entity: Entity, component: T) -> Result<ComponentType> {
        if ! self.is_registered::<T>() {
            info!(
                "Tried associating component {} to entity {} but component wasn't \
                registered before. Registering component now.",
                type_name::<T>(),
                entity
            );
        }

        let ty = self.register_quiet::<T>()?;

        self.list_mut::<T>()?.insert(entity, component)?;

        debug!("Component manager added component {} to entity {}.", type_name::<T>(), entity);

        Ok(ty)
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<T> {
        let component = self.list_mut::<T>()?.remove(entity)?;

        debug!("Component manager removed component {} from entity {}.", type_name::<T>(), entity);

        Ok(component)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.list::<T>()?.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.list_mut::<T>()?.get_mut(entity)
    }

    pub fn component_type<T: Component>(&self) -> Result<ComponentType> {
        match self.component_map.get(&TypeId::of::<T>()) {
            Some(ty) => Ok(*ty),
            None => Err(unregistered::<T>()),
        }
    }

    pub fn is_registered<T: Component>(&self) -> bool {
        self.component_map.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list<T: Component>(&self) -> Result<&ComponentList<T>> {
        let ty = self.component_type::<T>()?;

        self.lists[ty.index()]
            .downcast_ref::<ComponentList<T>>()
            .ok_or_else(|| unregistered::<T>())
    }

    pub(crate) fn list_mut<T: Component>(&mut self) -> Result<&mut ComponentList<T>> {
        let ty = self.component_type::<T>()?;

        self.lists[ty.index()]
            .downcast_mut::<ComponentList<T>>()
            .ok_or_else(|| unregistered::<T>())
    }

    /// Removes the entity's components from every list that holds one.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for list in &mut self.lists {
            list.entity_destroyed(entity);
        }

        debug!(
            "Component manager removed entity {} from all component lists it was associated to.",
            entity
        );
    }

    fn register_quiet<T: Component>(&mut self) -> Result<ComponentType> {
        match self.component_map.get(&TypeId::of::<T>()) {
            Some(ty) => Ok(*ty),
            None => self.register::<T>(),
        }
    }
}

impl Default for ComponentManager {
    fn default() -> Self {
        Self::new()
    }
}

fn unregistered<T>() -> Error {
    Error::new(
        ErrorKind::UnregisteredComponent,
        format!(
            "Component {} is not registered. Try associating the component to an entity \
            first using add_component.",
            type_name::<T>()
        )
    )
}
