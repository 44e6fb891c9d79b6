use std::any::type_name;
use std::collections::BTreeSet;

use log::debug;

use crate::{
    component::{Component, ComponentList, ComponentManager},
    config::EngineConfig,
    entity::EntityManager,
    error::Result,
    signature::Signature,
    system::{System, SystemManager},
    types::{ComponentType, Entity, SystemId},
};

///
/// Facade over the entity, component and system managers.
///
/// Every structural change goes through the engine so the three managers
/// stay consistent: adding or removing a component updates the entity's
/// signature and the entity sets of all systems.
///
pub struct Engine {
    entity_manager: EntityManager,
    component_manager: ComponentManager,
    system_manager: SystemManager,
}

impl Engine {
    pub fn new() -> Self {
        Self::from_managers(EntityManager::new())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let entity_manager = EntityManager::with_capacity(config.get_max_entities())?;

        Ok(Self::from_managers(entity_manager))
    }

    fn from_managers(entity_manager: EntityManager) -> Self {
        debug!("Engine instance created with capacity {}.", entity_manager.capacity());

        Self {
            entity_manager,
            component_manager: ComponentManager::new(),
            system_manager: SystemManager::new(),
        }
    }

    //
    // Entities
    //

    pub fn create_entity(&mut self) -> Result<Entity> {
        let entity = self.entity_manager.create()?;

        // systems with the empty signature accept component-less entities
        self.system_manager.entity_signature_changed(entity, &Signature::new());

        Ok(entity)
    }

    /// Destroys the entity and drops every component and system reference
    /// to it.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        self.entity_manager.destroy(entity)?;
        self.component_manager.entity_destroyed(entity);
        self.system_manager.entity_destroyed(entity);

        debug!("Engine destroyed entity {}.", entity);

        Ok(())
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entity_manager.is_alive(entity)
    }

    pub fn living_entities(&self) -> usize {
        self.entity_manager.living_count()
    }

    pub fn entity_capacity(&self) -> usize {
        self.entity_manager.capacity()
    }

    pub fn entity_signature(&self, entity: Entity) -> Result<Signature> {
        self.entity_manager.signature(entity)
    }

    //
    // Components
    //

    /// Registers a component type up front. Optional, since `add_component`
    /// registers unknown types itself.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentType> {
        let ty = self.component_manager.register::<T>()?;

        debug!("Engine registered component {}.", type_name::<T>());

        Ok(ty)
    }

    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<()> {
        self.entity_manager.check_alive(entity)?;

        let ty = self.component_manager.add(entity, component)?;

        self.set_signature_bit(entity, ty, true)?;

        debug!("Engine associated component {} to {}.", type_name::<T>(), entity);

        Ok(())
    }

    /// Removes the component and returns it.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T> {
        let component = self.component_manager.remove::<T>(entity)?;

        let ty = self.component_manager.component_type::<T>()?;

        self.set_signature_bit(entity, ty, false)?;

        debug!("Engine removed component {} from {}.", type_name::<T>(), entity);

        Ok(component)
    }

    /// False when `T` was never registered.
    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool> {
        let signature = self.entity_manager.signature(entity)?;

        let has = match self.component_manager.component_type::<T>() {
            Ok(ty) => signature.contains(ty),
            Err(_) => false,
        };

        debug!(
            "Engine checked if entity {} is associated to component {}. Result: {}.",
            entity, type_name::<T>(), has
        );

        Ok(has)
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T> {
        debug!("Engine retrieves component {} associated to entity {}.", type_name::<T>(), entity);

        self.component_manager.get::<T>(entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.component_manager.get_mut::<T>(entity)
    }

    pub fn component_type<T: Component>(&self) -> Result<ComponentType> {
        let ty = self.component_manager.component_type::<T>()?;

        debug!("Engine retrieved component type {} for component {}.", ty, type_name::<T>());

        Ok(ty)
    }

    /// All components of type `T` in storage order.
    pub fn components<T: Component>(&self) -> Result<&ComponentList<T>> {
        self.component_manager.list::<T>()
    }

    fn set_signature_bit(&mut self, entity: Entity, ty: ComponentType, enabled: bool) -> Result<()> {
        let mut signature = self.entity_manager.signature(entity)?;
        signature.set(ty, enabled);

        self.system_manager.entity_signature_changed(entity, &signature);
        self.entity_manager.set_signature(entity, signature)
    }

    //
    // Systems
    //

    pub fn register_system<T: System>(&mut self, system: T) -> Result<SystemId> {
        debug!("Engine registers system {}.", type_name::<T>());

        let id = self.system_manager.register(system)?;

        // the empty signature already matches every living entity
        self.reevaluate_system::<T>()?;

        Ok(id)
    }

    pub fn register_default_system<T: System + Default>(&mut self) -> Result<SystemId> {
        self.register_system(T::default())
    }

    /// Sets the component types `T` requires. Living entities that already
    /// match join the system immediately.
    pub fn set_system_signature<T: System>(&mut self, signature: Signature) -> Result<()> {
        debug!("Engine persisted signature {} for system {}.", signature, type_name::<T>());

        self.system_manager.set_signature::<T>(signature)?;

        self.reevaluate_system::<T>()
    }

    fn reevaluate_system<T: System>(&mut self) -> Result<()> {
        let mut signatures = Vec::with_capacity(self.entity_manager.living_count());

        for entity in self.entity_manager.living() {
            signatures.push((entity, self.entity_manager.signature(entity)?));
        }

        self.system_manager.reevaluate::<T>(signatures)
    }

    pub fn get_system<T: System>(&self) -> Result<&T> {
        self.system_manager.get::<T>()
    }

    pub fn get_system_mut<T: System>(&mut self) -> Result<&mut T> {
        self.system_manager.get_mut::<T>()
    }

    pub fn system_entities<T: System>(&self) -> Result<&BTreeSet<Entity>> {
        self.system_manager.entities::<T>()
    }

    pub fn system_count(&self) -> usize {
        self.system_manager.len()
    }

    pub fn update_system<T: System>(&mut self) -> Result<()> {
        let id = self.system_manager.system_id::<T>()?;

        self.run_system(id)
    }

    /// Runs every system once, in registration order. Stops at the first
    /// failing system.
    pub fn update(&mut self) -> Result<()> {
        let ids : Vec<SystemId> = self.system_manager.ids().collect();

        for id in ids {
            self.run_system(id)?;
        }

        Ok(())
    }

    fn run_system(&mut self, id: SystemId) -> Result<()> {
        let (mut system, entities) = self.system_manager.take(id)?;

        let name = system.name();
        let result = system.update(self, &entities);

        self.system_manager.restore(id, system);

        match result {
            Ok(()) => {
                debug!("Engine updated system {} with {} entities.", name, entities.len());
                Ok(())
            },
            Err(err) => Err(err.rethrow(name)),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        component::Component,
        config::EngineConfig,
        error::{Error, ErrorKind, Result},
        signature::Signature,
        system::System,
        types::Entity,
        util::test::TestValues,
    };

    use super::Engine;

    #[test]
    fn add_component_updates_signature() {
        let mut engine = small_engine();

        let entity = engine.create_entity().unwrap();
        engine.add_component(entity, Position(1, 2)).unwrap();
        engine.add_component(entity, Velocity(3)).unwrap();

        let pos = engine.component_type::<Position>().unwrap();
        let vel = engine.component_type::<Velocity>().unwrap();

        assert_eq!(engine.entity_signature(entity).unwrap(), Signature::from_types(&[pos, vel]));
        assert!(engine.has_component::<Position>(entity).unwrap());
        assert!(engine.has_component::<Velocity>(entity).unwrap());
        assert!(! engine.has_component::<Health>(entity).unwrap());

        assert_eq!(engine.remove_component::<Position>(entity).unwrap(), Position(1, 2));
        assert!(! engine.has_component::<Position>(entity).unwrap());
        assert_eq!(engine.entity_signature(entity).unwrap(), Signature::from_types(&[vel]));
    }

    #[test]
    fn get_component_mut() {
        let mut engine = small_engine();

        let entity = engine.create_entity().unwrap();
        engine.add_component(entity, Health(10)).unwrap();

        engine.get_component_mut::<Health>(entity).unwrap().0 -= 3;

        assert_eq!(engine.get_component::<Health>(entity).unwrap(), &Health(7));
    }

    #[test]
    fn dead_entity_rejects_components() {
        let mut engine = small_engine();

        let err = engine.add_component(Entity::from_raw(2), Health(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityNotAlive);

        let err = engine.add_component(Entity::from_raw(99), Health(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityOutOfBounds);
    }

    #[test]
    fn register_component_explicitly() {
        let mut engine = small_engine();

        let ty = engine.register_component::<f32>().unwrap();
        assert_eq!(engine.register_component::<f32>().unwrap(), ty);
        assert_eq!(engine.component_type::<f32>().unwrap(), ty);

        let err = engine.component_type::<f64>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnregisteredComponent);
    }

    #[test]
    fn destroy_clears_everything() {
        let mut engine = small_engine();

        engine.register_system(Movement::default()).unwrap();

        let a = engine.create_entity().unwrap();
        engine.add_component(a, Position(0, 0)).unwrap();
        engine.add_component(a, Velocity(1)).unwrap();

        let movement = Signature::new()
            .with(engine.component_type::<Position>().unwrap())
            .with(engine.component_type::<Velocity>().unwrap());
        engine.set_system_signature::<Movement>(movement).unwrap();

        assert_eq!(engine.system_entities::<Movement>().unwrap().len(), 1);

        engine.destroy_entity(a).unwrap();

        assert!(! engine.is_alive(a));
        assert_eq!(engine.living_entities(), 0);
        assert!(engine.system_entities::<Movement>().unwrap().is_empty());
        assert_eq!(engine.components::<Position>().unwrap().len(), 0);
        assert!(engine.entity_signature(a).unwrap().is_empty());

        assert_eq!(engine.destroy_entity(a).unwrap_err().kind(), ErrorKind::EntityNotAlive);
    }

    #[test]
    fn system_tracks_matching_entities() {
        let mut engine = small_engine();

        engine.register_default_system::<Movement>().unwrap();

        let a = engine.create_entity().unwrap();
        let b = engine.create_entity().unwrap();

        engine.add_component(a, Position(0, 0)).unwrap();
        engine.add_component(b, Position(5, 5)).unwrap();
        engine.add_component(b, Velocity(2)).unwrap();

        // a and b existed before the signature was set
        let movement = Signature::new()
            .with(engine.component_type::<Position>().unwrap())
            .with(engine.component_type::<Velocity>().unwrap());
        engine.set_system_signature::<Movement>(movement).unwrap();

        assert_eq!(entities::<Movement>(&engine), "1");

        engine.add_component(a, Velocity(1)).unwrap();
        assert_eq!(entities::<Movement>(&engine), "0, 1");

        engine.remove_component::<Velocity>(b).unwrap();
        assert_eq!(entities::<Movement>(&engine), "0");
    }

    #[test]
    fn empty_signature_sees_every_living_entity() {
        let mut engine = small_engine();

        let before = engine.create_entity().unwrap();
        engine.register_default_system::<Movement>().unwrap();
        let after = engine.create_entity().unwrap();

        assert_eq!(entities::<Movement>(&engine), format!("{}, {}", before, after));

        engine.destroy_entity(before).unwrap();
        assert_eq!(entities::<Movement>(&engine), format!("{}", after));

        // a recycled id joins again on creation
        let mut ids = Vec::new();
        while let Ok(entity) = engine.create_entity() {
            ids.push(entity);
        }
        assert!(ids.contains(&before));
        assert!(engine.system_entities::<Movement>().unwrap().contains(&before));
        assert_eq!(engine.system_entities::<Movement>().unwrap().len(), 16);
    }

    #[test]
    fn update_runs_systems_in_order() {
        let mut engine = small_engine();
        let mut values = TestValues::new();

        engine.register_system(Logger::new("first", values.clone())).unwrap();
        engine.register_system(Other(Logger::new("second", values.clone()))).unwrap();

        let a = engine.create_entity().unwrap();
        engine.add_component(a, Health(1)).unwrap();

        engine.update().unwrap();
        assert_eq!(values.take(), "first 0, second 0");

        engine.update_system::<Other>().unwrap();
        assert_eq!(values.take(), "second 0");

        engine.destroy_entity(a).unwrap();
        engine.update().unwrap();
        assert_eq!(values.take(), "");
    }

    #[test]
    fn system_mutates_engine() {
        let mut engine = small_engine();

        engine.register_default_system::<Movement>().unwrap();

        let a = engine.create_entity().unwrap();
        engine.add_component(a, Position(0, 0)).unwrap();
        engine.add_component(a, Velocity(3)).unwrap();

        let movement = Signature::new()
            .with(engine.component_type::<Position>().unwrap())
            .with(engine.component_type::<Velocity>().unwrap());
        engine.set_system_signature::<Movement>(movement).unwrap();

        engine.update().unwrap();
        engine.update().unwrap();

        assert_eq!(engine.get_component::<Position>(a).unwrap(), &Position(6, 6));
        assert_eq!(engine.get_system::<Movement>().unwrap().ticks, 2);
    }

    #[test]
    fn system_error_stops_update() {
        let mut engine = small_engine();
        let mut values = TestValues::new();

        engine.register_default_system::<Failing>().unwrap();
        engine.register_system(Logger::new("after", values.clone())).unwrap();

        let err = engine.update().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(err.message().starts_with("failing system"));
        assert_eq!(values.take(), "");

        // the failing system is back in place
        assert!(engine.get_system::<Failing>().is_ok());
    }

    #[test]
    fn system_cannot_fetch_itself() {
        let mut engine = small_engine();

        engine.register_default_system::<SelfFetch>().unwrap();
        engine.update().unwrap();

        assert_eq!(engine.get_system::<SelfFetch>().unwrap().seen, Some(ErrorKind::SystemInUse));
    }

    #[test]
    fn with_config() {
        let engine = Engine::with_config(EngineConfig::new().max_entities(3)).unwrap();
        assert_eq!(engine.entity_capacity(), 3);

        let err = Engine::with_config(EngineConfig::new().max_entities(0)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    fn small_engine() -> Engine {
        let _ = env_logger::builder().is_test(true).try_init();

        Engine::with_config(EngineConfig::new().max_entities(16)).unwrap()
    }

    fn entities<T: System>(engine: &Engine) -> String {
        engine.system_entities::<T>().unwrap()
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    }

    #[derive(Debug, PartialEq)]
    struct Position(i32, i32);

    impl Component for Position {}

    #[derive(Debug, PartialEq)]
    struct Velocity(i32);

    impl Component for Velocity {}

    #[derive(Debug, PartialEq)]
    struct Health(u32);

    impl Component for Health {}

    #[derive(Debug, Default)]
    struct Movement {
        ticks: usize,
    }

    impl System for Movement {
        fn update(&mut self, engine: &mut Engine, entities: &[Entity]) -> Result<()> {
            for entity in entities {
                let velocity = engine.get_component::<Velocity>(*entity)?.0;
                let position = engine.get_component_mut::<Position>(*entity)?;

                position.0 += velocity;
                position.1 += velocity;
            }

            self.ticks += 1;

            Ok(())
        }
    }

    struct Logger {
        label: &'static str,
        values: TestValues,
    }

    impl Logger {
        fn new(label: &'static str, values: TestValues) -> Self {
            Self { label, values }
        }
    }

    impl System for Logger {
        fn update(&mut self, _engine: &mut Engine, entities: &[Entity]) -> Result<()> {
            for entity in entities {
                self.values.push(format!("{} {}", self.label, entity));
            }

            Ok(())
        }
    }

    struct Other(Logger);

    impl System for Other {
        fn update(&mut self, engine: &mut Engine, entities: &[Entity]) -> Result<()> {
            self.0.update(engine, entities)
        }
    }

    #[derive(Debug, Default)]
    struct Failing;

    impl System for Failing {
        fn update(&mut self, _engine: &mut Engine, _entities: &[Entity]) -> Result<()> {
            Err(Error::from("failing system"))
        }
    }

    #[derive(Debug, Default)]
    struct SelfFetch {
        seen: Option<ErrorKind>,
    }

    impl System for SelfFetch {
        fn update(&mut self, engine: &mut Engine, _entities: &[Entity]) -> Result<()> {
            self.seen = engine.get_system::<SelfFetch>().err().map(|e| e.kind());

            Ok(())
        }
    }
}
