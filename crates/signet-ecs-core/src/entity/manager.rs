use concurrent_queue::ConcurrentQueue;
use fixedbitset::FixedBitSet;
use log::debug;

use crate::{
    config::EngineConfig,
    error::{Error, ErrorKind, Result},
    signature::Signature,
    types::{Entity, MAX_ENTITIES},
};

///
/// Hands out entity IDs and keeps the signature of every entity.
///
/// All IDs are queued up front so creating an entity never allocates.
/// Destroyed IDs go to the back of the queue, so an ID is reused only
/// after every other free ID has been handed out.
///
pub struct EntityManager {
    capacity: usize,

    available: ConcurrentQueue<Entity>,

    living: FixedBitSet,

    // grows on demand up to capacity, unused slots are empty signatures
    signatures: Vec<Signature>,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::allocate(MAX_ENTITIES)
    }

    /// Error `InvalidConfig` unless `capacity` is in `1..=MAX_ENTITIES`.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        EngineConfig::new().max_entities(capacity).validate()?;

        Ok(Self::allocate(capacity))
    }

    fn allocate(capacity: usize) -> Self {
        let available = ConcurrentQueue::bounded(capacity);

        for id in 0..capacity {
            let pushed = available.push(Entity::from_raw(id as u32));
            debug_assert!(pushed.is_ok());
        }

        debug!("Entity manager pre-allocated {} entities.", capacity);

        Self {
            capacity,
            available,
            living: FixedBitSet::with_capacity(capacity),
            signatures: Vec::new(),
        }
    }

    pub fn create(&mut self) -> Result<Entity> {
        let entity = match self.available.pop() {
            Ok(entity) => entity,
            Err(_) => {
                return Err(Error::new(
                    ErrorKind::TooManyEntities,
                    format!(
                        "Maximum number of living entities {} exceeded, you may want to \
                        increase the entity capacity.",
                        self.capacity
                    )
                ));
            }
        };

        self.living.insert(entity.index());

        debug!("Entity manager created entity {}.", entity);

        Ok(entity)
    }

    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        self.check_alive(entity)?;

        if let Some(signature) = self.signatures.get_mut(entity.index()) {
            signature.clear();
        }

        self.living.set(entity.index(), false);

        if let Err(err) = self.available.push(entity) {
            return Err(Error::other(err.to_string()));
        }

        debug!("Entity manager deleted entity {}.", entity);

        Ok(())
    }

    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        self.check_bounds(entity)?;

        let index = entity.index();

        if self.signatures.len() <= index {
            self.signatures.resize(index + 1, Signature::new());
        }

        debug!("Entity manager persisted signature {} for entity {}.", signature, entity);

        self.signatures[index] = signature;

        Ok(())
    }

    pub fn signature(&self, entity: Entity) -> Result<Signature> {
        self.check_bounds(entity)?;

        let signature = match self.signatures.get(entity.index()) {
            Some(signature) => signature.clone(),
            None => Signature::new(),
        };

        debug!("Entity manager retrieved signature {} for entity {}.", signature, entity);

        Ok(signature)
    }

    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.living.contains(entity.index())
    }

    pub fn living_count(&self) -> usize {
        self.living.count_ones(..)
    }

    /// Living entities in ascending ID order.
    pub fn living(&self) -> impl Iterator<Item=Entity> + '_ {
        self.living.ones().map(|index| Entity::from_raw(index as u32))
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn check_alive(&self, entity: Entity) -> Result<()> {
        self.check_bounds(entity)?;

        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::EntityNotAlive,
                format!("The entity {} is not alive.", entity)
            ))
        }
    }

    fn check_bounds(&self, entity: Entity) -> Result<()> {
        if entity.index() < self.capacity {
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::EntityOutOfBounds,
                format!(
                    "The entity {} exceeds the maximum number of entities {}.",
                    entity,
                    self.capacity
                )
            ))
        }
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
