use crate::{
    error::{Error, ErrorKind, Result},
    types::MAX_ENTITIES,
};

///
/// Construction parameters for an [`Engine`](crate::Engine).
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    max_entities: usize,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
        }
    }

    pub fn max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    pub fn get_max_entities(&self) -> usize {
        self.max_entities
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_entities == 0 || self.max_entities > MAX_ENTITIES {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                format!(
                    "max_entities must be between 1 and {}, got {}.",
                    MAX_ENTITIES,
                    self.max_entities
                )
            ));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
