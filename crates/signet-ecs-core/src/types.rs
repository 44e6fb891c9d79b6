use core::fmt;

/// Number of distinct component types. Stays 64 because a signature is
/// exactly one 64-bit block.
pub const MAX_COMPONENTS: usize = 64;

/// Upper bound on simultaneously living entities. The entity pool is
/// pre-allocated with this many IDs unless configured smaller.
pub const MAX_ENTITIES: usize = 65535;

///
/// An entity is only an ID. Meaning comes from the components associated
/// with it.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

///
/// Runtime id of a registered component type. Component type `n` maps to
/// bit `n` of a [`Signature`](crate::Signature).
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentType(u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(usize);

impl Entity {
    /// Builds an entity from a raw ID. IDs not handed out by an engine are
    /// rejected by every engine operation.
    #[inline]
    pub fn from_raw(id: u32) -> Self {
        Entity(id)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ComponentType {
    pub(crate) fn new(index: usize) -> Self {
        assert!(index < MAX_COMPONENTS);

        ComponentType(index as u16)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SystemId {
    pub(crate) fn new(index: usize) -> Self {
        SystemId(index)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{ComponentType, Entity, MAX_COMPONENTS};

    #[test]
    fn entity_display_and_order() {
        let a = Entity::from_raw(3);
        let b = Entity::from_raw(10);

        assert_eq!(a.to_string(), "3");
        assert_eq!(a.index(), 3);
        assert!(a < b);
    }

    #[test]
    #[should_panic]
    fn component_type_out_of_range() {
        ComponentType::new(MAX_COMPONENTS);
    }
}
