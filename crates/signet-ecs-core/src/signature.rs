use core::fmt;

use fixedbitset::FixedBitSet;

use crate::types::{ComponentType, MAX_COMPONENTS};

///
/// Bitset naming the component types of an entity, or the component types a
/// system requires. Compatibility checks are a single subset test.
///
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature(FixedBitSet);

impl Signature {
    pub fn new() -> Self {
        Signature(FixedBitSet::with_capacity(MAX_COMPONENTS))
    }

    pub fn from_types(types: &[ComponentType]) -> Self {
        let mut signature = Self::new();

        for ty in types {
            signature.set(*ty, true);
        }

        signature
    }

    #[inline]
    pub fn set(&mut self, ty: ComponentType, enabled: bool) {
        self.0.set(ty.index(), enabled);
    }

    pub fn with(mut self, ty: ComponentType) -> Self {
        self.set(ty, true);
        self
    }

    #[inline]
    pub fn contains(&self, ty: ComponentType) -> bool {
        self.0.contains(ty.index())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.count_ones(..)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if every component type in `required` is also in `self`,
    /// i.e. `self & required == required`.
    #[inline]
    pub fn matches(&self, required: &Signature) -> bool {
        required.0.is_subset(&self.0)
    }

    pub fn types(&self) -> impl Iterator<Item=ComponentType> + '_ {
        self.0.ones().map(ComponentType::new)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::new()
    }
}

// most significant bit first, 64 characters
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..MAX_COMPONENTS).rev() {
            f.write_str(if self.0.contains(i) { "1" } else { "0" })?;
        }

        Ok(())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.ones()).finish()
    }
}
