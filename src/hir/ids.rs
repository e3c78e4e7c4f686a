//! Arena identifiers.
//!
//! Both arenas are capped at `u32::MAX` entries; ids are never truncated.

/// Identifier of a declaration in a [`ModuleTree`](super::ModuleTree).
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(u32);

impl DeclId {
    /// Create a new DeclId from an arena index
    ///
    /// # Panics
    ///
    /// If `index` does not fit in a `u32`, like a `Vec` exceeding its capacity.
    pub fn new(index: usize) -> Self {
        match Self::try_new(index) {
            Some(id) => id,
            None => panic!("declaration arena index {index} exceeds u32::MAX"),
        }
    }

    /// Create a DeclId, or `None` when `index` does not fit in a `u32`.
    pub fn try_new(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifier of an expression in a [`ModuleTree`](super::ModuleTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprId(u32);

impl ExprId {
    /// # Panics
    ///
    /// If `index` does not fit in a `u32`.
    pub fn new(index: usize) -> Self {
        match Self::try_new(index) {
            Some(id) => id,
            None => panic!("expression arena index {index} exceeds u32::MAX"),
        }
    }

    pub fn try_new(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
