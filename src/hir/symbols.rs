//! Symbol Table — full name → declaration lookup.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::diagnostics::DiagnosticCollector;
use super::ids::DeclId;
use super::tree::ModuleTree;

/// Global lookup of every declaration below the module root.
///
/// Holds ids only; the tree stays the owner of its declarations.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    by_full_name: FxHashMap<Arc<str>, DeclId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every declaration reachable from the root.
    ///
    /// A full name declared twice is reported and the first declaration
    /// is kept.
    pub fn build(tree: &ModuleTree, diagnostics: &mut DiagnosticCollector) -> Self {
        let mut table = Self::new();
        for id in tree.walk() {
            if id == tree.root() {
                continue;
            }
            let decl = &tree[id];
            if let Err(existing) = table.insert(decl.full_name.clone(), id) {
                diagnostics.duplicate_declaration(
                    decl.location.as_ref(),
                    &decl.full_name,
                    tree[existing].location.as_ref(),
                );
            }
        }
        tracing::debug!(symbols = table.len(), "built symbol table");
        table
    }

    /// Insert a declaration; returns the existing id if the name is taken.
    pub fn insert(&mut self, full_name: Arc<str>, id: DeclId) -> Result<(), DeclId> {
        match self.by_full_name.get(&full_name) {
            Some(existing) => Err(*existing),
            None => {
                self.by_full_name.insert(full_name, id);
                Ok(())
            }
        }
    }

    pub fn try_get_item(&self, full_name: &str) -> Option<DeclId> {
        self.by_full_name.get(full_name).copied()
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.by_full_name.contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.by_full_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_full_name.is_empty()
    }
}
