//! Integrity Checker — tree-shape invariants.
//!
//! Guards against parser bugs, not user mistakes: every failure here is an
//! [`InternalError`] and analysis stops at the first one.

use rustc_hash::FxHashSet;

use super::ids::DeclId;
use super::tree::ModuleTree;
use crate::base::InternalError;

/// Validate that the declarations reachable from the root form a tree.
///
/// Checks, for every node:
/// - it is not reached again while it is still being visited
/// - it has a parent pointer (unless it is the root), and that pointer
///   names the node that contains it
/// - it has a source location (unless it is the root)
pub fn validate(tree: &ModuleTree) -> Result<(), InternalError> {
    let mut checker = IntegrityChecker {
        tree,
        open: FxHashSet::default(),
        visited: 0,
    };
    checker.visit(tree.root(), None)?;
    tracing::debug!(declarations = checker.visited, "declaration tree integrity verified");
    Ok(())
}

struct IntegrityChecker<'a> {
    tree: &'a ModuleTree,
    /// Nodes entered but not yet exited.
    open: FxHashSet<DeclId>,
    visited: usize,
}

impl IntegrityChecker<'_> {
    fn visit(&mut self, id: DeclId, container: Option<DeclId>) -> Result<(), InternalError> {
        let tree = self.tree;
        let decl = tree.get(id).ok_or(InternalError::UnknownNode {
            kind: "declaration",
            index: id.index(),
        })?;
        if !self.open.insert(id) {
            return Err(InternalError::TreeCycle(decl.full_name.to_string()));
        }
        self.visited += 1;

        if let Some(container) = container {
            match decl.parent {
                None => return Err(InternalError::MissingParent(decl.full_name.to_string())),
                Some(parent) if parent != container => {
                    return Err(InternalError::ParentMismatch {
                        name: decl.full_name.to_string(),
                        container: self.name_of(container),
                        parent: self.name_of(parent),
                    });
                }
                Some(_) => {}
            }
            if decl.location.is_none() {
                return Err(InternalError::MissingSourceLocation(
                    decl.full_name.to_string(),
                ));
            }
        }

        for child in &decl.children {
            self.visit(*child, Some(id))?;
        }
        self.open.remove(&id);
        Ok(())
    }

    fn name_of(&self, id: DeclId) -> String {
        self.tree
            .get(id)
            .map(|decl| decl.full_name.to_string())
            .unwrap_or_else(|| format!("#{}", id.index()))
    }
}
