//! The declaration arena.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use super::decl::{DeclKind, Declaration};
use super::expr::{ExprKind, Expression};
use super::ids::{DeclId, ExprId};
use crate::base::SourceLocation;
use crate::base::constants::FULL_NAME_SEPARATOR;

/// A module definition as produced by the parser.
///
/// Declarations and expressions live in two arenas. Containment is recorded
/// through `children` lists; every other link (`parent`, `referenced`,
/// dependency edges) is a plain id.
#[derive(Clone, Debug)]
pub struct ModuleTree {
    declarations: Vec<Declaration>,
    expressions: Vec<Expression>,
    root: DeclId,
}

impl ModuleTree {
    /// Create a tree holding only the root module declaration.
    pub fn new(name: impl Into<Arc<str>>, location: Option<SourceLocation>) -> Self {
        let name = name.into();
        let root = Declaration {
            full_name: name.clone(),
            name,
            parent: None,
            children: Vec::new(),
            location,
            dependencies: IndexSet::new(),
            missing_dependencies: IndexSet::new(),
            kind: DeclKind::Module {
                version: None,
                description: None,
            },
        };
        Self {
            declarations: vec![root],
            expressions: Vec::new(),
            root: DeclId::new(0),
        }
    }

    pub fn root(&self) -> DeclId {
        self.root
    }

    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.declarations.get(id.index())
    }

    pub fn get_mut(&mut self, id: DeclId) -> Option<&mut Declaration> {
        self.declarations.get_mut(id.index())
    }

    pub fn expr(&self, id: ExprId) -> Option<&Expression> {
        self.expressions.get(id.index())
    }

    pub fn expr_mut(&mut self, id: ExprId) -> Option<&mut Expression> {
        self.expressions.get_mut(id.index())
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    pub fn expression_count(&self) -> usize {
        self.expressions.len()
    }

    /// All declarations in arena (creation) order.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(index, decl)| (DeclId::new(index), decl))
    }

    /// Add a declaration under `parent`.
    ///
    /// Expressions named by `kind` (and their descendants) are adopted: their
    /// `parent_item` is set to the new declaration.
    pub fn add_declaration(
        &mut self,
        parent: DeclId,
        name: impl Into<Arc<str>>,
        location: Option<SourceLocation>,
        kind: DeclKind,
    ) -> DeclId {
        let name = name.into();
        let full_name: Arc<str> = if parent == self.root {
            name.clone()
        } else {
            Arc::from(format!(
                "{}{}{}",
                self[parent].full_name, FULL_NAME_SEPARATOR, name
            ))
        };
        let id = DeclId::new(self.declarations.len());
        let roots = kind.expression_roots();
        self.declarations.push(Declaration {
            name,
            full_name,
            parent: Some(parent),
            children: Vec::new(),
            location,
            dependencies: IndexSet::new(),
            missing_dependencies: IndexSet::new(),
            kind,
        });
        self[parent].children.push(id);
        for root in roots {
            self.adopt_expression(root, id);
        }
        id
    }

    /// Add an expression. It is owned by the module root until a declaration
    /// naming it is added.
    pub fn add_expression(&mut self, kind: ExprKind, location: Option<SourceLocation>) -> ExprId {
        let id = ExprId::new(self.expressions.len());
        self.expressions.push(Expression {
            parent_item: self.root,
            location,
            referenced: None,
            kind,
        });
        id
    }

    /// Add an expression already owned by `parent_item`.
    pub fn add_owned_expression(
        &mut self,
        parent_item: DeclId,
        kind: ExprKind,
        location: Option<SourceLocation>,
    ) -> ExprId {
        let id = self.add_expression(kind, location);
        self.adopt_expression(id, parent_item);
        id
    }

    fn adopt_expression(&mut self, root: ExprId, owner: DeclId) {
        for id in self.expression_descendants(root) {
            self[id].parent_item = owner;
        }
    }

    /// `root` and every expression beneath it, in pre-order.
    pub fn expression_descendants(&self, root: ExprId) -> Vec<ExprId> {
        let mut result = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(expr) = self.expr(id) else {
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            result.push(id);
            stack.extend(expr.kind.children().into_iter().rev());
        }
        result
    }

    /// Declarations reachable from the root, in pre-order.
    ///
    /// Nodes reached twice are only yielded once, so this terminates even on
    /// a malformed tree; run the integrity check to reject those.
    pub fn walk(&self) -> Vec<DeclId> {
        let mut result = Vec::with_capacity(self.declarations.len());
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(decl) = self.get(id) else {
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            result.push(id);
            stack.extend(decl.children.iter().rev().copied());
        }
        result
    }

    /// The location to report diagnostics about `id` at.
    pub fn location_of(&self, id: ExprId) -> Option<&SourceLocation> {
        let expr = self.expr(id)?;
        expr.location
            .as_ref()
            .or_else(|| self.get(expr.parent_item)?.location.as_ref())
    }

    /// Keys of an object expression, if `id` is one.
    pub fn object_fields(&self, id: ExprId) -> Option<&IndexMap<Arc<str>, ExprId>> {
        match &self.expr(id)?.kind {
            ExprKind::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl Index<DeclId> for ModuleTree {
    type Output = Declaration;

    fn index(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.index()]
    }
}

impl IndexMut<DeclId> for ModuleTree {
    fn index_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.declarations[id.index()]
    }
}

impl Index<ExprId> for ModuleTree {
    type Output = Expression;

    fn index(&self, id: ExprId) -> &Expression {
        &self.expressions[id.index()]
    }
}

impl IndexMut<ExprId> for ModuleTree {
    fn index_mut(&mut self, id: ExprId) -> &mut Expression {
        &mut self.expressions[id.index()]
    }
}
