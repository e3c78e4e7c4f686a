//! Reference Resolver — binding pass.
//!
//! Binds every `!Ref`, `!GetAtt`, `!Condition`, and `!FindInMap` expression
//! and every `DependsOn` entry to the declaration its name denotes. What a
//! name may denote depends on the reference kind and on whether it appears
//! inside a Condition:
//!
//! | kind        | inside a Condition        | elsewhere                                  |
//! |-------------|---------------------------|--------------------------------------------|
//! | `!Ref`      | parameter only            | not condition/mapping/resource type/group  |
//! | `!GetAtt`   | always reported           | provisioned resource                       |
//! | `!Condition`| condition                 | condition                                  |
//! | `!FindInMap`| mapping                   | mapping                                    |
//! | `DependsOn` | —                         | provisioned resource                       |
//!
//! A name that is not declared is reported and recorded as a missing
//! dependency of the enclosing declaration. A name of the wrong kind is
//! reported and left unbound. Nothing here aborts analysis except an
//! [`InternalError`].

use std::sync::Arc;

use super::decl::{DeclKind, Dependency, DependencyOrigin};
use super::diagnostics::{DiagnosticCollector, codes};
use super::expr::{ExprKind, ReferenceKind};
use super::ids::{DeclId, ExprId};
use super::options::AnalysisOptions;
use super::symbols::SymbolTable;
use super::tree::ModuleTree;
use crate::base::constants::NESTED_STACK_OUTPUT_PREFIX;
use crate::base::{InternalError, SourceLocation};
use crate::types::TypeDirectory;

/// Counters reported when binding finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindingStats {
    pub bound: usize,
    pub already_bound: usize,
    pub rejected: usize,
    pub undefined: usize,
}

/// Binds references of one module against its symbol table.
pub struct ReferenceResolver<'a> {
    symbols: &'a SymbolTable,
    directory: &'a TypeDirectory,
    options: &'a AnalysisOptions,
    diagnostics: &'a mut DiagnosticCollector,
    stats: BindingStats,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        directory: &'a TypeDirectory,
        options: &'a AnalysisOptions,
        diagnostics: &'a mut DiagnosticCollector,
    ) -> Self {
        Self {
            symbols,
            directory,
            options,
            diagnostics,
            stats: BindingStats::default(),
        }
    }

    /// Bind every reference in the tree.
    ///
    /// Expressions bound by an earlier run keep their target; dependency
    /// edges are sets, so re-running adds nothing.
    pub fn bind(&mut self, tree: &mut ModuleTree) -> Result<BindingStats, InternalError> {
        for id in tree.walk() {
            let roots = tree[id].kind.expression_roots();
            for root in roots {
                for expr in tree.expression_descendants(root) {
                    self.bind_expression(tree, id, expr)?;
                }
            }
            let depends_on = tree[id].kind.depends_on().to_vec();
            for name in depends_on {
                self.bind_depends_on(tree, id, &name)?;
            }
        }
        tracing::debug!(
            bound = self.stats.bound,
            already_bound = self.stats.already_bound,
            rejected = self.stats.rejected,
            undefined = self.stats.undefined,
            "bound references"
        );
        Ok(self.stats)
    }

    fn bind_expression(
        &mut self,
        tree: &mut ModuleTree,
        item: DeclId,
        expr: ExprId,
    ) -> Result<(), InternalError> {
        let Some((kind, name)) = tree[expr]
            .kind
            .reference()
            .map(|(kind, name)| (kind, name.clone()))
        else {
            return Ok(());
        };
        let location = tree.location_of(expr).cloned();
        let in_condition = tree[item].is_condition();

        // logged on every run, bound or not
        if kind == ReferenceKind::GetAttribute && in_condition {
            self.diagnostics.invalid_reference(
                location.as_ref(),
                format!("!GetAtt '{name}' cannot be used inside a Condition"),
            );
        }
        if tree[expr].referenced.is_some() {
            self.stats.already_bound += 1;
            return Ok(());
        }

        let Some(target) = self.lookup(tree, item, &name, location.as_ref()) else {
            return Ok(());
        };
        let target_kind = &tree[target].kind;

        let rejection = match kind {
            ReferenceKind::Reference => {
                if reference_allowed(target_kind, in_condition, &tree[target].full_name)? {
                    None
                } else if in_condition {
                    Some(format!("'{name}' must be a parameter"))
                } else {
                    Some(format!("'{name}' must be a resource, parameter, or variable"))
                }
            }
            ReferenceKind::GetAttribute => {
                if !provisioned_instance(target_kind, &tree[target].full_name)? {
                    Some(format!("'{name}' must be a CloudFormation stack resource"))
                } else {
                    let ExprKind::GetAttribute { attribute, .. } = &tree[expr].kind else {
                        return Ok(());
                    };
                    self.check_attribute(tree, target, &name, attribute)?
                }
            }
            ReferenceKind::ConditionReference => {
                if is_kind(target_kind, &tree[target].full_name, |k| {
                    matches!(k, DeclKind::Condition { .. })
                })? {
                    None
                } else {
                    Some(format!("'{name}' must refer to a Condition"))
                }
            }
            ReferenceKind::FindInMap => {
                if is_kind(target_kind, &tree[target].full_name, |k| {
                    matches!(k, DeclKind::Mapping { .. })
                })? {
                    None
                } else {
                    Some(format!("'{name}' must refer to a Mapping"))
                }
            }
        };

        match rejection {
            Some(message) => {
                self.stats.rejected += 1;
                self.diagnostics.invalid_reference(location.as_ref(), message);
            }
            None => {
                tracing::trace!(
                    from = %tree[item].full_name,
                    to = %tree[target].full_name,
                    ?kind,
                    "bound reference"
                );
                self.stats.bound += 1;
                tree[expr].referenced = Some(target);
                tree[item].dependencies.insert(Dependency {
                    target,
                    origin: DependencyOrigin::Expression(expr),
                });
            }
        }
        Ok(())
    }

    fn bind_depends_on(
        &mut self,
        tree: &mut ModuleTree,
        item: DeclId,
        name: &Arc<str>,
    ) -> Result<(), InternalError> {
        let location = tree[item].location.clone();
        let Some(target) = self.lookup(tree, item, name, location.as_ref()) else {
            return Ok(());
        };
        if provisioned_instance(&tree[target].kind, &tree[target].full_name)? {
            self.stats.bound += 1;
            tree[item].dependencies.insert(Dependency {
                target,
                origin: DependencyOrigin::DependsOn,
            });
        } else {
            self.stats.rejected += 1;
            self.diagnostics.invalid_reference(
                location.as_ref(),
                format!("'{name}' must be a CloudFormation stack resource"),
            );
        }
        Ok(())
    }

    /// Look up `name`, reporting it and recording a missing dependency when
    /// it is not declared.
    fn lookup(
        &mut self,
        tree: &mut ModuleTree,
        item: DeclId,
        name: &Arc<str>,
        location: Option<&SourceLocation>,
    ) -> Option<DeclId> {
        let found = self.symbols.try_get_item(name);
        if found.is_none() {
            self.stats.undefined += 1;
            self.diagnostics.undefined_reference(location, name);
            tree[item].missing_dependencies.insert(name.clone());
        }
        found
    }

    /// Returns a rejection message when the attribute does not exist on the
    /// target's resource type.
    fn check_attribute(
        &self,
        tree: &ModuleTree,
        target: DeclId,
        name: &str,
        attribute: &str,
    ) -> Result<Option<String>, InternalError> {
        if !self.options.check_attribute_names {
            return Ok(None);
        }
        if matches!(tree[target].kind, DeclKind::NestedModule { .. })
            && attribute.starts_with(NESTED_STACK_OUTPUT_PREFIX)
        {
            // outputs are declared by the nested module, not the provider
            return Ok(None);
        }
        let Some(resource_type) = tree[target].kind.stack_resource_type() else {
            return Ok(None);
        };
        let known = if let Some(descriptor) = self.directory.try_resolve(resource_type) {
            descriptor.try_get_attribute(attribute)?.is_some()
        } else {
            match self
                .symbols
                .try_get_item(resource_type)
                .map(|id| &tree[id].kind)
            {
                Some(DeclKind::ResourceType { attributes, .. }) => {
                    attributes.iter().any(|a| &**a == attribute)
                }
                // unknown types are reported by the resource validator
                _ => true,
            }
        };
        if known {
            Ok(None)
        } else {
            Ok(Some(format!(
                "'{name}' of type '{resource_type}' does not have attribute '{attribute}'"
            )))
        }
    }
}

/// Whether `!Ref` may denote a declaration of this kind.
fn reference_allowed(
    kind: &DeclKind,
    in_condition: bool,
    full_name: &str,
) -> Result<bool, InternalError> {
    Ok(match kind {
        DeclKind::Parameter { .. } | DeclKind::PseudoParameter { .. } => true,
        DeclKind::Condition { .. }
        | DeclKind::Mapping { .. }
        | DeclKind::ResourceType { .. }
        | DeclKind::Group => false,
        DeclKind::Variable { .. }
        | DeclKind::Resource(_)
        | DeclKind::Function { .. }
        | DeclKind::Macro { .. }
        | DeclKind::Import { .. }
        | DeclKind::Package { .. }
        | DeclKind::NestedModule { .. } => !in_condition,
        DeclKind::Module { .. } => return Err(unexpected(kind, full_name)),
    })
}

/// Whether a declaration becomes a resource of the compiled stack.
fn provisioned_instance(kind: &DeclKind, full_name: &str) -> Result<bool, InternalError> {
    match kind {
        DeclKind::Module { .. } => Err(unexpected(kind, full_name)),
        _ => Ok(kind.is_provisioned_instance()),
    }
}

fn is_kind(
    kind: &DeclKind,
    full_name: &str,
    predicate: impl Fn(&DeclKind) -> bool,
) -> Result<bool, InternalError> {
    match kind {
        DeclKind::Module { .. } => Err(unexpected(kind, full_name)),
        _ => Ok(predicate(kind)),
    }
}

fn unexpected(kind: &DeclKind, full_name: &str) -> InternalError {
    InternalError::UnexpectedDeclarationKind {
        kind: kind.display(),
        name: full_name.to_string(),
    }
}
