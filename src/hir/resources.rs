//! Resource Declaration Validator.
//!
//! Classifies every resource declaration as an external reference (`Value`)
//! or a managed instance (`Type`), reports attribute combinations that are
//! not allowed, and fills in defaults in place:
//!
//! ```text
//! Value set          → If/Properties forbidden, Value must be ARN-shaped,
//!                      Type defaults to "List" or "String"
//! Type set (only)    → Properties defaults to {}
//! neither            → missing 'Type'
//! ```

use std::sync::Arc;

use super::decl::{DeclKind, ResourceDecl};
use super::diagnostics::{DiagnosticCollector, codes};
use super::expr::ExprKind;
use super::ids::{DeclId, ExprId};
use super::options::AnalysisOptions;
use super::symbols::SymbolTable;
use super::tree::ModuleTree;
use crate::base::constants::{ARN_WILDCARD, LIST_VALUE_TYPE, SCALAR_VALUE_TYPE};
use crate::base::{InternalError, SourceLocation};
use crate::types::{CollectionKind, ItemKind, PropertyContainer, PropertyTypeDescriptor, TypeDirectory};

/// Whether `value` looks like `arn:{partition}:{service}:{region}:{account}:{resource}`.
pub fn is_arn(value: &str) -> bool {
    value.starts_with("arn:") && value.splitn(6, ':').count() == 6
}

/// Visits every resource declaration of a module.
pub struct ResourceValidator<'a> {
    directory: &'a TypeDirectory,
    symbols: &'a SymbolTable,
    options: &'a AnalysisOptions,
    diagnostics: &'a mut DiagnosticCollector,
}

impl<'a> ResourceValidator<'a> {
    pub fn new(
        directory: &'a TypeDirectory,
        symbols: &'a SymbolTable,
        options: &'a AnalysisOptions,
        diagnostics: &'a mut DiagnosticCollector,
    ) -> Self {
        Self {
            directory,
            symbols,
            options,
            diagnostics,
        }
    }

    /// Validate and default every resource declaration reachable from the root.
    pub fn process(&mut self, tree: &mut ModuleTree) -> Result<(), InternalError> {
        let before = self.diagnostics.len();
        let mut resources = 0;
        for id in tree.walk() {
            let Some(resource) = tree[id].as_resource().cloned() else {
                continue;
            };
            resources += 1;
            self.process_resource(tree, id, resource)?;
        }
        tracing::debug!(
            resources,
            diagnostics = self.diagnostics.len() - before,
            "validated resource declarations"
        );
        Ok(())
    }

    fn process_resource(
        &mut self,
        tree: &mut ModuleTree,
        id: DeclId,
        resource: ResourceDecl,
    ) -> Result<(), InternalError> {
        let location = tree[id].location.clone();
        if let Some(value) = resource.value {
            if resource.condition.is_some() {
                self.diagnostics
                    .conflicting_attribute(location.as_ref(), "If", "Value");
            }
            if resource.properties.is_some() {
                self.diagnostics
                    .conflicting_attribute(location.as_ref(), "Properties", "Value");
            }
            self.check_external_value(tree, value);
            if resource.resource_type.is_none() {
                let default_type = match tree[value].kind {
                    ExprKind::List(_) => LIST_VALUE_TYPE,
                    _ => SCALAR_VALUE_TYPE,
                };
                if let Some(resource) = tree[id].as_resource_mut() {
                    resource.resource_type = Some(Arc::from(default_type));
                }
            }
        } else if let Some(resource_type) = resource.resource_type {
            let properties = match resource.properties {
                Some(properties) => properties,
                None => {
                    let empty = tree.add_owned_expression(
                        id,
                        ExprKind::Object(Default::default()),
                        location.clone(),
                    );
                    if let Some(resource) = tree[id].as_resource_mut() {
                        resource.properties = Some(empty);
                    }
                    empty
                }
            };
            if self.options.check_resource_properties {
                self.check_managed_type(tree, location.as_ref(), &resource_type, properties)?;
            }
        } else {
            self.diagnostics.missing_attribute(location.as_ref(), "Type");
        }
        Ok(())
    }

    /// `Value` is one ARN-shaped item, or a list of them.
    fn check_external_value(&mut self, tree: &ModuleTree, value: ExprId) {
        match &tree[value].kind {
            ExprKind::List(items) => {
                for item in items {
                    self.check_arn(tree, *item);
                }
            }
            _ => self.check_arn(tree, value),
        }
    }

    fn check_arn(&mut self, tree: &ModuleTree, id: ExprId) {
        let valid = match &tree[id].kind {
            ExprKind::Literal(value) => &**value == ARN_WILDCARD || is_arn(value),
            // resolved when the stack is deployed
            ExprKind::Reference { .. }
            | ExprKind::GetAttribute { .. }
            | ExprKind::FindInMap { .. } => true,
            ExprKind::List(_) | ExprKind::Object(_) | ExprKind::ConditionReference { .. } => false,
        };
        if !valid {
            self.diagnostics.log(
                tree.location_of(id),
                codes::INVALID_ARN,
                "'Value' must be an ARN or '*'".to_string(),
            );
        }
    }

    fn check_managed_type(
        &mut self,
        tree: &ModuleTree,
        location: Option<&SourceLocation>,
        resource_type: &str,
        properties: ExprId,
    ) -> Result<(), InternalError> {
        if self.directory.is_custom_type(resource_type) {
            return Ok(());
        }
        if let Some(descriptor) = self.directory.try_resolve(resource_type) {
            return self.check_object(tree, properties, &descriptor);
        }
        match self
            .symbols
            .try_get_item(resource_type)
            .map(|id| &tree[id].kind)
        {
            Some(DeclKind::ResourceType {
                properties: declared,
                ..
            }) => {
                if let Some(fields) = tree.object_fields(properties) {
                    for (key, value) in fields {
                        if !declared.contains(key) {
                            self.unknown_property(tree, *value, resource_type, key);
                        }
                    }
                }
            }
            _ => self.diagnostics.log(
                location,
                codes::INVALID_TYPE,
                format!("unknown resource type '{resource_type}'"),
            ),
        }
        Ok(())
    }

    /// Check the keys of an object expression against a typed container.
    ///
    /// Anything other than a literal object (e.g. a `!Ref`) is only known at
    /// deployment time and is skipped.
    fn check_object(
        &mut self,
        tree: &ModuleTree,
        object: ExprId,
        container: &dyn PropertyContainer,
    ) -> Result<(), InternalError> {
        let Some(fields) = tree.object_fields(object) else {
            return Ok(());
        };
        for (key, value) in fields {
            match container.try_get_property(key)? {
                Some(property) => self.check_value(tree, *value, &property)?,
                None => self.unknown_property(tree, *value, container.container_name(), key),
            }
        }
        for required in container.required_properties() {
            if !fields.contains_key(required) {
                self.diagnostics.log(
                    tree.location_of(object),
                    codes::MISSING_REQUIRED_PROPERTY,
                    format!(
                        "missing required property '{required}' for '{}'",
                        container.container_name()
                    ),
                );
            }
        }
        Ok(())
    }

    fn check_value(
        &mut self,
        tree: &ModuleTree,
        value: ExprId,
        property: &PropertyTypeDescriptor,
    ) -> Result<(), InternalError> {
        if property.item() != ItemKind::Complex {
            return Ok(());
        }
        match (property.collection(), &tree[value].kind) {
            (CollectionKind::None, ExprKind::Object(_)) => {
                self.check_object(tree, value, property.nested_type()?)?;
            }
            (CollectionKind::List, ExprKind::List(items)) => {
                for item in items {
                    self.check_object(tree, *item, property.nested_type()?)?;
                }
            }
            (CollectionKind::Map, ExprKind::Object(entries)) => {
                for entry in entries.values() {
                    self.check_object(tree, *entry, property.nested_type()?)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn unknown_property(&mut self, tree: &ModuleTree, value: ExprId, owner: &str, key: &str) {
        self.diagnostics.log(
            tree.location_of(value),
            codes::UNKNOWN_PROPERTY,
            format!("unknown property '{key}' for '{owner}'"),
        );
    }
}
