//! Declaration nodes.

use indexmap::IndexSet;
use std::sync::Arc;

use super::ids::{DeclId, ExprId};
use crate::base::SourceLocation;
use crate::base::constants::{FUNCTION_RESOURCE_TYPE, NESTED_STACK_RESOURCE_TYPE};

/// A named, typed node of the module tree.
///
/// `parent`, `children`, and the dependency sets hold arena ids, never
/// owned nodes, so the dependency graph may cycle while the tree stays a tree.
#[derive(Clone, Debug)]
pub struct Declaration {
    /// Name relative to the parent.
    pub name: Arc<str>,
    /// Unique path from the module root, segments joined by `::`.
    pub full_name: Arc<str>,
    pub parent: Option<DeclId>,
    pub children: Vec<DeclId>,
    /// Required on every node but the root.
    pub location: Option<SourceLocation>,
    /// Populated by reference resolution.
    pub dependencies: IndexSet<Dependency>,
    /// Names that failed to resolve; reported, but not fatal.
    pub missing_dependencies: IndexSet<Arc<str>>,
    pub kind: DeclKind,
}

/// An edge from a declaration to something it depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub target: DeclId,
    pub origin: DependencyOrigin,
}

/// What introduced a dependency edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DependencyOrigin {
    /// A bound reference-kind expression.
    Expression(ExprId),
    /// An entry of a `DependsOn` list.
    DependsOn,
}

/// A resource declaration.
///
/// Either an external reference (`value` is set) or a managed instance
/// (`resource_type` is set and `value` is not).
#[derive(Clone, Debug, Default)]
pub struct ResourceDecl {
    pub resource_type: Option<Arc<str>>,
    pub value: Option<ExprId>,
    /// The `If` attribute.
    pub condition: Option<ExprId>,
    pub properties: Option<ExprId>,
    pub depends_on: Vec<Arc<str>>,
}

impl ResourceDecl {
    pub fn is_external_reference(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_managed_instance(&self) -> bool {
        self.value.is_none() && self.resource_type.is_some()
    }
}

/// The closed set of declaration kinds.
#[derive(Clone, Debug)]
pub enum DeclKind {
    /// The root of the tree.
    Module {
        version: Option<Arc<str>>,
        description: Option<Arc<str>>,
    },
    Parameter {
        parameter_type: Arc<str>,
        default: Option<Arc<str>>,
    },
    PseudoParameter {
        parameter_type: Arc<str>,
    },
    Variable {
        variable_type: Option<Arc<str>>,
        value: ExprId,
    },
    Resource(ResourceDecl),
    /// A custom resource type defined by the module.
    ResourceType {
        handler: Option<ExprId>,
        properties: Vec<Arc<str>>,
        attributes: Vec<Arc<str>>,
    },
    Condition {
        value: ExprId,
    },
    Mapping {
        value: ExprId,
    },
    Function {
        condition: Option<ExprId>,
        environment: Option<ExprId>,
        properties: Option<ExprId>,
    },
    Macro {
        handler: ExprId,
    },
    Import {
        module: Arc<str>,
    },
    Package {
        files: Arc<str>,
    },
    Group,
    NestedModule {
        module: Arc<str>,
        condition: Option<ExprId>,
        parameters: Option<ExprId>,
        depends_on: Vec<Arc<str>>,
    },
}

impl DeclKind {
    /// Human-readable kind name used in diagnostics and internal errors.
    pub fn display(&self) -> &'static str {
        match self {
            DeclKind::Module { .. } => "module",
            DeclKind::Parameter { .. } => "parameter",
            DeclKind::PseudoParameter { .. } => "pseudo-parameter",
            DeclKind::Variable { .. } => "variable",
            DeclKind::Resource(_) => "resource",
            DeclKind::ResourceType { .. } => "resource type",
            DeclKind::Condition { .. } => "condition",
            DeclKind::Mapping { .. } => "mapping",
            DeclKind::Function { .. } => "function",
            DeclKind::Macro { .. } => "macro",
            DeclKind::Import { .. } => "import",
            DeclKind::Package { .. } => "package",
            DeclKind::Group => "group",
            DeclKind::NestedModule { .. } => "nested module",
        }
    }

    /// Root expressions owned directly by this declaration.
    pub fn expression_roots(&self) -> Vec<ExprId> {
        match self {
            DeclKind::Variable { value, .. }
            | DeclKind::Condition { value }
            | DeclKind::Mapping { value } => vec![*value],
            DeclKind::Macro { handler } => vec![*handler],
            DeclKind::Resource(resource) => [resource.value, resource.condition, resource.properties]
                .into_iter()
                .flatten()
                .collect(),
            DeclKind::ResourceType { handler, .. } => handler.iter().copied().collect(),
            DeclKind::Function {
                condition,
                environment,
                properties,
            } => [*condition, *environment, *properties]
                .into_iter()
                .flatten()
                .collect(),
            DeclKind::NestedModule {
                condition,
                parameters,
                ..
            } => [*condition, *parameters].into_iter().flatten().collect(),
            DeclKind::Module { .. }
            | DeclKind::Parameter { .. }
            | DeclKind::PseudoParameter { .. }
            | DeclKind::Import { .. }
            | DeclKind::Package { .. }
            | DeclKind::Group => Vec::new(),
        }
    }

    /// Names listed under `DependsOn`.
    pub fn depends_on(&self) -> &[Arc<str>] {
        match self {
            DeclKind::Resource(resource) => &resource.depends_on,
            DeclKind::NestedModule { depends_on, .. } => depends_on,
            _ => &[],
        }
    }

    /// Whether this declaration becomes a resource in the compiled stack.
    ///
    /// External references only name an existing resource by ARN and are
    /// not provisioned.
    pub fn is_provisioned_instance(&self) -> bool {
        match self {
            DeclKind::Resource(resource) => resource.is_managed_instance(),
            DeclKind::Function { .. } | DeclKind::NestedModule { .. } => true,
            _ => false,
        }
    }

    /// The provider resource type this declaration compiles to, if known.
    pub fn stack_resource_type(&self) -> Option<&str> {
        match self {
            DeclKind::Resource(resource) if resource.is_managed_instance() => {
                resource.resource_type.as_deref()
            }
            DeclKind::Function { .. } => Some(FUNCTION_RESOURCE_TYPE),
            DeclKind::NestedModule { .. } => Some(NESTED_STACK_RESOURCE_TYPE),
            _ => None,
        }
    }
}

impl Declaration {
    pub fn is_condition(&self) -> bool {
        matches!(self.kind, DeclKind::Condition { .. })
    }

    pub fn as_resource(&self) -> Option<&ResourceDecl> {
        match &self.kind {
            DeclKind::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn as_resource_mut(&mut self) -> Option<&mut ResourceDecl> {
        match &mut self.kind {
            DeclKind::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Targets of `DependsOn` edges recorded by resolution, in insertion order.
    pub fn depends_on_targets(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.dependencies
            .iter()
            .filter(|dependency| dependency.origin == DependencyOrigin::DependsOn)
            .map(|dependency| dependency.target)
    }
}
