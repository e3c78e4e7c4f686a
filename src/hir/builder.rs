//! Programmatic construction of module trees.
//!
//! The parser front-end is a separate component; this builder produces the
//! same shape it does (parent pointers, full names, source locations) for
//! hosts that assemble modules in code and for tests. Each declaration is
//! placed on its own line of a synthetic source file.

use std::sync::Arc;

use super::decl::{DeclKind, ResourceDecl};
use super::expr::ExprKind;
use super::ids::{DeclId, ExprId};
use super::tree::ModuleTree;
use crate::base::SourceLocation;
use crate::base::constants::PSEUDO_PARAMETERS;

/// An owned expression description, lowered into the arena on declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(String),
    List(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Ref(String),
    GetAtt(String, String),
    Condition(String),
    FindInMap(String, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn lit(value: impl Into<String>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Expr>) -> Self {
        Expr::List(items.into_iter().collect())
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Expr)>) -> Self {
        Expr::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Expr::Ref(name.into())
    }

    pub fn get_att(name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Expr::GetAtt(name.into(), attribute.into())
    }

    pub fn condition(name: impl Into<String>) -> Self {
        Expr::Condition(name.into())
    }

    pub fn find_in_map(map_name: impl Into<String>, top: Expr, second: Expr) -> Self {
        Expr::FindInMap(map_name.into(), Box::new(top), Box::new(second))
    }
}

/// Attributes of a resource declaration.
#[derive(Clone, Debug, Default)]
pub struct Resource {
    resource_type: Option<String>,
    value: Option<Expr>,
    condition: Option<Expr>,
    properties: Option<Expr>,
    depends_on: Vec<String>,
}

impl Resource {
    /// A resource the module provisions.
    pub fn managed(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: Some(resource_type.into()),
            ..Self::default()
        }
    }

    /// A reference to an existing resource by ARN.
    pub fn external(value: Expr) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// A resource with neither `Type` nor `Value`.
    pub fn untyped() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_properties(mut self, properties: Expr) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_condition(mut self, condition: Expr) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn depends_on<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.depends_on = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Builds a [`ModuleTree`] one declaration at a time.
pub struct ModuleBuilder {
    tree: ModuleTree,
    file: Arc<str>,
    line: u32,
    scopes: Vec<DeclId>,
}

impl ModuleBuilder {
    pub fn new(module_name: impl Into<Arc<str>>) -> Self {
        Self::in_file(module_name, "Module.yml")
    }

    pub fn in_file(module_name: impl Into<Arc<str>>, file: impl Into<Arc<str>>) -> Self {
        let file = file.into();
        let tree = ModuleTree::new(
            module_name,
            Some(SourceLocation::from_coords(file.clone(), 1, 1, 1, 1)),
        );
        let root = tree.root();
        Self {
            tree,
            file,
            line: 1,
            scopes: vec![root],
        }
    }

    /// Declare the standard pseudo-parameters at the module root.
    pub fn with_pseudo_parameters(mut self) -> Self {
        let root = self.tree.root();
        for (name, parameter_type) in PSEUDO_PARAMETERS {
            self.line += 1;
            let location = self.location_at(self.line);
            self.tree.add_declaration(
                root,
                *name,
                Some(location),
                DeclKind::PseudoParameter {
                    parameter_type: Arc::from(*parameter_type),
                },
            );
        }
        self
    }

    pub fn parameter(&mut self, name: &str, parameter_type: &str) -> DeclId {
        self.declare(
            name,
            DeclKind::Parameter {
                parameter_type: Arc::from(parameter_type),
                default: None,
            },
        )
    }

    pub fn variable(&mut self, name: &str, value: Expr) -> DeclId {
        let value = self.lower(&value);
        self.declare(
            name,
            DeclKind::Variable {
                variable_type: None,
                value,
            },
        )
    }

    pub fn resource(&mut self, name: &str, resource: Resource) -> DeclId {
        let value = resource.value.as_ref().map(|expr| self.lower(expr));
        let condition = resource.condition.as_ref().map(|expr| self.lower(expr));
        let properties = resource.properties.as_ref().map(|expr| self.lower(expr));
        self.declare(
            name,
            DeclKind::Resource(ResourceDecl {
                resource_type: resource.resource_type.map(Arc::from),
                value,
                condition,
                properties,
                depends_on: resource.depends_on.into_iter().map(Arc::from).collect(),
            }),
        )
    }

    pub fn resource_type(&mut self, name: &str, properties: &[&str], attributes: &[&str]) -> DeclId {
        self.declare(
            name,
            DeclKind::ResourceType {
                handler: None,
                properties: properties.iter().map(|p| Arc::from(*p)).collect(),
                attributes: attributes.iter().map(|a| Arc::from(*a)).collect(),
            },
        )
    }

    pub fn condition(&mut self, name: &str, value: Expr) -> DeclId {
        let value = self.lower(&value);
        self.declare(name, DeclKind::Condition { value })
    }

    pub fn mapping(&mut self, name: &str, value: Expr) -> DeclId {
        let value = self.lower(&value);
        self.declare(name, DeclKind::Mapping { value })
    }

    pub fn function(&mut self, name: &str, environment: Option<Expr>) -> DeclId {
        let environment = environment.as_ref().map(|expr| self.lower(expr));
        self.declare(
            name,
            DeclKind::Function {
                condition: None,
                environment,
                properties: None,
            },
        )
    }

    pub fn macro_decl(&mut self, name: &str, handler: Expr) -> DeclId {
        let handler = self.lower(&handler);
        self.declare(name, DeclKind::Macro { handler })
    }

    pub fn import(&mut self, name: &str, module: &str) -> DeclId {
        self.declare(
            name,
            DeclKind::Import {
                module: Arc::from(module),
            },
        )
    }

    pub fn package(&mut self, name: &str, files: &str) -> DeclId {
        self.declare(
            name,
            DeclKind::Package {
                files: Arc::from(files),
            },
        )
    }

    pub fn nested_module(&mut self, name: &str, module: &str, depends_on: &[&str]) -> DeclId {
        self.declare(
            name,
            DeclKind::NestedModule {
                module: Arc::from(module),
                condition: None,
                parameters: None,
                depends_on: depends_on.iter().map(|d| Arc::from(*d)).collect(),
            },
        )
    }

    /// Open a group; subsequent declarations are nested in it until
    /// [`end_group`](Self::end_group).
    pub fn begin_group(&mut self, name: &str) -> DeclId {
        let id = self.declare(name, DeclKind::Group);
        self.scopes.push(id);
        id
    }

    pub fn end_group(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn tree(&self) -> &ModuleTree {
        &self.tree
    }

    pub fn finish(self) -> ModuleTree {
        self.tree
    }

    fn declare(&mut self, name: &str, kind: DeclKind) -> DeclId {
        let parent = self.scopes.last().copied().unwrap_or(self.tree.root());
        self.line += 1;
        let location = self.location_at(self.line);
        self.tree.add_declaration(parent, name, Some(location), kind)
    }

    /// Expressions share the line of the declaration they are lowered for.
    fn lower(&mut self, expr: &Expr) -> ExprId {
        let location = Some(self.location_at(self.line + 1));
        let kind = match expr {
            Expr::Literal(value) => ExprKind::Literal(Arc::from(value.as_str())),
            Expr::List(items) => ExprKind::List(items.iter().map(|item| self.lower(item)).collect()),
            Expr::Object(fields) => ExprKind::Object(
                fields
                    .iter()
                    .map(|(key, value)| (Arc::from(key.as_str()), self.lower(value)))
                    .collect(),
            ),
            Expr::Ref(name) => ExprKind::Reference {
                name: Arc::from(name.as_str()),
            },
            Expr::GetAtt(name, attribute) => ExprKind::GetAttribute {
                name: Arc::from(name.as_str()),
                attribute: Arc::from(attribute.as_str()),
            },
            Expr::Condition(name) => ExprKind::ConditionReference {
                name: Arc::from(name.as_str()),
            },
            Expr::FindInMap(map_name, top, second) => {
                let top_level_key = self.lower(top);
                let second_level_key = self.lower(second);
                ExprKind::FindInMap {
                    map_name: Arc::from(map_name.as_str()),
                    top_level_key,
                    second_level_key,
                }
            }
        };
        self.tree.add_expression(kind, location)
    }

    fn location_at(&self, line: u32) -> SourceLocation {
        SourceLocation::from_coords(self.file.clone(), line, 1, line, 1)
    }
}
