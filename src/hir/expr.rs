//! Expression nodes embedded in declarations.

use indexmap::IndexMap;
use std::sync::Arc;

use super::ids::{DeclId, ExprId};
use crate::base::SourceLocation;

/// A value-producing node.
#[derive(Clone, Debug)]
pub struct Expression {
    /// The declaration whose attributes contain this expression.
    pub parent_item: DeclId,
    pub location: Option<SourceLocation>,
    /// Set once by reference resolution; never overwritten.
    pub referenced: Option<DeclId>,
    pub kind: ExprKind,
}

/// The closed set of expression kinds.
#[derive(Clone, Debug)]
pub enum ExprKind {
    Literal(Arc<str>),
    List(Vec<ExprId>),
    Object(IndexMap<Arc<str>, ExprId>),
    /// `!Ref Name`
    Reference { name: Arc<str> },
    /// `!GetAtt Name.Attribute`
    GetAttribute {
        name: Arc<str>,
        attribute: Arc<str>,
    },
    /// `!Condition Name`
    ConditionReference { name: Arc<str> },
    /// `!FindInMap [ Map, TopLevelKey, SecondLevelKey ]`
    FindInMap {
        map_name: Arc<str>,
        top_level_key: ExprId,
        second_level_key: ExprId,
    },
}

/// Which binding rules apply to a reference-kind expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    Reference,
    GetAttribute,
    ConditionReference,
    FindInMap,
}

impl ExprKind {
    /// Direct children, in source order.
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::List(items) => items.clone(),
            ExprKind::Object(fields) => fields.values().copied().collect(),
            ExprKind::FindInMap {
                top_level_key,
                second_level_key,
                ..
            } => vec![*top_level_key, *second_level_key],
            ExprKind::Literal(_)
            | ExprKind::Reference { .. }
            | ExprKind::GetAttribute { .. }
            | ExprKind::ConditionReference { .. } => Vec::new(),
        }
    }

    /// The symbol a reference-kind expression names, with its rule set.
    pub fn reference(&self) -> Option<(ReferenceKind, &Arc<str>)> {
        match self {
            ExprKind::Reference { name } => Some((ReferenceKind::Reference, name)),
            ExprKind::GetAttribute { name, .. } => Some((ReferenceKind::GetAttribute, name)),
            ExprKind::ConditionReference { name } => {
                Some((ReferenceKind::ConditionReference, name))
            }
            ExprKind::FindInMap { map_name, .. } => Some((ReferenceKind::FindInMap, map_name)),
            ExprKind::Literal(_) | ExprKind::List(_) | ExprKind::Object(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            ExprKind::Literal(value) => Some(value),
            _ => None,
        }
    }
}
