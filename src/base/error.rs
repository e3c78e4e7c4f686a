//! Internal-consistency failures.
//!
//! These are never caused by a user's module definition. They signal a bug
//! in an upstream collaborator (parser, provider specification) and abort
//! the whole compilation.

use thiserror::Error;

/// A fatal failure that aborts analysis immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    /// A declaration was reached again while it was still being visited.
    #[error("declaration tree contains a cycle through '{0}'")]
    TreeCycle(String),

    /// A non-root declaration has no parent pointer.
    #[error("declaration '{0}' has no parent")]
    MissingParent(String),

    /// A declaration's parent pointer disagrees with the node containing it.
    #[error("declaration '{name}' is contained by '{container}' but its parent is '{parent}'")]
    ParentMismatch {
        name: String,
        container: String,
        parent: String,
    },

    /// A declaration has no source location.
    #[error("declaration '{0}' has no source location")]
    MissingSourceLocation(String),

    /// An id does not belong to the tree it was used with.
    #[error("unknown {kind} id {index}")]
    UnknownNode { kind: &'static str, index: usize },

    /// The provider specification names a complex type it does not define.
    #[error("complex type '{type_name}' of resource type '{resource_type}' is not in the specification")]
    UnresolvedComplexType {
        resource_type: String,
        type_name: String,
    },

    /// A nested type was requested from a property that is not complex.
    #[error("property '{0}' does not have a complex item type")]
    NotComplexType(String),

    /// `Json` used as the item type of a list or map.
    #[error("property '{0}' uses Json as a collection item type")]
    JsonCollectionItem(String),

    /// A property entry declares neither a primitive nor a complex type.
    #[error("property '{0}' has neither a primitive nor a complex type")]
    MissingItemType(String),

    /// A primitive type tag outside the known set.
    #[error("property '{property}' has unknown primitive type '{tag}'")]
    UnknownPrimitiveType { property: String, tag: String },

    /// A declaration kind that cannot appear where it was found.
    #[error("unexpected {kind} declaration '{name}'")]
    UnexpectedDeclarationKind { kind: &'static str, name: String },
}
