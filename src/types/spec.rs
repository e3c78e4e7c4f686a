//! Provider resource-type specification.
//!
//! This is the raw data the [`TypeDirectory`](super::TypeDirectory) is backed
//! by: resource types with their properties and attributes, and the named
//! complex property types they refer to. Field names follow the provider's
//! PascalCase JSON document so it can be deserialized as-is.

use indexmap::IndexMap;

#[cfg(feature = "json-spec")]
use serde::Deserialize;
#[cfg(feature = "json-spec")]
use std::path::Path;
#[cfg(feature = "json-spec")]
use thiserror::Error;

use crate::base::constants::{collection_tags, primitive_tags};

/// Errors that can occur while loading a provider specification.
#[cfg(feature = "json-spec")]
#[derive(Debug, Error)]
pub enum SpecError {
    /// The document is not a valid specification.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The complete provider specification.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json-spec", derive(Deserialize))]
#[cfg_attr(feature = "json-spec", serde(rename_all = "PascalCase"))]
pub struct ProviderSpecification {
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub resource_specification_version: Option<String>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub resource_types: IndexMap<String, ResourceTypeSpec>,
    /// Complex types, keyed either by `"{ResourceType}.{Name}"` or by a bare
    /// name shared between resource types (e.g. `Tag`).
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub property_types: IndexMap<String, PropertyTypeSpec>,
}

/// A provisionable resource type.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json-spec", derive(Deserialize))]
#[cfg_attr(feature = "json-spec", serde(rename_all = "PascalCase"))]
pub struct ResourceTypeSpec {
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub documentation: Option<String>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub properties: IndexMap<String, PropertySpec>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub attributes: IndexMap<String, PropertySpec>,
}

/// A named complex type.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json-spec", derive(Deserialize))]
#[cfg_attr(feature = "json-spec", serde(rename_all = "PascalCase"))]
pub struct PropertyTypeSpec {
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub documentation: Option<String>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub properties: IndexMap<String, PropertySpec>,
}

/// Shape of a single property or attribute.
///
/// `type_name` is either a collection tag (`List`/`Map`) or the name of a
/// complex type. When it is a collection tag, the item is described by
/// `primitive_item_type` or `item_type`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json-spec", derive(Deserialize))]
#[cfg_attr(feature = "json-spec", serde(rename_all = "PascalCase"))]
pub struct PropertySpec {
    #[cfg_attr(feature = "json-spec", serde(default, rename = "Type"))]
    pub type_name: Option<String>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub primitive_type: Option<String>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub item_type: Option<String>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub primitive_item_type: Option<String>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub required: bool,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub duplicates_allowed: bool,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub update_type: Option<String>,
    #[cfg_attr(feature = "json-spec", serde(default))]
    pub documentation: Option<String>,
}

impl ProviderSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a specification from its JSON text.
    #[cfg(feature = "json-spec")]
    pub fn from_json_str(text: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a specification file.
    #[cfg(feature = "json-spec")]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let spec = Self::from_json_str(&text)?;
        tracing::debug!(
            "Loaded provider specification from {} ({} resource types, {} property types)",
            path.as_ref().display(),
            spec.resource_types.len(),
            spec.property_types.len()
        );
        Ok(spec)
    }

    pub fn with_resource_type(mut self, name: impl Into<String>, spec: ResourceTypeSpec) -> Self {
        self.resource_types.insert(name.into(), spec);
        self
    }

    pub fn with_property_type(mut self, name: impl Into<String>, spec: PropertyTypeSpec) -> Self {
        self.property_types.insert(name.into(), spec);
        self
    }
}

impl ResourceTypeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        self.properties.insert(name.into(), spec);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        self.attributes.insert(name.into(), spec);
        self
    }
}

impl PropertyTypeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        self.properties.insert(name.into(), spec);
        self
    }
}

impl PropertySpec {
    /// A scalar primitive (`String`, `Integer`, ...).
    pub fn primitive(tag: impl Into<String>) -> Self {
        Self {
            primitive_type: Some(tag.into()),
            ..Self::default()
        }
    }

    /// A scalar complex type.
    pub fn complex(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// A list of primitives.
    pub fn list_of_primitive(tag: impl Into<String>) -> Self {
        Self {
            type_name: Some(collection_tags::LIST.to_string()),
            primitive_item_type: Some(tag.into()),
            ..Self::default()
        }
    }

    /// A list of complex items.
    pub fn list_of(item_type: impl Into<String>) -> Self {
        Self {
            type_name: Some(collection_tags::LIST.to_string()),
            item_type: Some(item_type.into()),
            ..Self::default()
        }
    }

    /// A map of primitives.
    pub fn map_of_primitive(tag: impl Into<String>) -> Self {
        Self {
            type_name: Some(collection_tags::MAP.to_string()),
            primitive_item_type: Some(tag.into()),
            ..Self::default()
        }
    }

    /// A map of complex items.
    pub fn map_of(item_type: impl Into<String>) -> Self {
        Self {
            type_name: Some(collection_tags::MAP.to_string()),
            item_type: Some(item_type.into()),
            ..Self::default()
        }
    }

    /// Shorthand for the most common attribute shape.
    pub fn string() -> Self {
        Self::primitive(primitive_tags::STRING)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn duplicates_allowed(mut self) -> Self {
        self.duplicates_allowed = true;
        self
    }
}
