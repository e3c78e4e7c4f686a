//! # Resource Type System
//!
//! Wraps the provider's resource-type specification and resolves type names
//! to descriptors that expose property and attribute shapes, including
//! arbitrarily nested complex types.
//!
//! ## Key Types
//!
//! - [`ProviderSpecification`] — Raw specification data (optionally loaded from JSON)
//! - [`TypeDirectory`] — Type name → [`ResourceTypeDescriptor`] lookup
//! - [`PropertyTypeDescriptor`] — Collection/item shape of a property or attribute
//! - [`ComplexTypeDescriptor`] — A nested complex type, resolved lazily

mod descriptor;
mod directory;
mod spec;

pub use descriptor::{
    CollectionKind, ComplexTypeDescriptor, ItemKind, PrimitiveKind, PropertyContainer,
    PropertyTypeDescriptor, ResourceTypeDescriptor,
};
pub use directory::TypeDirectory;
#[cfg(feature = "json-spec")]
pub use spec::SpecError;
pub use spec::{PropertySpec, PropertyTypeSpec, ProviderSpecification, ResourceTypeSpec};
