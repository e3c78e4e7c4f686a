//! Resolved resource, property, and complex type shapes.

use std::cell::OnceCell;
use std::rc::Rc;
use std::sync::Arc;

use super::spec::{PropertySpec, ProviderSpecification};
use crate::base::InternalError;
use crate::base::constants::{NESTED_TYPE_SEPARATOR, collection_tags, primitive_tags};

/// Whether a property holds one item, a list of items, or a map of items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    None,
    List,
    Map,
}

/// Primitive item types of the provider specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Long,
    Integer,
    Double,
    Boolean,
    Timestamp,
    Json,
}

impl PrimitiveKind {
    /// Parse a specification primitive tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            primitive_tags::STRING => Self::String,
            primitive_tags::LONG => Self::Long,
            primitive_tags::INTEGER => Self::Integer,
            primitive_tags::DOUBLE => Self::Double,
            primitive_tags::BOOLEAN => Self::Boolean,
            primitive_tags::TIMESTAMP => Self::Timestamp,
            primitive_tags::JSON => Self::Json,
            _ => return None,
        })
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::String => primitive_tags::STRING,
            Self::Long => primitive_tags::LONG,
            Self::Integer => primitive_tags::INTEGER,
            Self::Double => primitive_tags::DOUBLE,
            Self::Boolean => primitive_tags::BOOLEAN,
            Self::Timestamp => primitive_tags::TIMESTAMP,
            Self::Json => primitive_tags::JSON,
        }
    }
}

/// The kind of value held by a property (or by each element of a collection).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Primitive(PrimitiveKind),
    Complex,
}

// ============================================================================
// RESOURCE TYPES
// ============================================================================

/// A resolved resource type.
///
/// Wildcard descriptors stand in for custom types: they accept any property
/// and any attribute, each typed as an unconstrained `Json` scalar.
#[derive(Clone, Debug)]
pub struct ResourceTypeDescriptor {
    name: Arc<str>,
    spec: Rc<ProviderSpecification>,
    wildcard: bool,
}

impl ResourceTypeDescriptor {
    pub(super) fn specified(name: &str, spec: Rc<ProviderSpecification>) -> Self {
        Self {
            name: Arc::from(name),
            spec,
            wildcard: false,
        }
    }

    pub(super) fn wildcard(name: &str, spec: Rc<ProviderSpecification>) -> Self {
        Self {
            name: Arc::from(name),
            spec,
            wildcard: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Look up a property by name.
    pub fn try_get_property(
        &self,
        property: &str,
    ) -> Result<Option<PropertyTypeDescriptor>, InternalError> {
        if self.wildcard {
            return Ok(Some(PropertyTypeDescriptor::unconstrained(
                property,
                &self.name,
                self.spec.clone(),
            )));
        }
        match self
            .spec
            .resource_types
            .get(&*self.name)
            .and_then(|resource| resource.properties.get(property))
        {
            Some(entry) => {
                PropertyTypeDescriptor::describe(property, &self.name, entry, self.spec.clone())
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    /// Look up an attribute by name.
    pub fn try_get_attribute(
        &self,
        attribute: &str,
    ) -> Result<Option<PropertyTypeDescriptor>, InternalError> {
        if self.wildcard {
            return Ok(Some(PropertyTypeDescriptor::unconstrained(
                attribute,
                &self.name,
                self.spec.clone(),
            )));
        }
        match self
            .spec
            .resource_types
            .get(&*self.name)
            .and_then(|resource| resource.attributes.get(attribute))
        {
            Some(entry) => {
                PropertyTypeDescriptor::describe(attribute, &self.name, entry, self.spec.clone())
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    /// Names of the properties that must be present. Empty for wildcards.
    pub fn required_properties(&self) -> Vec<&str> {
        if self.wildcard {
            return Vec::new();
        }
        self.spec
            .resource_types
            .get(&*self.name)
            .map(|resource| {
                resource
                    .properties
                    .iter()
                    .filter(|(_, entry)| entry.required)
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// PROPERTY TYPES
// ============================================================================

/// A resolved property or attribute shape.
///
/// For complex item kinds the nested type is resolved on first access and
/// memoized; the provider specification is assumed to be complete, so a
/// missing nested type is an [`InternalError`].
#[derive(Clone, Debug)]
pub struct PropertyTypeDescriptor {
    name: Arc<str>,
    resource_type: Arc<str>,
    collection: CollectionKind,
    item: ItemKind,
    complex_type_name: Option<Arc<str>>,
    required: bool,
    duplicates_allowed: bool,
    spec: Rc<ProviderSpecification>,
    nested: OnceCell<ComplexTypeDescriptor>,
}

impl PropertyTypeDescriptor {
    fn unconstrained(name: &str, resource_type: &str, spec: Rc<ProviderSpecification>) -> Self {
        Self {
            name: Arc::from(name),
            resource_type: Arc::from(resource_type),
            collection: CollectionKind::None,
            item: ItemKind::Primitive(PrimitiveKind::Json),
            complex_type_name: None,
            required: false,
            duplicates_allowed: true,
            spec,
            nested: OnceCell::new(),
        }
    }

    pub(super) fn describe(
        name: &str,
        resource_type: &str,
        entry: &PropertySpec,
        spec: Rc<ProviderSpecification>,
    ) -> Result<Self, InternalError> {
        let (collection, item, complex_type_name) = match entry.type_name.as_deref() {
            Some(collection_tags::LIST) => {
                let (item, complex) = collection_item(name, entry)?;
                (CollectionKind::List, item, complex)
            }
            Some(collection_tags::MAP) => {
                let (item, complex) = collection_item(name, entry)?;
                (CollectionKind::Map, item, complex)
            }
            Some(complex) => (CollectionKind::None, ItemKind::Complex, Some(Arc::from(complex))),
            None => match entry.primitive_type.as_deref() {
                Some(tag) => (
                    CollectionKind::None,
                    ItemKind::Primitive(parse_primitive(name, tag)?),
                    None,
                ),
                None => return Err(InternalError::MissingItemType(name.to_string())),
            },
        };
        Ok(Self {
            name: Arc::from(name),
            resource_type: Arc::from(resource_type),
            collection,
            item,
            complex_type_name,
            required: entry.required,
            duplicates_allowed: entry.duplicates_allowed,
            spec,
            nested: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection(&self) -> CollectionKind {
        self.collection
    }

    pub fn item(&self) -> ItemKind {
        self.item
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn duplicates_allowed(&self) -> bool {
        self.duplicates_allowed
    }

    /// The complex type name as written in the specification (unqualified).
    pub fn complex_type_name(&self) -> Option<&str> {
        self.complex_type_name.as_deref()
    }

    /// The nested complex type, resolved once and then reused.
    pub fn nested_type(&self) -> Result<&ComplexTypeDescriptor, InternalError> {
        if let Some(nested) = self.nested.get() {
            return Ok(nested);
        }
        let Some(type_name) = self.complex_type_name.as_deref() else {
            return Err(InternalError::NotComplexType(self.name.to_string()));
        };
        let resolved = ComplexTypeDescriptor::resolve(&self.resource_type, type_name, &self.spec)?;
        Ok(self.nested.get_or_init(|| resolved))
    }
}

fn collection_item(
    name: &str,
    entry: &PropertySpec,
) -> Result<(ItemKind, Option<Arc<str>>), InternalError> {
    if let Some(tag) = entry.primitive_item_type.as_deref() {
        return match parse_primitive(name, tag)? {
            PrimitiveKind::Json => Err(InternalError::JsonCollectionItem(name.to_string())),
            primitive => Ok((ItemKind::Primitive(primitive), None)),
        };
    }
    match entry.item_type.as_deref() {
        Some(complex) => Ok((ItemKind::Complex, Some(Arc::from(complex)))),
        None => Err(InternalError::MissingItemType(name.to_string())),
    }
}

fn parse_primitive(name: &str, tag: &str) -> Result<PrimitiveKind, InternalError> {
    PrimitiveKind::from_tag(tag).ok_or_else(|| InternalError::UnknownPrimitiveType {
        property: name.to_string(),
        tag: tag.to_string(),
    })
}

// ============================================================================
// COMPLEX TYPES
// ============================================================================

/// A resolved complex property type.
#[derive(Clone, Debug)]
pub struct ComplexTypeDescriptor {
    /// The specification key the type was found under.
    name: Arc<str>,
    resource_type: Arc<str>,
    spec: Rc<ProviderSpecification>,
}

impl ComplexTypeDescriptor {
    /// Find `type_name` for a property of `resource_type`.
    ///
    /// The resource-scoped name `"{resource_type}.{type_name}"` takes
    /// precedence over the bare name.
    fn resolve(
        resource_type: &str,
        type_name: &str,
        spec: &Rc<ProviderSpecification>,
    ) -> Result<Self, InternalError> {
        let scoped = format!("{resource_type}{NESTED_TYPE_SEPARATOR}{type_name}");
        let name = if spec.property_types.contains_key(&scoped) {
            scoped
        } else if spec.property_types.contains_key(type_name) {
            type_name.to_string()
        } else {
            return Err(InternalError::UnresolvedComplexType {
                resource_type: resource_type.to_string(),
                type_name: type_name.to_string(),
            });
        };
        tracing::trace!(resource_type, type_name, resolved = %name, "resolved complex type");
        Ok(Self {
            name: Arc::from(name),
            resource_type: Arc::from(resource_type),
            spec: spec.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a field of this complex type.
    pub fn try_get_property(
        &self,
        property: &str,
    ) -> Result<Option<PropertyTypeDescriptor>, InternalError> {
        match self
            .spec
            .property_types
            .get(&*self.name)
            .and_then(|complex| complex.properties.get(property))
        {
            Some(entry) => PropertyTypeDescriptor::describe(
                property,
                &self.resource_type,
                entry,
                self.spec.clone(),
            )
            .map(Some),
            None => Ok(None),
        }
    }

    /// Names of all fields, in specification order.
    pub fn property_names(&self) -> Vec<&str> {
        self.spec
            .property_types
            .get(&*self.name)
            .map(|complex| complex.properties.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of the fields that must be present.
    pub fn required_properties(&self) -> Vec<&str> {
        self.spec
            .property_types
            .get(&*self.name)
            .map(|complex| {
                complex
                    .properties
                    .iter()
                    .filter(|(_, entry)| entry.required)
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// PROPERTY CONTAINERS
// ============================================================================

/// Anything whose value is an object of typed properties: a resource type's
/// `Properties` or the fields of a complex type.
pub trait PropertyContainer {
    fn container_name(&self) -> &str;

    fn try_get_property(
        &self,
        property: &str,
    ) -> Result<Option<PropertyTypeDescriptor>, InternalError>;

    fn required_properties(&self) -> Vec<&str>;
}

impl PropertyContainer for ResourceTypeDescriptor {
    fn container_name(&self) -> &str {
        self.name()
    }

    fn try_get_property(
        &self,
        property: &str,
    ) -> Result<Option<PropertyTypeDescriptor>, InternalError> {
        ResourceTypeDescriptor::try_get_property(self, property)
    }

    fn required_properties(&self) -> Vec<&str> {
        ResourceTypeDescriptor::required_properties(self)
    }
}

impl PropertyContainer for ComplexTypeDescriptor {
    fn container_name(&self) -> &str {
        self.name()
    }

    fn try_get_property(
        &self,
        property: &str,
    ) -> Result<Option<PropertyTypeDescriptor>, InternalError> {
        ComplexTypeDescriptor::try_get_property(self, property)
    }

    fn required_properties(&self) -> Vec<&str> {
        ComplexTypeDescriptor::required_properties(self)
    }
}
