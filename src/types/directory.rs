//! Type Directory — resource type name resolution.

use std::rc::Rc;
use std::sync::Arc;

use super::descriptor::ResourceTypeDescriptor;
use super::spec::ProviderSpecification;
use crate::base::constants::CUSTOM_TYPE_PREFIX;

/// Read-only lookup of resource types shared by every analysis pass.
///
/// Descriptors memoize nested types without synchronization, so a directory
/// and its descriptors stay on the thread that created them.
#[derive(Clone, Debug)]
pub struct TypeDirectory {
    spec: Rc<ProviderSpecification>,
    custom_type_prefix: Arc<str>,
}

impl TypeDirectory {
    pub fn new(spec: ProviderSpecification) -> Self {
        Self {
            spec: Rc::new(spec),
            custom_type_prefix: Arc::from(CUSTOM_TYPE_PREFIX),
        }
    }

    /// A directory with no provider types; only custom types resolve.
    pub fn empty() -> Self {
        Self::new(ProviderSpecification::new())
    }

    /// Replace the reserved prefix that marks unconstrained custom types.
    pub fn with_custom_type_prefix(mut self, prefix: impl Into<Arc<str>>) -> Self {
        self.custom_type_prefix = prefix.into();
        self
    }

    pub fn specification(&self) -> &ProviderSpecification {
        &self.spec
    }

    pub fn is_custom_type(&self, type_name: &str) -> bool {
        type_name.starts_with(&*self.custom_type_prefix)
    }

    /// Resolve a resource type name.
    ///
    /// Custom-prefixed names always resolve to a wildcard descriptor.
    pub fn try_resolve(&self, type_name: &str) -> Option<ResourceTypeDescriptor> {
        if self.is_custom_type(type_name) {
            return Some(ResourceTypeDescriptor::wildcard(type_name, self.spec.clone()));
        }
        self.spec
            .resource_types
            .contains_key(type_name)
            .then(|| ResourceTypeDescriptor::specified(type_name, self.spec.clone()))
    }
}

impl Default for TypeDirectory {
    fn default() -> Self {
        Self::empty()
    }
}
