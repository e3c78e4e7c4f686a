#![allow(clippy::unwrap_used)]

//! Resource type lookup and nested complex type resolution.

use std::io::Write;

use rstest::rstest;
use stackc::InternalError;
use stackc::types::{
    CollectionKind, ItemKind, PrimitiveKind, PropertySpec, PropertyTypeSpec, ProviderSpecification,
    ResourceTypeSpec, TypeDirectory,
};

use crate::helpers::module_fixtures::directory;

const SPEC_JSON: &str = r#"{
  "ResourceSpecificationVersion": "18.4.0",
  "ResourceTypes": {
    "MyResource": {
      "Properties": {
        "Settings": { "Type": "Nested", "Required": true },
        "Labels": { "Type": "Map", "PrimitiveItemType": "String" }
      },
      "Attributes": {
        "Id": { "PrimitiveType": "String" }
      }
    },
    "OtherResource": {
      "Properties": {
        "Settings": { "Type": "Nested" }
      }
    }
  },
  "PropertyTypes": {
    "MyResource.Nested": {
      "Properties": { "Scoped": { "PrimitiveType": "Boolean" } }
    },
    "Nested": {
      "Properties": { "Shared": { "PrimitiveType": "Integer" } }
    }
  }
}"#;

fn json_directory() -> TypeDirectory {
    TypeDirectory::new(ProviderSpecification::from_json_str(SPEC_JSON).unwrap())
}

// ============================================================================
// RESOURCE TYPES
// ============================================================================

#[rstest]
#[case::provider_type("AWS::SNS::Topic", true, false)]
#[case::custom_type("Custom::Anything", true, true)]
#[case::unknown_type("AWS::Nope::Thing", false, false)]
#[case::prefix_is_case_sensitive("custom::Anything", false, false)]
fn test_try_resolve(#[case] type_name: &str, #[case] resolves: bool, #[case] wildcard: bool) {
    let resolved = directory().try_resolve(type_name);
    assert_eq!(resolved.is_some(), resolves);
    if let Some(descriptor) = resolved {
        assert_eq!(descriptor.name(), type_name);
        assert_eq!(descriptor.is_wildcard(), wildcard);
    }
}

#[test]
fn test_custom_prefix_is_configurable() {
    let directory = directory().with_custom_type_prefix("Acme::Custom::");
    assert!(directory.try_resolve("Custom::Seeder").is_none());
    assert!(directory.try_resolve("Acme::Custom::Seeder").unwrap().is_wildcard());
}

#[test]
fn test_wildcard_accepts_any_property_and_attribute() {
    let descriptor = TypeDirectory::empty().try_resolve("Custom::Seeder").unwrap();

    let property = descriptor.try_get_property("Whatever").unwrap().unwrap();
    assert_eq!(property.collection(), CollectionKind::None);
    assert_eq!(property.item(), ItemKind::Primitive(PrimitiveKind::Json));
    assert!(descriptor.try_get_attribute("Arn").unwrap().is_some());
    assert!(descriptor.required_properties().is_empty());
}

#[test]
fn test_unknown_property_and_attribute_are_absent() {
    let descriptor = directory().try_resolve("AWS::SQS::Queue").unwrap();
    assert!(descriptor.try_get_property("Colour").unwrap().is_none());
    assert!(descriptor.try_get_attribute("Colour").unwrap().is_none());
    assert!(descriptor.try_get_attribute("Arn").unwrap().is_some());
}

// ============================================================================
// NESTED TYPES
// ============================================================================

#[test]
fn test_scoped_nested_type_takes_precedence() {
    let descriptor = json_directory().try_resolve("MyResource").unwrap();
    let settings = descriptor.try_get_property("Settings").unwrap().unwrap();

    assert!(settings.is_required());
    assert_eq!(settings.item(), ItemKind::Complex);
    assert_eq!(settings.complex_type_name(), Some("Nested"));

    let nested = settings.nested_type().unwrap();
    assert_eq!(nested.name(), "MyResource.Nested");
    assert_eq!(nested.property_names(), vec!["Scoped"]);
}

#[test]
fn test_bare_nested_type_is_the_fallback() {
    let descriptor = json_directory().try_resolve("OtherResource").unwrap();
    let settings = descriptor.try_get_property("Settings").unwrap().unwrap();

    let nested = settings.nested_type().unwrap();
    assert_eq!(nested.name(), "Nested");
    let shared = nested.try_get_property("Shared").unwrap().unwrap();
    assert_eq!(shared.item(), ItemKind::Primitive(PrimitiveKind::Integer));
}

#[test]
fn test_nested_type_is_memoized() {
    let descriptor = json_directory().try_resolve("MyResource").unwrap();
    let settings = descriptor.try_get_property("Settings").unwrap().unwrap();

    let first: *const _ = settings.nested_type().unwrap();
    let second: *const _ = settings.nested_type().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_primitive_map_property() {
    let descriptor = json_directory().try_resolve("MyResource").unwrap();
    let labels = descriptor.try_get_property("Labels").unwrap().unwrap();

    assert_eq!(labels.collection(), CollectionKind::Map);
    assert_eq!(labels.item(), ItemKind::Primitive(PrimitiveKind::String));
    assert_eq!(
        labels.nested_type().unwrap_err(),
        InternalError::NotComplexType("Labels".to_string())
    );
}

#[test]
fn test_unresolvable_nested_type_is_internal_error() {
    let spec = ProviderSpecification::new().with_resource_type(
        "Acme::Widget",
        ResourceTypeSpec::new().with_property("Shape", PropertySpec::complex("Polygon")),
    );
    let descriptor = TypeDirectory::new(spec).try_resolve("Acme::Widget").unwrap();
    let shape = descriptor.try_get_property("Shape").unwrap().unwrap();

    assert_eq!(
        shape.nested_type().unwrap_err(),
        InternalError::UnresolvedComplexType {
            resource_type: "Acme::Widget".to_string(),
            type_name: "Polygon".to_string(),
        }
    );
}

#[test]
fn test_json_collection_item_is_internal_error() {
    let spec = ProviderSpecification::new().with_resource_type(
        "Acme::Widget",
        ResourceTypeSpec::new().with_property("Blobs", PropertySpec::list_of_primitive("Json")),
    );
    let descriptor = TypeDirectory::new(spec).try_resolve("Acme::Widget").unwrap();

    assert_eq!(
        descriptor.try_get_property("Blobs").unwrap_err(),
        InternalError::JsonCollectionItem("Blobs".to_string())
    );
}

#[test]
fn test_required_fields_of_complex_type() {
    let spec = ProviderSpecification::new()
        .with_resource_type(
            "Acme::Widget",
            ResourceTypeSpec::new().with_property("Parts", PropertySpec::list_of("Part")),
        )
        .with_property_type(
            "Part",
            PropertyTypeSpec::new()
                .with_property("Id", PropertySpec::string().required())
                .with_property("Label", PropertySpec::string()),
        );
    let descriptor = TypeDirectory::new(spec).try_resolve("Acme::Widget").unwrap();
    let parts = descriptor.try_get_property("Parts").unwrap().unwrap();

    assert_eq!(parts.collection(), CollectionKind::List);
    assert_eq!(parts.nested_type().unwrap().required_properties(), vec!["Id"]);
}

// ============================================================================
// LOADING
// ============================================================================

#[test]
fn test_load_specification_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SPEC_JSON.as_bytes()).unwrap();

    let spec = ProviderSpecification::from_path(file.path()).unwrap();

    assert_eq!(spec.resource_specification_version.as_deref(), Some("18.4.0"));
    assert_eq!(spec.resource_types.len(), 2);
    assert_eq!(spec.property_types.len(), 2);
}

#[test]
fn test_malformed_specification_is_rejected() {
    assert!(ProviderSpecification::from_json_str("{ \"ResourceTypes\": [] }").is_err());
    assert!(ProviderSpecification::from_path("/nonexistent/spec.json").is_err());
}
