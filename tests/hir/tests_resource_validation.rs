#![allow(clippy::unwrap_used)]

//! Resource classification, defaults, and property checks.

use rstest::rstest;
use stackc::hir::{AnalysisOptions, DeclId, ExprKind, Expr, ModuleTree, Resource, analyze};

use crate::helpers::diagnostic_helpers::{analyze_tree, assert_no_errors, error_messages};
use crate::helpers::module_fixtures::{directory, module};

fn single_resource(resource: Resource) -> (ModuleTree, DeclId) {
    let mut builder = module();
    builder.condition("IsProduction", Expr::lit("true"));
    let id = builder.resource("Subject", resource);
    (builder.finish(), id)
}

fn resource_type(tree: &ModuleTree, id: DeclId) -> Option<String> {
    tree[id]
        .as_resource()
        .and_then(|r| r.resource_type.as_deref().map(str::to_string))
}

// ============================================================================
// EXTERNAL REFERENCES
// ============================================================================

#[rstest]
#[case::arn(Expr::lit("arn:aws:sns:us-east-1:123456789012:alerts"), "String")]
#[case::wildcard(Expr::lit("*"), "String")]
#[case::reference(Expr::reference("AWS::StackName"), "String")]
#[case::list(
    Expr::list([Expr::lit("arn:aws:s3:::a"), Expr::lit("*")]),
    "List"
)]
fn test_value_defaults_type(#[case] value: Expr, #[case] expected_type: &str) {
    let (mut tree, id) = single_resource(Resource::external(value));
    assert_no_errors(&mut tree);
    assert_eq!(resource_type(&tree, id).as_deref(), Some(expected_type));
    assert!(tree[id].as_resource().unwrap().properties.is_none());
}

#[test]
fn test_explicit_type_on_external_reference_is_kept() {
    let (mut tree, id) = single_resource(
        Resource::external(Expr::lit("arn:aws:sqs:us-east-1:123456789012:jobs"))
            .with_type("AWS::SQS::Queue"),
    );
    assert_no_errors(&mut tree);
    assert_eq!(resource_type(&tree, id).as_deref(), Some("AWS::SQS::Queue"));
}

#[test]
fn test_value_with_properties_is_an_error() {
    let (mut tree, _) = single_resource(
        Resource::external(Expr::lit("arn:aws:s3:::bucket"))
            .with_properties(Expr::object([("BucketName", Expr::lit("b"))])),
    );
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["'Properties' attribute cannot be used with 'Value'".to_string()]
    );
}

#[test]
fn test_value_with_condition_is_an_error() {
    let (mut tree, _) = single_resource(
        Resource::external(Expr::lit("arn:aws:s3:::bucket"))
            .with_condition(Expr::condition("IsProduction")),
    );
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["'If' attribute cannot be used with 'Value'".to_string()]
    );
}

#[rstest]
#[case::plain_name(Expr::lit("my-bucket"))]
#[case::object(Expr::object([("Bucket", Expr::lit("b"))]))]
fn test_value_must_be_arn_shaped(#[case] value: Expr) {
    let (mut tree, _) = single_resource(Resource::external(value));
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["'Value' must be an ARN or '*'".to_string()]
    );
}

#[test]
fn test_each_list_item_must_be_arn_shaped() {
    let (mut tree, _) = single_resource(Resource::external(Expr::list([
        Expr::lit("arn:aws:s3:::a"),
        Expr::lit("b"),
        Expr::lit("c"),
    ])));
    let result = analyze_tree(&mut tree);
    assert_eq!(error_messages(&result.diagnostics).len(), 2);
}

// ============================================================================
// MANAGED INSTANCES
// ============================================================================

#[test]
fn test_type_only_defaults_properties_to_empty_object() {
    let (mut tree, id) = single_resource(Resource::managed("AWS::SNS::Topic"));
    assert_no_errors(&mut tree);

    let properties = tree[id].as_resource().unwrap().properties.unwrap();
    match &tree[properties].kind {
        ExprKind::Object(fields) => assert!(fields.is_empty()),
        other => panic!("expected empty object, got {other:?}"),
    }
    assert_eq!(tree[properties].parent_item, id);
}

#[test]
fn test_neither_type_nor_value_is_an_error() {
    let (mut tree, id) = single_resource(Resource::untyped());
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["missing 'Type' attribute".to_string()]
    );
    assert_eq!(resource_type(&tree, id), None);
}

#[test]
fn test_unknown_resource_type_is_reported() {
    let (mut tree, _) = single_resource(Resource::managed("AWS::Nope::Thing"));
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["unknown resource type 'AWS::Nope::Thing'".to_string()]
    );
}

#[test]
fn test_custom_resource_types_accept_any_property() {
    let (mut tree, _) = single_resource(
        Resource::managed("Custom::Seeder").with_properties(Expr::object([("Anything", Expr::lit("x"))])),
    );
    assert_no_errors(&mut tree);
}

// ============================================================================
// PROPERTY CHECKS
// ============================================================================

#[test]
fn test_unknown_property_is_reported() {
    let (mut tree, _) = single_resource(
        Resource::managed("AWS::SNS::Topic")
            .with_properties(Expr::object([("TopicName", Expr::lit("t")), ("Colour", Expr::lit("red"))])),
    );
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["unknown property 'Colour' for 'AWS::SNS::Topic'".to_string()]
    );
}

#[test]
fn test_missing_required_property_is_reported() {
    let (mut tree, _) = single_resource(Resource::managed("AWS::DynamoDB::Table"));
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["missing required property 'KeySchema' for 'AWS::DynamoDB::Table'".to_string()]
    );
}

#[test]
fn test_nested_list_items_are_checked_against_scoped_type() {
    let (mut tree, _) = single_resource(Resource::managed("AWS::DynamoDB::Table").with_properties(
        Expr::object([(
            "KeySchema",
            Expr::list([
                Expr::object([("AttributeName", Expr::lit("id")), ("KeyType", Expr::lit("HASH"))]),
                Expr::object([("AttributeName", Expr::lit("sk"))]),
            ]),
        )]),
    ));
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["missing required property 'KeyType' for 'AWS::DynamoDB::Table.KeySchema'".to_string()]
    );
}

#[test]
fn test_deeply_nested_complex_types_are_checked() {
    let (mut tree, _) = single_resource(Resource::managed("AWS::S3::Bucket").with_properties(
        Expr::object([(
            "CorsConfiguration",
            Expr::object([(
                "CorsRules",
                Expr::list([Expr::object([("MaxAge", Expr::lit("60")), ("Origin", Expr::lit("*"))])]),
            )]),
        )]),
    ));
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec![
            "unknown property 'Origin' for 'AWS::S3::Bucket.CorsRule'".to_string(),
            "missing required property 'AllowedMethods' for 'AWS::S3::Bucket.CorsRule'".to_string(),
        ]
    );
}

#[test]
fn test_map_values_are_checked() {
    let (mut tree, _) = single_resource(Resource::managed("AWS::S3::Bucket").with_properties(
        Expr::object([(
            "Metadata",
            Expr::object([("owner", Expr::object([("Value", Expr::lit("team"))])), ("tier", Expr::object::<&str>([]))]),
        )]),
    ));
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["missing required property 'Value' for 'AWS::S3::Bucket.MetadataEntry'".to_string()]
    );
}

#[test]
fn test_shared_property_type_falls_back_to_bare_name() {
    let (mut tree, _) = single_resource(Resource::managed("AWS::SNS::Topic").with_properties(
        Expr::object([("Tags", Expr::list([Expr::object([("Key", Expr::lit("team"))])]))]),
    ));
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["missing required property 'Value' for 'Tag'".to_string()]
    );
}

#[test]
fn test_computed_property_values_are_not_inspected() {
    let mut builder = module();
    builder.parameter("Cors", "String");
    builder.resource(
        "Bucket",
        Resource::managed("AWS::S3::Bucket")
            .with_properties(Expr::object([("CorsConfiguration", Expr::reference("Cors"))])),
    );
    let mut tree = builder.finish();
    assert_no_errors(&mut tree);
}

#[test]
fn test_module_resource_type_checks_declared_properties() {
    let mut builder = module();
    builder.resource_type("Acme::Ledger", &["Owner"], &[]);
    builder.resource(
        "Ledger",
        Resource::managed("Acme::Ledger")
            .with_properties(Expr::object([("Owner", Expr::lit("me")), ("Limit", Expr::lit("5"))])),
    );
    let mut tree = builder.finish();
    let result = analyze_tree(&mut tree);
    assert_eq!(
        error_messages(&result.diagnostics),
        vec!["unknown property 'Limit' for 'Acme::Ledger'".to_string()]
    );
}

#[test]
fn test_property_checks_can_be_disabled() {
    let (mut tree, id) = single_resource(
        Resource::managed("AWS::Nope::Thing").with_properties(Expr::object([("Colour", Expr::lit("red"))])),
    );
    let result = analyze(&mut tree, &directory(), &AnalysisOptions::minimal()).unwrap();
    assert!(!result.has_errors());
    // defaults still apply
    assert!(tree[id].as_resource().unwrap().properties.is_some());
}
