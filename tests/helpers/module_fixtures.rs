//! Provider specifications and module trees shared across tests.

use stackc::TypeDirectory;
use stackc::hir::{Expr, ModuleBuilder, Resource};
use stackc::types::{PropertySpec, PropertyTypeSpec, ProviderSpecification, ResourceTypeSpec};

/// A small provider specification covering scalar, list, map, and nested
/// complex properties.
pub fn provider_spec() -> ProviderSpecification {
    ProviderSpecification::new()
        .with_resource_type(
            "AWS::SNS::Topic",
            ResourceTypeSpec::new()
                .with_property("TopicName", PropertySpec::string())
                .with_property("DisplayName", PropertySpec::string())
                .with_property("Tags", PropertySpec::list_of("Tag").duplicates_allowed())
                .with_attribute("TopicName", PropertySpec::string()),
        )
        .with_resource_type(
            "AWS::SQS::Queue",
            ResourceTypeSpec::new()
                .with_property("QueueName", PropertySpec::string())
                .with_property("RedrivePolicy", PropertySpec::primitive("Json"))
                .with_attribute("Arn", PropertySpec::string())
                .with_attribute("QueueName", PropertySpec::string()),
        )
        .with_resource_type(
            "AWS::S3::Bucket",
            ResourceTypeSpec::new()
                .with_property("BucketName", PropertySpec::string())
                .with_property("CorsConfiguration", PropertySpec::complex("CorsConfiguration"))
                .with_property("Metadata", PropertySpec::map_of("MetadataEntry"))
                .with_attribute("Arn", PropertySpec::string())
                .with_attribute("DomainName", PropertySpec::string()),
        )
        .with_resource_type(
            "AWS::Lambda::Function",
            ResourceTypeSpec::new()
                .with_property("Handler", PropertySpec::string())
                .with_attribute("Arn", PropertySpec::string()),
        )
        .with_resource_type(
            "AWS::CloudFormation::Stack",
            ResourceTypeSpec::new()
                .with_property("TemplateURL", PropertySpec::string().required())
                .with_property("Parameters", PropertySpec::map_of_primitive("String")),
        )
        .with_resource_type(
            "AWS::DynamoDB::Table",
            ResourceTypeSpec::new()
                .with_property(
                    "KeySchema",
                    PropertySpec::list_of("KeySchema").required(),
                )
                .with_attribute("Arn", PropertySpec::string()),
        )
        .with_property_type(
            "AWS::S3::Bucket.CorsConfiguration",
            PropertyTypeSpec::new()
                .with_property("CorsRules", PropertySpec::list_of("CorsRule").required()),
        )
        .with_property_type(
            "AWS::S3::Bucket.CorsRule",
            PropertyTypeSpec::new()
                .with_property(
                    "AllowedMethods",
                    PropertySpec::list_of_primitive("String").required(),
                )
                .with_property("MaxAge", PropertySpec::primitive("Integer")),
        )
        .with_property_type(
            "AWS::S3::Bucket.MetadataEntry",
            PropertyTypeSpec::new().with_property("Value", PropertySpec::string().required()),
        )
        .with_property_type(
            "AWS::DynamoDB::Table.KeySchema",
            PropertyTypeSpec::new()
                .with_property("AttributeName", PropertySpec::string().required())
                .with_property("KeyType", PropertySpec::string().required()),
        )
        .with_property_type(
            "Tag",
            PropertyTypeSpec::new()
                .with_property("Key", PropertySpec::string().required())
                .with_property("Value", PropertySpec::string().required()),
        )
}

pub fn directory() -> TypeDirectory {
    TypeDirectory::new(provider_spec())
}

/// A builder with the standard pseudo-parameters already declared.
pub fn module() -> ModuleBuilder {
    ModuleBuilder::new("Acme.Orders").with_pseudo_parameters()
}

/// A module exercising every declaration kind without any errors.
pub fn well_formed_module() -> ModuleBuilder {
    let mut builder = module();
    builder.parameter("Environment", "String");
    builder.condition(
        "IsProduction",
        Expr::object([("Fn::Equals", Expr::list([Expr::reference("Environment"), Expr::lit("prod")]))]),
    );
    builder.mapping(
        "RegionSettings",
        Expr::object([("us-east-1", Expr::object([("Retention", Expr::lit("7"))]))]),
    );
    builder.variable("Retention", Expr::find_in_map("RegionSettings", Expr::reference("AWS::Region"), Expr::lit("Retention")));
    builder.resource(
        "Topic",
        Resource::managed("AWS::SNS::Topic")
            .with_properties(Expr::object([("DisplayName", Expr::reference("Environment"))]))
            .with_condition(Expr::condition("IsProduction")),
    );
    builder.resource("ExistingBucket", Resource::external(Expr::lit("arn:aws:s3:::orders-archive")));
    builder.begin_group("Processing");
    builder.resource(
        "Queue",
        Resource::managed("AWS::SQS::Queue")
            .with_properties(Expr::object([("QueueName", Expr::get_att("Topic", "TopicName"))]))
            .depends_on(["Topic"]),
    );
    builder.function("Worker", Some(Expr::object([("QUEUE_ARN", Expr::get_att("Processing::Queue", "Arn"))])));
    builder.end_group();
    builder.resource_type("Acme::Orders::Ledger", &["Owner"], &["LedgerId"]);
    builder.resource(
        "Ledger",
        Resource::managed("Acme::Orders::Ledger")
            .with_properties(Expr::object([("Owner", Expr::reference("AWS::AccountId"))])),
    );
    builder.variable("LedgerId", Expr::get_att("Ledger", "LedgerId"));
    builder.import("SharedTopic", "Acme.Shared");
    builder.package("Assets", "assets/");
    builder.macro_decl("Expand", Expr::get_att("Processing::Worker", "Arn"));
    builder.nested_module("Reports", "Acme.Reports", &["Processing::Queue"]);
    builder
}
