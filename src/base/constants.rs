//! Domain constants shared by the analysis passes.

/// Type names starting with this prefix are user-defined custom resources
/// and are never checked against the provider specification.
pub const CUSTOM_TYPE_PREFIX: &str = "Custom::";

/// Separator between the segments of a declaration's full name.
pub const FULL_NAME_SEPARATOR: &str = "::";

/// Separator between a resource type name and a nested complex type name
/// in the provider specification (`AWS::S3::Bucket.CorsRule`).
pub const NESTED_TYPE_SEPARATOR: char = '.';

/// `Type` assigned to an external-reference resource whose `Value` is a list.
pub const LIST_VALUE_TYPE: &str = "List";

/// `Type` assigned to an external-reference resource whose `Value` is a scalar.
pub const SCALAR_VALUE_TYPE: &str = "String";

/// Wildcard accepted in place of an ARN for external references.
pub const ARN_WILDCARD: &str = "*";

/// Resource type of a function declaration once compiled.
pub const FUNCTION_RESOURCE_TYPE: &str = "AWS::Lambda::Function";

/// Resource type of a nested module declaration once compiled.
pub const NESTED_STACK_RESOURCE_TYPE: &str = "AWS::CloudFormation::Stack";

/// Attribute prefix naming an output of a nested module's stack.
pub const NESTED_STACK_OUTPUT_PREFIX: &str = "Outputs.";

/// Pseudo-parameters every module can reference without declaring them.
pub const PSEUDO_PARAMETERS: &[(&str, &str)] = &[
    ("AWS::AccountId", "String"),
    ("AWS::NotificationARNs", "CommaDelimitedList"),
    ("AWS::NoValue", "String"),
    ("AWS::Partition", "String"),
    ("AWS::Region", "String"),
    ("AWS::StackId", "String"),
    ("AWS::StackName", "String"),
    ("AWS::URLSuffix", "String"),
];

/// Structural tags used by the provider specification for collections.
pub mod collection_tags {
    pub const LIST: &str = "List";
    pub const MAP: &str = "Map";
}

/// Primitive type tags used by the provider specification.
pub mod primitive_tags {
    pub const STRING: &str = "String";
    pub const LONG: &str = "Long";
    pub const INTEGER: &str = "Integer";
    pub const DOUBLE: &str = "Double";
    pub const BOOLEAN: &str = "Boolean";
    pub const TIMESTAMP: &str = "Timestamp";
    pub const JSON: &str = "Json";
}
