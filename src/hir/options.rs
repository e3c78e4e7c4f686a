//! Analysis options

/// Switches for the optional checks layered on top of reference binding.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Validate `Properties` of managed resources against the Type Directory.
    pub check_resource_properties: bool,
    /// Validate the attribute named by `!GetAtt` against the target's type.
    pub check_attribute_names: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            check_resource_properties: true,
            check_attribute_names: true,
        }
    }
}

impl AnalysisOptions {
    /// Only the checks every module must pass: tree integrity, resource
    /// classification, reference binding, and cycle detection.
    pub fn minimal() -> Self {
        Self {
            check_resource_properties: false,
            check_attribute_names: false,
        }
    }
}
