//! Diagnostics — Semantic error reporting.
//!
//! User-input problems found by the analysis passes are recorded here and
//! never abort analysis. The driver decides whether to reject compilation
//! based on the accumulated error count.

use std::fmt;
use std::sync::Arc;

use crate::base::SourceLocation;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
            Severity::Hint => write!(f, "HINT"),
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Where the offending node was parsed from.
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(location: Option<&SourceLocation>, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            location: location.cloned(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(location: Option<&SourceLocation>, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            code: None,
            message: message.into(),
            location: location.cloned(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}", self.severity)?;
        if let Some(code) = &self.code {
            write!(f, " [{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes for semantic errors.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Semantic analysis errors (symbol resolution, type checking, validation)
pub mod codes {
    /// Undefined reference (name not found).
    pub const UNDEFINED_REFERENCE: &str = "E0001";
    /// Duplicate definition.
    pub const DUPLICATE_DEFINITION: &str = "E0004";
    /// Missing required element.
    pub const MISSING_REQUIRED: &str = "E0005";
    /// Circular dependency detected.
    pub const CIRCULAR_DEPENDENCY: &str = "E0007";
    /// Invalid type.
    pub const INVALID_TYPE: &str = "E0008";
    /// Reference used in invalid context or to the wrong kind of declaration.
    pub const INVALID_REFERENCE_CONTEXT: &str = "E0012";
    /// Attribute combination not allowed on a declaration.
    pub const INVALID_ATTRIBUTE: &str = "E0015";
    /// Value is not an ARN.
    pub const INVALID_ARN: &str = "E0016";
    /// Property not defined by the resource type.
    pub const UNKNOWN_PROPERTY: &str = "E0017";
    /// Required property not provided.
    pub const MISSING_REQUIRED_PROPERTY: &str = "E0018";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during semantic analysis.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(%diagnostic, "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Log an error with a code at the given source node.
    pub fn log(&mut self, location: Option<&SourceLocation>, code: &str, message: String) {
        self.add(Diagnostic::error(location, message).with_code(code));
    }

    /// Add an undefined reference error.
    pub fn undefined_reference(&mut self, location: Option<&SourceLocation>, name: &str) {
        self.log(
            location,
            codes::UNDEFINED_REFERENCE,
            format!("undefined reference: '{name}'"),
        );
    }

    /// Add a duplicate declaration error.
    pub fn duplicate_declaration(
        &mut self,
        location: Option<&SourceLocation>,
        name: &str,
        previous: Option<&SourceLocation>,
    ) {
        let message = match previous {
            Some(previous) => {
                format!("duplicate declaration: '{name}' is already declared at {previous}")
            }
            None => format!("duplicate declaration: '{name}' is already declared"),
        };
        self.log(location, codes::DUPLICATE_DEFINITION, message);
    }

    /// Add a missing attribute error.
    pub fn missing_attribute(&mut self, location: Option<&SourceLocation>, attribute: &str) {
        self.log(
            location,
            codes::MISSING_REQUIRED,
            format!("missing '{attribute}' attribute"),
        );
    }

    /// Add an error for an attribute that conflicts with another.
    pub fn conflicting_attribute(
        &mut self,
        location: Option<&SourceLocation>,
        attribute: &str,
        conflict: &str,
    ) {
        self.log(
            location,
            codes::INVALID_ATTRIBUTE,
            format!("'{attribute}' attribute cannot be used with '{conflict}'"),
        );
    }

    /// Add a reference-kind error (e.g. "'X' must be a parameter").
    pub fn invalid_reference(&mut self, location: Option<&SourceLocation>, message: String) {
        self.log(location, codes::INVALID_REFERENCE_CONTEXT, message);
    }

    /// Add a circular dependency error.
    pub fn circular_dependency(&mut self, location: Option<&SourceLocation>, path: &str) {
        self.log(
            location,
            codes::CIRCULAR_DEPENDENCY,
            format!("circular dependency: {path}"),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
