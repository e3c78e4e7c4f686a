//! The semantic-analysis pipeline.
//!
//! ```text
//! integrity::validate        ← tree shape (fatal on failure)
//!     │
//!     ▼
//! SymbolTable::build         ← full name → declaration
//!     │
//!     ▼
//! ResourceValidator::process ← classify resources, apply defaults
//!     │
//!     ▼
//! ReferenceResolver::bind    ← bind references, record dependency edges
//!     │
//!     ▼
//! cycles::report_cycles      ← DependsOn cycles
//! ```

use super::cycles;
use super::diagnostics::{Diagnostic, DiagnosticCollector, Severity};
use super::integrity;
use super::options::AnalysisOptions;
use super::resolve::{BindingStats, ReferenceResolver};
use super::resources::ResourceValidator;
use super::symbols::SymbolTable;
use super::tree::ModuleTree;
use crate::base::InternalError;
use crate::types::TypeDirectory;

/// Outcome of analysing one module.
#[derive(Debug)]
pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: SymbolTable,
    pub bindings: BindingStats,
    pub cycles: usize,
}

impl AnalysisResult {
    /// Whether compilation must stop; warnings do not block it.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

/// Run every analysis pass over `tree`, decorating it in place.
///
/// User problems are returned as diagnostics; an `Err` means an upstream
/// component produced something impossible and nothing after it ran.
pub fn analyze(
    tree: &mut ModuleTree,
    directory: &TypeDirectory,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, InternalError> {
    let module = tree[tree.root()].full_name.clone();
    tracing::info!(module = %module, declarations = tree.declaration_count(), "analysing module");

    integrity::validate(tree)?;

    let mut diagnostics = DiagnosticCollector::new();
    let symbols = SymbolTable::build(tree, &mut diagnostics);

    ResourceValidator::new(directory, &symbols, options, &mut diagnostics).process(tree)?;

    let bindings =
        ReferenceResolver::new(&symbols, directory, options, &mut diagnostics).bind(tree)?;

    let cycles = cycles::report_cycles(tree, &mut diagnostics);

    tracing::info!(
        module = %module,
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "analysis finished"
    );
    Ok(AnalysisResult {
        diagnostics: diagnostics.take(),
        symbols,
        bindings,
        cycles,
    })
}
