//! # stackc-base
//!
//! Core semantic analysis for the stackc infrastructure-as-code compiler.
//!
//! A module definition arrives as a tree of declarations (parameters,
//! variables, resources, conditions, mappings, ...). Before a stack
//! template is generated, the tree is checked for structural integrity,
//! resource declarations are classified and defaulted, and every symbolic
//! reference is type-checked and bound to its declaration, with cycles among
//! `DependsOn` edges reported.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! hir    → Declaration tree, symbol table, analysis passes, diagnostics
//!   ↓
//! types  → Provider specification, Type Directory, type descriptors
//!   ↓
//! base   → Primitives (SourceLocation, InternalError, constants)
//! ```

/// Foundation types: SourceLocation, InternalError, constants
pub mod base;

/// Resource type system: provider specification and Type Directory
pub mod types;

/// Declaration tree and semantic analysis
pub mod hir;

// Re-export foundation types
pub use base::{InternalError, Position, SourceLocation};
pub use hir::{AnalysisOptions, AnalysisResult, ModuleTree, analyze};
pub use types::TypeDirectory;
