//! High-level IR (HIR) — the declaration tree and its semantic analysis.
//!
//! ## Key Types
//!
//! - [`ModuleTree`] — Arena of declarations and expressions rooted at one module
//! - [`Declaration`] / [`DeclKind`] — Named, typed nodes of the tree
//! - [`Expression`] / [`ExprKind`] — Value-producing nodes inside declarations
//! - [`SymbolTable`] — Full name → declaration lookup
//! - [`ResourceValidator`] — External-reference vs managed-instance rules
//! - [`ReferenceResolver`] — Reference binding under context-sensitive rules
//! - [`DiagnosticCollector`] — Accumulated user diagnostics
//!
//! Passes run in the order documented on [`analyze`]. Identities of nodes
//! are fixed before analysis; only resource `Type`/`Properties`, expression
//! bindings, and dependency sets are mutated.

mod analysis;
mod builder;
pub mod cycles;
mod decl;
mod diagnostics;
mod expr;
mod ids;
pub mod integrity;
mod options;
mod resolve;
mod resources;
mod symbols;
mod tree;

pub use analysis::{AnalysisResult, analyze};
pub use builder::{Expr, ModuleBuilder, Resource};
pub use decl::{DeclKind, Declaration, Dependency, DependencyOrigin, ResourceDecl};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use expr::{ExprKind, Expression, ReferenceKind};
pub use ids::{DeclId, ExprId};
pub use options::AnalysisOptions;
pub use resolve::{BindingStats, ReferenceResolver};
pub use resources::{ResourceValidator, is_arn};
pub use symbols::SymbolTable;
pub use tree::ModuleTree;
