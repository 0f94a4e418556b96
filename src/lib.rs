//! DocCheck - Documentation completeness and consistency checker
//!
//! This library walks the declaration tree of a compiled module and reports
//! public declarations that lack documentation, or whose documentation does
//! not describe their parameters, results and thrown errors.

pub mod check;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod markup;
pub mod model;
pub mod walk;

/// Re-export commonly used types
pub use check::{run_doc_check, DocCheckMode, DocCommentChecker, Verdict};
pub use config::CheckConfig;
pub use diagnostics::{Diagnostic, DiagnosticEngine, DiagnosticKind, DiagnosticSink};
pub use error::ModelError;
pub use markup::{DocComment, DocCommentProvider, MarkupDocProvider};
pub use model::{DeclKind, DeclRef, DeclTree};

/// Application-wide error type
pub use anyhow::Result;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "doccheck";
