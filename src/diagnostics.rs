//! Diagnostics emitted by the checker
//!
//! The checker only selects a diagnostic kind and its substitution
//! arguments; sinks decide what to do with them. `DiagnosticEngine` is the
//! bundled sink: it keeps diagnostics in emission order and renders messages
//! from per-kind templates.

use crate::model::{DescriptiveDeclKind, SourceLoc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kinds of findings reported by the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A public declaration has no documentation comment
    MissingDocComment,
    /// A parameter is not described by the comment
    MissingParamDescription,
    /// A non-void result is not described by the comment
    MissingReturnDescription,
    /// A throwing callable does not describe its errors
    MissingThrowsDescription,
}

impl DiagnosticKind {
    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingDocComment => "missing_doc_comment",
            DiagnosticKind::MissingParamDescription => "missing_param_description",
            DiagnosticKind::MissingReturnDescription => "missing_return_description",
            DiagnosticKind::MissingThrowsDescription => "missing_throws_description",
        }
    }

    /// Message template; `%N` is replaced by the N-th argument
    pub fn template(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingDocComment => "%0 %1 does not have a documentation comment",
            DiagnosticKind::MissingParamDescription => {
                "%0 %1 does not have a description for parameter '%2'"
            }
            DiagnosticKind::MissingReturnDescription => {
                "%0 %1 does not have a '- Returns:' description"
            }
            DiagnosticKind::MissingThrowsDescription => {
                "%0 %1 does not have a '- Throws:' description"
            }
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Severity of an emitted diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A substitution argument of a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagArg {
    /// Declaration kind label
    Kind(DescriptiveDeclKind),
    /// Declaration name
    Name(String),
    /// Plain identifier, such as a parameter name
    Identifier(String),
}

impl std::fmt::Display for DiagArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagArg::Kind(kind) => write!(f, "{}", kind),
            DiagArg::Name(name) => write!(f, "'{}'", name),
            DiagArg::Identifier(ident) => f.write_str(ident),
        }
    }
}

/// An emitted diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Where the finding applies
    pub loc: SourceLoc,
    /// What was found
    pub kind: DiagnosticKind,
    /// How serious it is
    pub severity: Severity,
    /// Substitution arguments for the message template
    pub args: Vec<DiagArg>,
}

impl Diagnostic {
    /// Render the message by substituting arguments into the template
    pub fn message(&self) -> String {
        let mut out = String::new();
        let mut chars = self.kind.template().chars().peekable();

        while let Some(c) = chars.next() {
            if c == '%' {
                if let Some(index) = chars.peek().and_then(|d| d.to_digit(10)) {
                    chars.next();
                    if let Some(arg) = self.args.get(index as usize) {
                        out.push_str(&arg.to_string());
                    }
                    continue;
                }
            }
            out.push(c);
        }

        out
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: {} [{}]",
            self.loc,
            self.severity,
            self.message(),
            self.kind
        )
    }
}

/// Receiver of diagnostics
pub trait DiagnosticSink {
    /// Report a finding at `loc`
    fn diagnose(&mut self, loc: &SourceLoc, kind: DiagnosticKind, args: Vec<DiagArg>);
}

/// Collecting sink that keeps diagnostics in emission order
#[derive(Debug, Default)]
pub struct DiagnosticEngine {
    diagnostics: Vec<Diagnostic>,
    warnings_as_errors: bool,
}

impl DiagnosticEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every finding as an error
    pub fn with_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    /// Diagnostics in emission order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of the collected diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether any error-severity diagnostic was emitted
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Number of diagnostics per kind
    pub fn counts(&self) -> BTreeMap<DiagnosticKind, usize> {
        count_by_kind(&self.diagnostics)
    }
}

impl DiagnosticSink for DiagnosticEngine {
    fn diagnose(&mut self, loc: &SourceLoc, kind: DiagnosticKind, args: Vec<DiagArg>) {
        let severity = if self.warnings_as_errors {
            Severity::Error
        } else {
            Severity::Warning
        };

        let diagnostic = Diagnostic {
            loc: loc.clone(),
            kind,
            severity,
            args,
        };

        tracing::debug!(
            kind = kind.id(),
            loc = %diagnostic.loc,
            "{}",
            diagnostic.message()
        );

        self.diagnostics.push(diagnostic);
    }
}

/// Number of diagnostics per kind
pub fn count_by_kind(diagnostics: &[Diagnostic]) -> BTreeMap<DiagnosticKind, usize> {
    let mut counts = BTreeMap::new();
    for diagnostic in diagnostics {
        *counts.entry(diagnostic.kind).or_insert(0) += 1;
    }
    counts
}
