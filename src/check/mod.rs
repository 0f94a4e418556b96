//! Documentation completeness and consistency checking
//!
//! The checker runs as a visitor over a declaration tree:
//! - Eligibility: only API-bearing declaration kinds are checked
//! - Visibility: non-public surface (and everything inside it) is pruned
//! - Presence: every remaining declaration needs a non-empty doc comment
//! - Consistency: documented callables must describe their parameters,
//!   non-void results and thrown errors

mod checker;

pub use checker::{is_checked_kind, CheckStats, DocCommentChecker};

use crate::diagnostics::DiagnosticSink;
use crate::markup::DocCommentProvider;
use crate::model::DeclTree;
use serde::{Deserialize, Serialize};

/// How thoroughly documentation is checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocCheckMode {
    /// No checking at all
    Disabled,
    /// Public declarations must have a doc comment
    #[default]
    #[serde(rename = "presence")]
    #[value(name = "presence")]
    PresenceOnly,
    /// Doc comments must also describe parameters, results and errors
    Consistency,
}

impl std::fmt::Display for DocCheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocCheckMode::Disabled => write!(f, "disabled"),
            DocCheckMode::PresenceOnly => write!(f, "presence"),
            DocCheckMode::Consistency => write!(f, "consistency"),
        }
    }
}

/// Outcome of checking a single declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Checking is disabled; nothing below is visited
    SkipDisabled,
    /// The kind is never checked, but its members may be
    DescendUninteresting,
    /// Not part of the public API surface; the subtree is skipped
    PruneExempt,
    /// Checked; members are visited next
    Checked,
}

impl Verdict {
    /// Whether the walk continues into the declaration's members
    pub fn descends(&self) -> bool {
        matches!(self, Verdict::DescendUninteresting | Verdict::Checked)
    }
}

/// Check every declaration of `tree`, reporting findings to `diags`
pub fn run_doc_check(
    tree: &DeclTree,
    mode: DocCheckMode,
    comments: &dyn DocCommentProvider,
    diags: &mut dyn DiagnosticSink,
) -> CheckStats {
    let mut checker = DocCommentChecker::new(mode, diags, comments);
    crate::walk::walk(tree, &mut checker);
    let stats = checker.stats();

    tracing::info!(
        module = tree.module(),
        visited = stats.visited,
        checked = stats.checked,
        exempt = stats.exempt,
        "documentation check finished"
    );

    stats
}
