//! Per-declaration documentation checker

use super::{DocCheckMode, Verdict};
use crate::diagnostics::{DiagArg, DiagnosticKind, DiagnosticSink};
use crate::markup::{DocComment, DocCommentProvider, MarkupContext};
use crate::model::{AccessLevel, DeclKind, DeclRef, SourceRange};
use crate::walk::DeclVisitor;

/// Counters collected while checking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckStats {
    /// Declarations handed to the checker
    pub visited: usize,
    /// Declarations whose documentation was checked
    pub checked: usize,
    /// Declarations pruned as non-public surface
    pub exempt: usize,
}

impl CheckStats {
    /// Add the counters of another run
    pub fn merge(&mut self, other: CheckStats) {
        self.visited += other.visited;
        self.checked += other.checked;
        self.exempt += other.exempt;
    }
}

/// Whether declarations of `kind` need documentation of their own
pub fn is_checked_kind(kind: DeclKind) -> bool {
    match kind {
        DeclKind::Class
        | DeclKind::Struct
        | DeclKind::Enum
        | DeclKind::EnumElement
        | DeclKind::EnumCase
        | DeclKind::Protocol
        | DeclKind::Constructor
        | DeclKind::Func
        | DeclKind::Var
        | DeclKind::Subscript
        | DeclKind::TypeAlias
        | DeclKind::AssociatedType => true,

        DeclKind::Import
        | DeclKind::Extension
        | DeclKind::TopLevelCode
        | DeclKind::PatternBinding
        | DeclKind::Actor
        | DeclKind::GenericTypeParam
        | DeclKind::Module
        | DeclKind::Param
        | DeclKind::Destructor
        | DeclKind::Accessor
        | DeclKind::Operator
        | DeclKind::PrecedenceGroup
        | DeclKind::Macro => false,
    }
}

/// Checks that public declarations are documented
///
/// The mode is fixed at construction. Each declaration is checked on its
/// own; the only state shared across declarations is the diagnostic sink and
/// the counters.
pub struct DocCommentChecker<'a> {
    mode: DocCheckMode,
    diags: &'a mut dyn DiagnosticSink,
    comments: &'a dyn DocCommentProvider,
    stats: CheckStats,
}

impl<'a> DocCommentChecker<'a> {
    /// Create a checker reporting to `diags`
    pub fn new(
        mode: DocCheckMode,
        diags: &'a mut dyn DiagnosticSink,
        comments: &'a dyn DocCommentProvider,
    ) -> Self {
        Self {
            mode,
            diags,
            comments,
            stats: CheckStats::default(),
        }
    }

    /// Mode this checker runs in
    pub fn mode(&self) -> DocCheckMode {
        self.mode
    }

    /// Counters collected so far
    pub fn stats(&self) -> CheckStats {
        self.stats
    }

    /// Check one declaration and decide whether its members are visited
    pub fn check_decl(&mut self, decl: DeclRef<'_>) -> Verdict {
        if self.mode == DocCheckMode::Disabled {
            return Verdict::SkipDisabled;
        }

        self.stats.visited += 1;

        if !is_checked_kind(decl.kind) {
            tracing::trace!(kind = %decl.kind, "descending into unchecked declaration");
            return Verdict::DescendUninteresting;
        }

        // SPI declarations are still API for their clients
        if decl.name_or_context_implies_omission_from_docs(AccessLevel::Public, true, false) {
            tracing::debug!(
                name = %decl.display_name(),
                loc = %decl.loc,
                "skipping declaration outside the public API surface"
            );
            self.stats.exempt += 1;
            return Verdict::PruneExempt;
        }

        self.stats.checked += 1;

        let mut ctx = MarkupContext::new();
        let doc = self.comments.cascading_doc_comment(&mut ctx, decl);

        match doc {
            Some(ref doc) if !doc.is_empty() => {
                if self.mode == DocCheckMode::Consistency {
                    self.check_doc_comment_consistency(decl, doc);
                }
            }
            _ => {
                self.diags.diagnose(
                    &decl.loc,
                    DiagnosticKind::MissingDocComment,
                    vec![
                        DiagArg::Kind(decl.descriptive_kind()),
                        DiagArg::Name(decl.display_name()),
                    ],
                );
            }
        }

        Verdict::Checked
    }

    /// Compare the documented fields of a callable with its signature
    fn check_doc_comment_consistency(&mut self, decl: DeclRef<'_>, doc: &DocComment) {
        let kind = decl.descriptive_kind();
        let name = decl.display_name();

        if let Some(ref params) = decl.params {
            for param in params {
                // A placeholder parameter has no name a field could match
                let param_name = param.parameter_name();
                let documented = param_name.and_then(|n| doc.param_field(n)).is_some();

                if !documented {
                    self.diags.diagnose(
                        &decl.loc,
                        DiagnosticKind::MissingParamDescription,
                        vec![
                            DiagArg::Kind(kind),
                            DiagArg::Name(name.clone()),
                            DiagArg::Identifier(param_name.unwrap_or("_").to_string()),
                        ],
                    );
                }
            }
        }

        if let Some(ref signature) = decl.signature {
            if !signature.is_void_result() && doc.returns_field.is_none() {
                self.diags.diagnose(
                    &decl.loc,
                    DiagnosticKind::MissingReturnDescription,
                    vec![DiagArg::Kind(kind), DiagArg::Name(name.clone())],
                );
            }

            if signature.throws && doc.throws_field.is_none() {
                self.diags.diagnose(
                    &decl.loc,
                    DiagnosticKind::MissingThrowsDescription,
                    vec![DiagArg::Kind(kind), DiagArg::Name(name)],
                );
            }
        }
    }
}

impl DeclVisitor for DocCommentChecker<'_> {
    fn walk_to_decl_pre(&mut self, decl: DeclRef<'_>, _range: SourceRange) -> bool {
        if self.mode == DocCheckMode::Disabled {
            return false;
        }

        self.check_decl(decl).descends()
    }
}
