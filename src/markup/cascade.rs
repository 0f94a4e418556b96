//! Doc comment lookup with inheritance from related declarations

use super::{parse_doc_comment, DocComment, DocCommentProvider, MarkupContext};
use crate::model::{DeclKind, DeclRef};

/// Provider reading the raw comments recorded in the declaration dump
///
/// A declaration without a comment of its own inherits the comment of the
/// declaration it overrides, then of the first protocol requirement it
/// satisfies that has one. Enum elements fall back to the comment on their
/// case group, which documents every element it declares.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupDocProvider;

impl MarkupDocProvider {
    /// Create a new provider
    pub fn new() -> Self {
        Self
    }

    /// Comment attached directly to `decl`
    fn single_doc_comment(&self, decl: DeclRef<'_>) -> Option<DocComment> {
        decl.doc.as_deref().map(parse_doc_comment)
    }

    fn inherited(&self, ctx: &mut MarkupContext, decl: DeclRef<'_>) -> Option<DocComment> {
        if let Some(overridden) = decl.overridden() {
            if let Some(doc) = self.cascading_doc_comment(ctx, overridden) {
                if !doc.is_empty() {
                    return Some(doc);
                }
            }
        }

        for requirement in decl.requirements() {
            if let Some(doc) = self.cascading_doc_comment(ctx, requirement) {
                if !doc.is_empty() {
                    return Some(doc);
                }
            }
        }

        if decl.kind == DeclKind::EnumElement {
            if let Some(group) = decl.parent().filter(|p| p.kind == DeclKind::EnumCase) {
                return self
                    .cascading_doc_comment(ctx, group)
                    .filter(|doc| !doc.is_empty());
            }
        }

        None
    }
}

impl DocCommentProvider for MarkupDocProvider {
    fn cascading_doc_comment(
        &self,
        ctx: &mut MarkupContext,
        decl: DeclRef<'_>,
    ) -> Option<DocComment> {
        if !ctx.enter(decl.id()) {
            return None;
        }

        let own = self.single_doc_comment(decl);
        if let Some(ref doc) = own {
            if !doc.is_empty() {
                return own;
            }
        }

        // An empty comment of our own only stands when nothing is inherited
        self.inherited(ctx, decl).or(own)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclKind, DeclSpec, DeclTree, ModuleSpec};

    fn lookup(tree: &DeclTree, usr: &str) -> Option<DocComment> {
        let decl = tree.iter().find(|d| d.usr.as_deref() == Some(usr)).unwrap();
        let mut ctx = MarkupContext::new();
        MarkupDocProvider::new().cascading_doc_comment(&mut ctx, decl)
    }

    #[test]
    fn test_own_comment_wins() {
        let tree = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![
                DeclSpec::new(DeclKind::Func, "base")
                    .with_usr("s:base")
                    .with_doc("/// Base docs."),
                DeclSpec::new(DeclKind::Func, "derived")
                    .with_usr("s:derived")
                    .with_overrides("s:base")
                    .with_doc("/// Derived docs."),
            ],
        ))
        .unwrap();

        let doc = lookup(&tree, "s:derived").unwrap();
        assert_eq!(doc.brief.as_deref(), Some("Derived docs."));
    }

    #[test]
    fn test_inherits_from_override_then_requirement() {
        let tree = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![
                DeclSpec::new(DeclKind::Func, "req")
                    .with_usr("s:req")
                    .with_doc("/// Requirement docs."),
                DeclSpec::new(DeclKind::Func, "base").with_usr("s:base"),
                DeclSpec::new(DeclKind::Func, "derived")
                    .with_usr("s:derived")
                    .with_overrides("s:base")
                    .with_requirement("s:req")
                    .with_doc("///"),
            ],
        ))
        .unwrap();

        let doc = lookup(&tree, "s:derived").unwrap();
        assert_eq!(doc.brief.as_deref(), Some("Requirement docs."));
        assert!(lookup(&tree, "s:base").is_none());
    }

    #[test]
    fn test_empty_own_comment_kept_when_nothing_inherited() {
        let tree = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![DeclSpec::new(DeclKind::Func, "f").with_usr("s:f").with_doc("///")],
        ))
        .unwrap();

        let doc = lookup(&tree, "s:f").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_override_cycle_terminates() {
        let tree = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![
                DeclSpec::new(DeclKind::Func, "a").with_usr("s:a").with_overrides("s:b"),
                DeclSpec::new(DeclKind::Func, "b").with_usr("s:b").with_overrides("s:a"),
            ],
        ))
        .unwrap();

        assert!(lookup(&tree, "s:a").is_none());
    }

    #[test]
    fn test_element_falls_back_to_case_group() {
        let tree = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![DeclSpec::new(DeclKind::Enum, "E").with_member(
                DeclSpec::unnamed(DeclKind::EnumCase)
                    .with_doc("/// Cases.")
                    .with_member(DeclSpec::new(DeclKind::EnumElement, "a").with_usr("s:E.a"))
                    .with_member(
                        DeclSpec::new(DeclKind::EnumElement, "b")
                            .with_usr("s:E.b")
                            .with_doc("/// Just b."),
                    ),
            )],
        ))
        .unwrap();

        let doc = lookup(&tree, "s:E.a").unwrap();
        assert_eq!(doc.brief.as_deref(), Some("Cases."));
        let doc = lookup(&tree, "s:E.b").unwrap();
        assert_eq!(doc.brief.as_deref(), Some("Just b."));
    }
}
