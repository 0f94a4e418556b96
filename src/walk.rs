//! Pre-order traversal of a declaration tree
//!
//! The walker owns the traversal; visitors only steer it. A visitor returns
//! `false` from `walk_to_decl_pre` to skip a declaration's members, and
//! `false` from `walk_to_decl_post` to stop the walk entirely.

use crate::model::{DeclRef, DeclTree, SourceRange};

/// Callbacks invoked while walking a declaration tree
pub trait DeclVisitor {
    /// Called when a declaration is reached, before its members
    fn walk_to_decl_pre(&mut self, decl: DeclRef<'_>, range: SourceRange) -> bool;

    /// Called after all members of a descended declaration were visited
    fn walk_to_decl_post(&mut self, _decl: DeclRef<'_>) -> bool {
        true
    }
}

/// Walk every root of `tree` in source order
///
/// Returns `false` if a visitor stopped the walk early.
pub fn walk<V: DeclVisitor + ?Sized>(tree: &DeclTree, visitor: &mut V) -> bool {
    for root in tree.roots() {
        if !walk_decl(root, visitor) {
            return false;
        }
    }
    true
}

/// Walk a single declaration and its members
pub fn walk_decl<V: DeclVisitor + ?Sized>(decl: DeclRef<'_>, visitor: &mut V) -> bool {
    if !visitor.walk_to_decl_pre(decl, decl.source_range()) {
        return true;
    }

    for member in decl.members() {
        if !walk_decl(member, visitor) {
            return false;
        }
    }

    visitor.walk_to_decl_post(decl)
}
