//! Structured documentation comments
//!
//! This module turns raw comment text attached to a declaration into the
//! fields the checker correlates against signatures:
//! - Parameter fields (`- Parameter x:` and `- Parameters:` lists)
//! - The returns field (`- Returns:`)
//! - The throws field (`- Throws:`)
//!
//! Comments are synthesized on demand through a `MarkupContext` that lives
//! for a single check call and cascade from overridden declarations and
//! protocol requirements.

mod cascade;
mod parse;

pub use cascade::MarkupDocProvider;
pub use parse::{normalize_raw_comment, parse_doc_comment};

use crate::model::{DeclId, DeclRef};
use serde::Serialize;
use std::collections::HashSet;

/// A documented parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamField {
    /// Parameter name as written in the comment
    pub name: String,
    /// Description text
    pub body: String,
}

/// Fields extracted from a documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocComment {
    /// First paragraph of prose
    pub brief: Option<String>,
    /// Remaining prose blocks and unrecognized list items
    pub body: Vec<String>,
    /// Parameter fields in comment order
    pub param_fields: Vec<ParamField>,
    /// `- Returns:` description
    pub returns_field: Option<String>,
    /// `- Throws:` description
    pub throws_field: Option<String>,
}

impl DocComment {
    /// Whether the comment has no parts at all
    pub fn is_empty(&self) -> bool {
        self.brief.is_none()
            && self.body.is_empty()
            && self.param_fields.is_empty()
            && self.returns_field.is_none()
            && self.throws_field.is_none()
    }

    /// First parameter field documenting `name`
    pub fn param_field(&self, name: &str) -> Option<&ParamField> {
        self.param_fields.iter().find(|field| field.name == name)
    }
}

/// Scratch state for synthesizing comments during one check call
#[derive(Debug, Default)]
pub struct MarkupContext {
    visited: HashSet<DeclId>,
}

impl MarkupContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit; `false` if the declaration was already consulted
    pub(crate) fn enter(&mut self, id: DeclId) -> bool {
        self.visited.insert(id)
    }
}

/// Source of structured documentation for declarations
pub trait DocCommentProvider {
    /// Comment for `decl`, inherited from related declarations when the
    /// declaration has none of its own
    fn cascading_doc_comment(
        &self,
        ctx: &mut MarkupContext,
        decl: DeclRef<'_>,
    ) -> Option<DocComment>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_comment() {
        assert!(DocComment::default().is_empty());

        let brief_only = DocComment {
            brief: Some("Does a thing.".to_string()),
            ..Default::default()
        };
        assert!(!brief_only.is_empty());
    }

    #[test]
    fn test_param_field_first_match() {
        let doc = DocComment {
            param_fields: vec![
                ParamField {
                    name: "x".to_string(),
                    body: "first".to_string(),
                },
                ParamField {
                    name: "x".to_string(),
                    body: "second".to_string(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(doc.param_field("x").unwrap().body, "first");
        assert!(doc.param_field("y").is_none());
    }
}
