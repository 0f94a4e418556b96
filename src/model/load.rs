//! Declaration dump format and tree construction
//!
//! Dumps are JSON documents with nested `members`. Cross references
//! (`overrides`, `requirements`, `extended_type`) name other declarations by
//! USR and are resolved to arena ids once the whole module is flattened.

use super::decl::{DeclId, DeclTree, Declaration, Parameter, Signature};
use super::{AccessLevel, DeclKind, SourceLoc, SourceRange, StaticSpelling};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level dump document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Module name
    pub module: String,
    /// Top-level declarations in source order
    #[serde(default)]
    pub decls: Vec<DeclSpec>,
}

impl ModuleSpec {
    /// Create a module document
    pub fn new(module: &str, decls: Vec<DeclSpec>) -> Self {
        Self {
            module: module.to_string(),
            decls,
        }
    }
}

/// One declaration as written in a dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclSpec {
    pub kind: DeclKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usr: Option<String>,
    #[serde(default)]
    pub loc: SourceLoc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SourceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub spi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_visibility: Option<AccessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_spelling: Option<StaticSpelling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Parameter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    /// USR of the overridden declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<String>,
    /// USRs of satisfied protocol requirements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    /// USR of the extended type (extensions only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<DeclSpec>,
}

impl DeclSpec {
    /// Create a named declaration
    pub fn new(kind: DeclKind, name: &str) -> Self {
        let mut spec = Self::unnamed(kind);
        spec.name = Some(name.to_string());
        spec
    }

    /// Create a declaration without a name (extensions, case groups, ...)
    pub fn unnamed(kind: DeclKind) -> Self {
        Self {
            kind,
            name: None,
            access: None,
            usr: None,
            loc: SourceLoc::default(),
            range: None,
            doc: None,
            spi: false,
            doc_visibility: None,
            static_spelling: None,
            params: None,
            signature: None,
            overrides: None,
            requirements: Vec::new(),
            extended_type: None,
            members: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = Some(access);
        self
    }

    pub fn with_usr(mut self, usr: &str) -> Self {
        self.usr = Some(usr.to_string());
        self
    }

    pub fn with_loc(mut self, loc: SourceLoc) -> Self {
        self.loc = loc;
        self
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    pub fn with_spi(mut self) -> Self {
        self.spi = true;
        self
    }

    pub fn with_doc_visibility(mut self, visibility: AccessLevel) -> Self {
        self.doc_visibility = Some(visibility);
        self
    }

    pub fn with_static_spelling(mut self, spelling: StaticSpelling) -> Self {
        self.static_spelling = Some(spelling);
        self
    }

    pub fn with_params(mut self, params: Vec<Parameter>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn with_overrides(mut self, usr: &str) -> Self {
        self.overrides = Some(usr.to_string());
        self
    }

    pub fn with_requirement(mut self, usr: &str) -> Self {
        self.requirements.push(usr.to_string());
        self
    }

    pub fn with_extended_type(mut self, usr: &str) -> Self {
        self.extended_type = Some(usr.to_string());
        self
    }

    pub fn with_member(mut self, member: DeclSpec) -> Self {
        self.members.push(member);
        self
    }
}

/// USR references waiting for the whole module to be flattened
struct PendingRefs {
    id: DeclId,
    overrides: Option<String>,
    requirements: Vec<String>,
    extended_type: Option<String>,
}

struct TreeBuilder {
    tree: DeclTree,
    usrs: HashMap<String, DeclId>,
    pending: Vec<PendingRefs>,
}

impl TreeBuilder {
    fn push(&mut self, spec: DeclSpec, parent: Option<DeclId>) -> Result<DeclId, ModelError> {
        let id = DeclId(self.tree.decls.len());

        if let Some(ref usr) = spec.usr {
            if self.usrs.insert(usr.clone(), id).is_some() {
                return Err(ModelError::DuplicateUsr(usr.clone()));
            }
        }

        self.pending.push(PendingRefs {
            id,
            overrides: spec.overrides,
            requirements: spec.requirements,
            extended_type: spec.extended_type,
        });

        self.tree.decls.push(Declaration {
            kind: spec.kind,
            name: spec.name,
            access: spec.access,
            usr: spec.usr,
            loc: spec.loc,
            range: spec.range,
            doc: spec.doc,
            spi: spec.spi,
            doc_visibility: spec.doc_visibility,
            static_spelling: spec.static_spelling,
            params: spec.params,
            signature: spec.signature,
            parent,
            members: Vec::new(),
            overrides: None,
            requirements: Vec::new(),
            extended_type: None,
        });

        let mut members = Vec::with_capacity(spec.members.len());
        for member in spec.members {
            members.push(self.push(member, Some(id))?);
        }
        self.tree.decls[id.0].members = members;

        Ok(id)
    }

    fn resolve(&self, usr: &str, from: DeclId) -> Result<DeclId, ModelError> {
        self.usrs
            .get(usr)
            .copied()
            .ok_or_else(|| ModelError::UnresolvedUsr {
                usr: usr.to_string(),
                loc: self.tree.decls[from.0].loc.clone(),
            })
    }

    fn finish(mut self) -> Result<DeclTree, ModelError> {
        let pending = std::mem::take(&mut self.pending);
        for refs in pending {
            let overrides = match refs.overrides {
                Some(ref usr) => Some(self.resolve(usr, refs.id)?),
                None => None,
            };
            let requirements = refs
                .requirements
                .iter()
                .map(|usr| self.resolve(usr, refs.id))
                .collect::<Result<Vec<_>, _>>()?;
            // Extensions of types outside the dump have no context to inherit
            let extended_type = refs
                .extended_type
                .as_ref()
                .and_then(|usr| self.usrs.get(usr).copied());

            let decl = &mut self.tree.decls[refs.id.0];
            decl.overrides = overrides;
            decl.requirements = requirements;
            decl.extended_type = extended_type;
        }

        Ok(self.tree)
    }
}

impl DeclTree {
    /// Build a tree from a parsed dump
    pub fn from_module(spec: ModuleSpec) -> Result<Self, ModelError> {
        let mut builder = TreeBuilder {
            tree: DeclTree {
                module: spec.module,
                decls: Vec::new(),
                roots: Vec::new(),
            },
            usrs: HashMap::new(),
            pending: Vec::new(),
        };

        for decl in spec.decls {
            let id = builder.push(decl, None)?;
            builder.tree.roots.push(id);
        }

        builder.finish()
    }

    /// Parse a JSON dump
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let spec: ModuleSpec = serde_json::from_str(json)?;
        Self::from_module(spec)
    }

    /// Load a JSON dump from disk
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_builds_parent_links() {
        let json = r#"{
            "module": "Shapes",
            "decls": [
                { "kind": "struct", "name": "Point", "access": "public",
                  "loc": { "file": "Point.swift", "line": 3, "column": 15 },
                  "members": [
                    { "kind": "func", "name": "scaled", "access": "public",
                      "params": [ { "label": "by", "name": "factor" } ],
                      "signature": { "result": "Point" } }
                  ] }
            ]
        }"#;

        let tree = DeclTree::from_json(json).unwrap();
        assert_eq!(tree.module(), "Shapes");
        assert_eq!(tree.len(), 2);

        let scaled = tree.find("scaled").unwrap();
        assert_eq!(scaled.parent().unwrap().name.as_deref(), Some("Point"));
        assert_eq!(scaled.params.as_ref().unwrap()[0].parameter_name(), Some("factor"));
        assert!(!scaled.signature.as_ref().unwrap().throws);

        let point = tree.roots().next().unwrap();
        assert_eq!(point.members().count(), 1);
        assert_eq!(point.loc, SourceLoc::new("Point.swift", 3, 15));
    }

    #[test]
    fn test_resolves_cross_references() {
        let tree = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![
                DeclSpec::new(DeclKind::Protocol, "Shape")
                    .with_usr("s:Shape")
                    .with_member(DeclSpec::new(DeclKind::Func, "area").with_usr("s:Shape.area")),
                DeclSpec::new(DeclKind::Struct, "Square").with_member(
                    DeclSpec::new(DeclKind::Func, "area").with_requirement("s:Shape.area"),
                ),
            ],
        ))
        .unwrap();

        let square_area = tree
            .iter()
            .find(|d| d.name.as_deref() == Some("area") && d.usr.is_none())
            .unwrap();
        let requirement = square_area.requirements().next().unwrap();
        assert_eq!(requirement.usr.as_deref(), Some("s:Shape.area"));
    }

    #[test]
    fn test_duplicate_usr_is_rejected() {
        let result = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![
                DeclSpec::new(DeclKind::Func, "a").with_usr("s:dup"),
                DeclSpec::new(DeclKind::Func, "b").with_usr("s:dup"),
            ],
        ));
        assert!(matches!(result, Err(ModelError::DuplicateUsr(usr)) if usr == "s:dup"));
    }

    #[test]
    fn test_unresolved_override_is_rejected() {
        let result = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![DeclSpec::new(DeclKind::Func, "a").with_overrides("s:missing")],
        ));
        assert!(matches!(result, Err(ModelError::UnresolvedUsr { .. })));
    }

    #[test]
    fn test_foreign_extension_has_no_extended_type() {
        let tree = DeclTree::from_module(ModuleSpec::new(
            "M",
            vec![DeclSpec::unnamed(DeclKind::Extension).with_extended_type("s:Swift.String")],
        ))
        .unwrap();
        assert!(tree.roots().next().unwrap().extended_type().is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            DeclTree::from_json("{ \"decls\": 3 }"),
            Err(ModelError::Json(_))
        ));
    }
}
