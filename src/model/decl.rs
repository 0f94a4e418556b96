//! Declarations, the arena that owns them, and borrowed handles

use super::{AccessLevel, DeclKind, DescriptiveDeclKind, SourceLoc, SourceRange, StaticSpelling};
use serde::{Deserialize, Serialize};

/// Index of a declaration inside its `DeclTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(pub(crate) usize);

impl DeclId {
    /// Position of the declaration in pre-order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A parameter of a callable declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Argument label used at call sites (`None` for `_`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Internal parameter name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Parameter {
    /// Parameter with identical label and name, as in `f(x: Int)`
    pub fn named(name: &str) -> Self {
        Self {
            label: Some(name.to_string()),
            name: Some(name.to_string()),
        }
    }

    /// Parameter with a distinct label and name, as in `f(to other: Int)`
    pub fn labeled(label: &str, name: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            name: Some(name.to_string()),
        }
    }

    /// Unlabeled parameter, as in `f(_ x: Int)`
    pub fn unlabeled(name: &str) -> Self {
        Self {
            label: None,
            name: Some(name.to_string()),
        }
    }

    /// The name documentation refers to, if the parameter has one
    pub fn parameter_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.label.as_deref())
            .filter(|n| !n.is_empty() && *n != "_")
    }

    /// Whether the label or the name marks the parameter as internal
    pub fn has_underscored_naming(&self) -> bool {
        let underscored = |s: &Option<String>| {
            s.as_deref()
                .map(|n| n.len() > 1 && n.starts_with('_'))
                .unwrap_or(false)
        };
        underscored(&self.label) || underscored(&self.name)
    }
}

/// Result and error behaviour of a callable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Result type spelling; `None` means the unit type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Whether the callable is marked `throws`
    #[serde(default)]
    pub throws: bool,
}

impl Signature {
    /// Signature returning `result`
    pub fn returning(result: &str) -> Self {
        Self {
            result: Some(result.to_string()),
            throws: false,
        }
    }

    /// Void signature
    pub fn void() -> Self {
        Self::default()
    }

    /// Mark the signature as throwing
    pub fn throwing(mut self) -> Self {
        self.throws = true;
        self
    }

    /// Whether the result is the unit type
    pub fn is_void_result(&self) -> bool {
        match self.result.as_deref().map(str::trim) {
            None => true,
            Some(ty) => matches!(ty, "" | "Void" | "()" | "Swift.Void" | "(())"),
        }
    }
}

/// A node of the declaration tree
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Kind of declaration
    pub kind: DeclKind,
    /// Declared base name, absent for unnamed declarations
    pub name: Option<String>,
    /// Explicitly declared access level
    pub access: Option<AccessLevel>,
    /// Unified symbol reference
    pub usr: Option<String>,
    /// Location of the declared name
    pub loc: SourceLoc,
    /// Full source range, when the dump records one
    pub range: Option<SourceRange>,
    /// Raw documentation comment attached to the declaration
    pub doc: Option<String>,
    /// Whether the declaration is restricted to SPI clients
    pub spi: bool,
    /// Documentation visibility override
    pub doc_visibility: Option<AccessLevel>,
    /// `static` / `class` spelling for members
    pub static_spelling: Option<StaticSpelling>,
    /// Parameter list for callables
    pub params: Option<Vec<Parameter>>,
    /// Result and error signature for callables
    pub signature: Option<Signature>,
    pub(crate) parent: Option<DeclId>,
    pub(crate) members: Vec<DeclId>,
    pub(crate) overrides: Option<DeclId>,
    pub(crate) requirements: Vec<DeclId>,
    pub(crate) extended_type: Option<DeclId>,
}

/// Arena owning every declaration of a module
#[derive(Debug, Clone, Default)]
pub struct DeclTree {
    pub(crate) module: String,
    pub(crate) decls: Vec<Declaration>,
    pub(crate) roots: Vec<DeclId>,
}

impl DeclTree {
    /// Module name recorded by the dump
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Number of declarations in the tree
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether the tree has no declarations
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Borrow a declaration by id
    pub fn get(&self, id: DeclId) -> DeclRef<'_> {
        DeclRef { tree: self, id }
    }

    /// Top-level declarations in source order
    pub fn roots(&self) -> impl Iterator<Item = DeclRef<'_>> + '_ {
        self.roots.iter().map(move |id| self.get(*id))
    }

    /// All declarations in pre-order
    pub fn iter(&self) -> impl Iterator<Item = DeclRef<'_>> + '_ {
        (0..self.decls.len()).map(move |i| self.get(DeclId(i)))
    }

    /// Find the first declaration with the given base name
    pub fn find(&self, name: &str) -> Option<DeclRef<'_>> {
        self.iter().find(|d| d.name.as_deref() == Some(name))
    }
}

/// Borrowed handle to a declaration and the tree it lives in
#[derive(Debug, Clone, Copy)]
pub struct DeclRef<'t> {
    tree: &'t DeclTree,
    id: DeclId,
}

impl<'t> std::ops::Deref for DeclRef<'t> {
    type Target = Declaration;

    fn deref(&self) -> &Self::Target {
        &self.tree.decls[self.id.0]
    }
}

impl<'t> DeclRef<'t> {
    /// Id of this declaration
    pub fn id(&self) -> DeclId {
        self.id
    }

    /// Tree owning this declaration
    pub fn tree(&self) -> &'t DeclTree {
        self.tree
    }

    fn data(&self) -> &'t Declaration {
        &self.tree.decls[self.id.0]
    }

    /// Lexically enclosing declaration
    pub fn parent(&self) -> Option<DeclRef<'t>> {
        self.data().parent.map(|id| self.tree.get(id))
    }

    /// Direct members in source order
    pub fn members(&self) -> impl Iterator<Item = DeclRef<'t>> + 't {
        let tree = self.tree;
        self.data().members.iter().map(move |id| tree.get(*id))
    }

    /// Declaration this one overrides
    pub fn overridden(&self) -> Option<DeclRef<'t>> {
        self.data().overrides.map(|id| self.tree.get(id))
    }

    /// Protocol requirements this declaration satisfies
    pub fn requirements(&self) -> impl Iterator<Item = DeclRef<'t>> + 't {
        let tree = self.tree;
        self.data().requirements.iter().map(move |id| tree.get(*id))
    }

    /// Type extended by an extension declaration
    pub fn extended_type(&self) -> Option<DeclRef<'t>> {
        self.data().extended_type.map(|id| self.tree.get(id))
    }

    /// Source range, falling back to the name location
    pub fn source_range(&self) -> SourceRange {
        self.data()
            .range
            .clone()
            .unwrap_or_else(|| SourceRange::point(&self.data().loc))
    }

    /// Semantic context: the parent, with an extension standing in for the
    /// type it extends when that type is part of the tree
    pub fn context(&self) -> Option<DeclRef<'t>> {
        let parent = self.parent()?;
        if parent.kind == DeclKind::Extension {
            if let Some(extended) = parent.extended_type() {
                return Some(extended);
            }
        }
        Some(parent)
    }

    /// Access level in effect when none is spelled out
    pub fn effective_access(&self) -> AccessLevel {
        if let Some(access) = self.access {
            return access;
        }

        let Some(parent) = self.parent() else {
            return AccessLevel::Internal;
        };

        match (self.kind, parent.kind) {
            (DeclKind::EnumElement | DeclKind::EnumCase, DeclKind::Enum) => {
                parent.effective_access()
            }
            // Elements are nested under their case group
            (DeclKind::EnumElement, DeclKind::EnumCase) => parent.effective_access(),
            (DeclKind::Accessor, _) => parent.effective_access(),
            (_, DeclKind::Protocol) => parent.effective_access(),
            (_, DeclKind::Extension) => parent.access.unwrap_or(AccessLevel::Internal),
            _ => AccessLevel::Internal,
        }
    }

    /// Whether the name marks the declaration as an implementation detail
    pub fn has_underscored_naming(&self) -> bool {
        if let Some(params) = &self.params {
            if params.iter().any(Parameter::has_underscored_naming) {
                return true;
            }
        }

        // A case group is hidden when every element it declares is
        if self.kind == DeclKind::EnumCase {
            let mut elements = self.members().peekable();
            return elements.peek().is_some() && elements.all(|e| e.has_underscored_naming());
        }

        match self.name.as_deref() {
            Some(name) => name.starts_with('_'),
            None => false,
        }
    }

    /// Whether this declaration, ignoring its context, is left out of docs
    fn own_decl_implies_omission(&self, min_access: AccessLevel, consider_spi_hidden: bool) -> bool {
        // An extension has no identity of its own
        if self.kind == DeclKind::Extension {
            return match self.access {
                Some(access) => access < min_access,
                None => false,
            };
        }

        if let Some(visibility) = self.doc_visibility {
            return visibility < min_access;
        }

        if self.has_underscored_naming() {
            return true;
        }

        if self.effective_access() < min_access {
            return true;
        }

        consider_spi_hidden && self.spi
    }

    /// Whether the name, access or context of this declaration implies it is
    /// not part of the documented API surface
    pub fn name_or_context_implies_omission_from_docs(
        &self,
        min_access: AccessLevel,
        consider_context: bool,
        consider_spi_hidden: bool,
    ) -> bool {
        if self.own_decl_implies_omission(min_access, consider_spi_hidden) {
            return true;
        }

        if !consider_context {
            return false;
        }

        let mut context = self.context();
        let mut depth = 0;
        while let Some(decl) = context {
            if decl.own_decl_implies_omission(min_access, consider_spi_hidden) {
                return true;
            }
            // Extension links can form cycles in hand-written dumps
            depth += 1;
            if depth > self.tree.len() {
                break;
            }
            context = decl.context();
        }

        false
    }

    /// Whether the semantic context is a type or an extension
    fn in_type_context(&self) -> bool {
        self.parent()
            .map(|p| p.kind.is_type_context() || p.kind == DeclKind::EnumCase)
            .unwrap_or(false)
    }

    /// Whether the declaration lives inside a function body or top-level code
    fn in_local_context(&self) -> bool {
        self.parent().map(|p| p.kind.is_local_context()).unwrap_or(false)
    }

    /// Kind label used when describing the declaration to users
    pub fn descriptive_kind(&self) -> DescriptiveDeclKind {
        match self.kind {
            DeclKind::Import => DescriptiveDeclKind::Import,
            DeclKind::Extension => DescriptiveDeclKind::Extension,
            DeclKind::TopLevelCode => DescriptiveDeclKind::TopLevelCode,
            DeclKind::PatternBinding => DescriptiveDeclKind::PatternBinding,
            DeclKind::EnumCase => DescriptiveDeclKind::EnumCase,
            DeclKind::Enum => DescriptiveDeclKind::Enum,
            DeclKind::Struct => DescriptiveDeclKind::Struct,
            DeclKind::Class => DescriptiveDeclKind::Class,
            DeclKind::Actor => DescriptiveDeclKind::Actor,
            DeclKind::Protocol => DescriptiveDeclKind::Protocol,
            DeclKind::TypeAlias => DescriptiveDeclKind::TypeAlias,
            DeclKind::GenericTypeParam => DescriptiveDeclKind::GenericTypeParam,
            DeclKind::AssociatedType => DescriptiveDeclKind::AssociatedType,
            DeclKind::Module => DescriptiveDeclKind::Module,
            DeclKind::Param => DescriptiveDeclKind::Parameter,
            DeclKind::Subscript => DescriptiveDeclKind::Subscript,
            DeclKind::Constructor => DescriptiveDeclKind::Initializer,
            DeclKind::Destructor => DescriptiveDeclKind::Deinitializer,
            DeclKind::Accessor => DescriptiveDeclKind::Accessor,
            DeclKind::EnumElement => DescriptiveDeclKind::EnumElement,
            DeclKind::Operator => DescriptiveDeclKind::Operator,
            DeclKind::PrecedenceGroup => DescriptiveDeclKind::PrecedenceGroup,
            DeclKind::Macro => DescriptiveDeclKind::Macro,
            DeclKind::Func => {
                if self.in_type_context() {
                    match self.static_spelling {
                        Some(StaticSpelling::Static) => DescriptiveDeclKind::StaticMethod,
                        Some(StaticSpelling::Class) => DescriptiveDeclKind::ClassMethod,
                        None => DescriptiveDeclKind::InstanceMethod,
                    }
                } else if self.in_local_context() {
                    DescriptiveDeclKind::LocalFunction
                } else {
                    DescriptiveDeclKind::GlobalFunction
                }
            }
            DeclKind::Var => {
                if self.in_type_context() {
                    match self.static_spelling {
                        Some(StaticSpelling::Static) => DescriptiveDeclKind::StaticProperty,
                        Some(StaticSpelling::Class) => DescriptiveDeclKind::ClassProperty,
                        None => DescriptiveDeclKind::Property,
                    }
                } else if self.in_local_context() {
                    DescriptiveDeclKind::LocalVariable
                } else {
                    DescriptiveDeclKind::GlobalVariable
                }
            }
        }
    }

    /// Name used when describing the declaration to users
    ///
    /// Callables render as compound names (`move(to:_:)`), enum-case groups
    /// as the list of their elements.
    pub fn display_name(&self) -> String {
        if self.kind == DeclKind::EnumCase {
            return self
                .members()
                .filter_map(|m| m.name.clone())
                .collect::<Vec<_>>()
                .join(", ");
        }

        let base = match (self.kind, self.name.as_deref()) {
            (_, Some(name)) => name,
            (DeclKind::Constructor, None) => "init",
            (DeclKind::Destructor, None) => "deinit",
            (DeclKind::Subscript, None) => "subscript",
            (_, None) => "",
        };

        let compound = matches!(
            self.kind,
            DeclKind::Func | DeclKind::Constructor | DeclKind::Subscript | DeclKind::Macro
        );

        match &self.params {
            Some(params) if compound => {
                let labels: String = params
                    .iter()
                    .map(|p| format!("{}:", p.label.as_deref().unwrap_or("_")))
                    .collect();
                format!("{}({})", base, labels)
            }
            _ => base.to_string(),
        }
    }
}
