//! Program model consumed by the checker
//!
//! This module describes the declaration tree of a compiled module:
//! - Closed sets of declaration kinds and access levels
//! - An arena-backed tree with parent links and resolved cross references
//! - Lightweight `DeclRef` handles handed to visitors
//! - Loading of JSON declaration dumps

mod decl;
mod load;

pub use decl::{DeclId, DeclRef, DeclTree, Declaration, Parameter, Signature};
pub use load::{DeclSpec, ModuleSpec};

use serde::{Deserialize, Serialize};

/// Access level of a declaration, ordered from most to least restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Private,
    FilePrivate,
    Internal,
    Package,
    Public,
    Open,
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessLevel::Private => write!(f, "private"),
            AccessLevel::FilePrivate => write!(f, "fileprivate"),
            AccessLevel::Internal => write!(f, "internal"),
            AccessLevel::Package => write!(f, "package"),
            AccessLevel::Public => write!(f, "public"),
            AccessLevel::Open => write!(f, "open"),
        }
    }
}

/// Kind of a declaration node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Import,
    Extension,
    TopLevelCode,
    PatternBinding,
    EnumCase,
    Enum,
    Struct,
    Class,
    Actor,
    Protocol,
    TypeAlias,
    GenericTypeParam,
    AssociatedType,
    Module,
    Param,
    Var,
    Subscript,
    Constructor,
    Destructor,
    Func,
    Accessor,
    EnumElement,
    Operator,
    PrecedenceGroup,
    Macro,
}

impl DeclKind {
    /// Whether this kind introduces a nominal type
    pub fn is_nominal_type(&self) -> bool {
        matches!(
            self,
            DeclKind::Enum | DeclKind::Struct | DeclKind::Class | DeclKind::Actor | DeclKind::Protocol
        )
    }

    /// Whether members of this kind live in a type context
    pub fn is_type_context(&self) -> bool {
        self.is_nominal_type() || *self == DeclKind::Extension
    }

    /// Whether declarations of this kind introduce a local scope
    pub fn is_local_context(&self) -> bool {
        matches!(
            self,
            DeclKind::Func
                | DeclKind::Constructor
                | DeclKind::Destructor
                | DeclKind::Accessor
                | DeclKind::Subscript
                | DeclKind::TopLevelCode
        )
    }

    /// Stable snake_case identifier, matching the dump format
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Import => "import",
            DeclKind::Extension => "extension",
            DeclKind::TopLevelCode => "top_level_code",
            DeclKind::PatternBinding => "pattern_binding",
            DeclKind::EnumCase => "enum_case",
            DeclKind::Enum => "enum",
            DeclKind::Struct => "struct",
            DeclKind::Class => "class",
            DeclKind::Actor => "actor",
            DeclKind::Protocol => "protocol",
            DeclKind::TypeAlias => "type_alias",
            DeclKind::GenericTypeParam => "generic_type_param",
            DeclKind::AssociatedType => "associated_type",
            DeclKind::Module => "module",
            DeclKind::Param => "param",
            DeclKind::Var => "var",
            DeclKind::Subscript => "subscript",
            DeclKind::Constructor => "constructor",
            DeclKind::Destructor => "destructor",
            DeclKind::Func => "func",
            DeclKind::Accessor => "accessor",
            DeclKind::EnumElement => "enum_element",
            DeclKind::Operator => "operator",
            DeclKind::PrecedenceGroup => "precedence_group",
            DeclKind::Macro => "macro",
        }
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `static` or `class` spelling on a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticSpelling {
    Static,
    Class,
}

/// Human-facing kind label used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptiveDeclKind {
    Import,
    Extension,
    TopLevelCode,
    PatternBinding,
    EnumCase,
    Enum,
    Struct,
    Class,
    Actor,
    Protocol,
    TypeAlias,
    GenericTypeParam,
    AssociatedType,
    Module,
    Parameter,
    GlobalVariable,
    LocalVariable,
    Property,
    StaticProperty,
    ClassProperty,
    Subscript,
    Initializer,
    Deinitializer,
    GlobalFunction,
    LocalFunction,
    InstanceMethod,
    StaticMethod,
    ClassMethod,
    Accessor,
    EnumElement,
    Operator,
    PrecedenceGroup,
    Macro,
}

impl std::fmt::Display for DescriptiveDeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DescriptiveDeclKind::Import => "import",
            DescriptiveDeclKind::Extension => "extension",
            DescriptiveDeclKind::TopLevelCode => "top-level code",
            DescriptiveDeclKind::PatternBinding => "pattern binding",
            DescriptiveDeclKind::EnumCase => "enum case",
            DescriptiveDeclKind::Enum => "enum",
            DescriptiveDeclKind::Struct => "struct",
            DescriptiveDeclKind::Class => "class",
            DescriptiveDeclKind::Actor => "actor",
            DescriptiveDeclKind::Protocol => "protocol",
            DescriptiveDeclKind::TypeAlias => "type alias",
            DescriptiveDeclKind::GenericTypeParam => "generic parameter",
            DescriptiveDeclKind::AssociatedType => "associated type",
            DescriptiveDeclKind::Module => "module",
            DescriptiveDeclKind::Parameter => "parameter",
            DescriptiveDeclKind::GlobalVariable => "global variable",
            DescriptiveDeclKind::LocalVariable => "local variable",
            DescriptiveDeclKind::Property => "property",
            DescriptiveDeclKind::StaticProperty => "static property",
            DescriptiveDeclKind::ClassProperty => "class property",
            DescriptiveDeclKind::Subscript => "subscript",
            DescriptiveDeclKind::Initializer => "initializer",
            DescriptiveDeclKind::Deinitializer => "deinitializer",
            DescriptiveDeclKind::GlobalFunction => "global function",
            DescriptiveDeclKind::LocalFunction => "local function",
            DescriptiveDeclKind::InstanceMethod => "instance method",
            DescriptiveDeclKind::StaticMethod => "static method",
            DescriptiveDeclKind::ClassMethod => "class method",
            DescriptiveDeclKind::Accessor => "accessor",
            DescriptiveDeclKind::EnumElement => "enum element",
            DescriptiveDeclKind::Operator => "operator",
            DescriptiveDeclKind::PrecedenceGroup => "precedence group",
            DescriptiveDeclKind::Macro => "macro",
        };
        f.write_str(label)
    }
}

/// A position in a source file (1-based line and column)
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLoc {
    /// File path as recorded by the dump
    #[serde(default)]
    pub file: String,
    /// Line number
    #[serde(default)]
    pub line: u32,
    /// Column number
    #[serde(default)]
    pub column: u32,
}

impl SourceLoc {
    /// Create a new source location
    pub fn new(file: &str, line: u32, column: u32) -> Self {
        Self {
            file: file.to_string(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A half-open character range in a source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourceLoc,
    pub end: SourceLoc,
}

impl SourceRange {
    /// An empty range positioned at `loc`
    pub fn point(loc: &SourceLoc) -> Self {
        Self {
            start: loc.clone(),
            end: loc.clone(),
        }
    }
}
