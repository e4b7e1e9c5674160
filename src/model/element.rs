/// Code element tree types
use std::fmt;

/// Access level of a declaration.
///
/// `ProtectedInternal` covers the combined `protected internal` form; a
/// declaration with no access keyword is `NotSpecified` and re-emitted
/// without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeAccess {
    #[default]
    NotSpecified,
    Public,
    ProtectedInternal,
    Internal,
    Protected,
    Private,
}

impl CodeAccess {
    /// Keyword text for the writer; empty for `NotSpecified`.
    #[must_use]
    pub fn keywords(self) -> &'static str {
        match self {
            CodeAccess::NotSpecified => "",
            CodeAccess::Public => "public",
            CodeAccess::ProtectedInternal => "protected internal",
            CodeAccess::Internal => "internal",
            CodeAccess::Protected => "protected",
            CodeAccess::Private => "private",
        }
    }

    /// Rank used when sorting by access (public first, private last).
    #[must_use]
    pub fn sort_rank(self) -> usize {
        match self {
            CodeAccess::Public => 0,
            CodeAccess::ProtectedInternal => 1,
            CodeAccess::Internal => 2,
            CodeAccess::Protected => 3,
            CodeAccess::Private => 4,
            CodeAccess::NotSpecified => 5,
        }
    }

    /// Display name used in region name templates (`$(Access)`).
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            CodeAccess::NotSpecified => "Other",
            CodeAccess::Public => "Public",
            CodeAccess::ProtectedInternal => "Protected Internal",
            CodeAccess::Internal => "Internal",
            CodeAccess::Protected => "Protected",
            CodeAccess::Private => "Private",
        }
    }
}

impl fmt::Display for CodeAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Category of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
}

impl TypeKind {
    /// The declaration keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Separator emitted by a synthetic group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupSeparatorType {
    /// A single blank line between this group and the previous sibling.
    #[default]
    None,
    /// The group's `custom_separator` text, emitted verbatim.
    Custom,
}

/// Property-specific fields beyond the shared element state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDetails {
    /// Indexer signature (the text between `[` and `]` of `this[...]`).
    pub index_parameter: Option<String>,
    /// True for `Type Name => expr;` properties.
    pub is_expression_bodied: bool,
    /// The expression text; set iff `is_expression_bodied`.
    pub expression_body: Option<String>,
    /// Normalized accessor list (e.g. `get; set;`) when the property is
    /// auto-implemented, i.e. no accessor has a body.
    pub auto_accessors: Option<String>,
    /// Inline initializer of an auto property (`{ get; } = "x";`).
    pub auto_initializer: Option<String>,
}

/// Per-variant payload of a code element.
///
/// Body and expression texts are captured verbatim from the source, including
/// braces and interior newlines, so the writer can reproduce them exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Using {
        /// Alias target for `using Alias = Some.Type;`.
        alias: Option<String>,
        is_static: bool,
    },
    Namespace,
    Type {
        kind: TypeKind,
        /// Generic parameter list including angle brackets (`<T, U>`).
        type_params: Option<String>,
        /// Everything between the name/generics and the opening brace:
        /// base list with its leading colon, plus `where` constraints.
        base_list: Option<String>,
        /// Verbatim brace block for enums, whose members are not modeled.
        body: Option<String>,
    },
    Field {
        type_name: String,
        /// Initializer expression text after `=`, verbatim.
        initializer: Option<String>,
    },
    Property {
        type_name: String,
        details: PropertyDetails,
        /// Verbatim accessor block for non-auto, non-expression properties.
        body: Option<String>,
    },
    Method {
        return_type: String,
        type_params: Option<String>,
        /// Parameter list text between the parentheses.
        params: String,
        /// `where` constraint clauses.
        constraints: Option<String>,
        /// Verbatim brace block; `None` for abstract/interface signatures.
        body: Option<String>,
        expression_body: Option<String>,
    },
    Constructor {
        params: String,
        /// `: base(...)` / `: this(...)` initializer text.
        initializer: Option<String>,
        body: String,
    },
    Destructor {
        body: String,
    },
    Event {
        type_name: String,
        /// Verbatim add/remove block for custom-accessor events.
        body: Option<String>,
    },
    Delegate {
        return_type: String,
        params: String,
    },
    /// A preserved comment block with no following declaration in its scope.
    Comment { text: String },
    /// Synthetic container produced only by the arranger. Has no source-text
    /// identity; the writer emits its separator and children only.
    Group {
        separator: GroupSeparatorType,
        custom_separator: Option<String>,
        /// When set, the writer wraps the children in a region of this name.
        region_name: Option<String>,
    },
}

impl ElementKind {
    /// Stable name used by configuration rules to select element kinds.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            ElementKind::Using { .. } => "using",
            ElementKind::Namespace => "namespace",
            ElementKind::Type { .. } => "type",
            ElementKind::Field { .. } => "field",
            ElementKind::Property { .. } => "property",
            ElementKind::Method { .. } => "method",
            ElementKind::Constructor { .. } => "constructor",
            ElementKind::Destructor { .. } => "destructor",
            ElementKind::Event { .. } => "event",
            ElementKind::Delegate { .. } => "delegate",
            ElementKind::Comment { .. } => "comment",
            ElementKind::Group { .. } => "group",
        }
    }

    /// Display name used in region name templates (`$(ElementType)`).
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Using { .. } => "Usings",
            ElementKind::Namespace => "Namespaces",
            ElementKind::Type { .. } => "Types",
            ElementKind::Field { .. } => "Fields",
            ElementKind::Property { .. } => "Properties",
            ElementKind::Method { .. } => "Methods",
            ElementKind::Constructor { .. } => "Constructors",
            ElementKind::Destructor { .. } => "Destructors",
            ElementKind::Event { .. } => "Events",
            ElementKind::Delegate { .. } => "Delegates",
            ElementKind::Comment { .. } => "Comments",
            ElementKind::Group { .. } => "Groups",
        }
    }
}

/// One node of the element tree.
///
/// Children are owned by value in declaration order; after arrangement the
/// order is the arranged order. There are no parent back-references: every
/// mutation site holds `&mut` on the parent whose children it reorganizes.
/// `Clone` is a structural deep copy: owned children mean clones never share
/// subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeElement {
    pub name: String,
    pub access: CodeAccess,
    /// Non-access modifiers in source order (`static`, `readonly`, ...).
    pub modifiers: Vec<String>,
    /// Preserved leading text: comments, XML docs, attributes, preprocessor
    /// lines and blank-line runs, verbatim.
    pub header_text: String,
    /// Leading whitespace columns of the declaration in the source, used to
    /// shift verbatim bodies when the element changes nesting depth.
    pub source_indent: usize,
    /// Comment on the same line after the element's terminating token.
    pub trailing_comment: Option<String>,
    pub children: Vec<CodeElement>,
    pub kind: ElementKind,
}

impl CodeElement {
    /// Create an element with the given kind and name; everything else empty.
    #[must_use]
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: CodeAccess::NotSpecified,
            modifiers: Vec::new(),
            header_text: String::new(),
            source_indent: 0,
            trailing_comment: None,
            children: Vec::new(),
            kind,
        }
    }

    /// Create a synthetic group with the default (blank line) separator.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(
            ElementKind::Group {
                separator: GroupSeparatorType::None,
                custom_separator: None,
                region_name: None,
            },
            name,
        )
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group { .. })
    }

    /// Whether the element carries the `static` modifier.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }

    pub fn add_child(&mut self, child: CodeElement) {
        self.children.push(child);
    }
}
