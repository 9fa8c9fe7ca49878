use std::ops::Range;

use crate::schema::SourceId;

/// Diagnostic kinds ordered by priority (highest priority first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexing and structure
    UnexpectedCharacter,
    UnclosedBlock,

    // User omitted something required
    ExpectedName,
    ExpectedType,
    ExpectedLiteral,
    ExpectedToken,

    // User wrote something that doesn't belong
    UnexpectedToken,
    UnknownAttribute,
    DuplicatePackage,

    // Valid syntax, invalid semantics
    DuplicateDefinition,
    DuplicateMember,
    UndefinedReference,
    AmbiguousReference,
    AliasCycle,
    InvalidEnumBase,
    LiteralKindMismatch,

    // Suspicious but accepted
    EmptyEnum,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::EmptyEnum => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        *self <= Self::DuplicatePackage
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownAttribute => Some("known attributes: `@skip`, `@optional`, `@rename(\"name\")`"),
            Self::InvalidEnumBase => Some("enums are backed by `int`, `uint`, `float` or `string`"),
            Self::AmbiguousReference => Some("qualify the name with its package, e.g. `models.User`"),
            Self::EmptyEnum => Some("an enum without variants is inlined as its base type"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnclosedBlock => "missing closing `}`",

            Self::ExpectedName => "expected a name",
            Self::ExpectedType => "expected a type",
            Self::ExpectedLiteral => "expected a literal",
            Self::ExpectedToken => "expected token",

            Self::UnexpectedToken => "unexpected token",
            Self::UnknownAttribute => "unknown attribute",
            Self::DuplicatePackage => "package is already declared",

            Self::DuplicateDefinition => "duplicate definition",
            Self::DuplicateMember => "duplicate member",
            Self::UndefinedReference => "undefined reference",
            Self::AmbiguousReference => "ambiguous reference",
            Self::AliasCycle => "alias refers to itself",
            Self::InvalidEnumBase => "invalid enum base type",
            Self::LiteralKindMismatch => "literal does not fit the enum base type",

            Self::EmptyEnum => "enum has no variants",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::ExpectedToken => "expected {}".to_string(),
            Self::DuplicateDefinition => "`{}` is already defined".to_string(),
            Self::DuplicateMember => "member `{}` is already defined".to_string(),
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::AmbiguousReference => "`{}` is defined in more than one package".to_string(),
            Self::AliasCycle => "alias `{}` refers to itself".to_string(),
            Self::UnknownAttribute => "unknown attribute `@{}`".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) source: SourceId,
    pub(crate) range: Range<usize>,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Which source this diagnostic belongs to.
    pub(crate) source: SourceId,
    /// Byte range underlined in output.
    pub(crate) range: Range<usize>,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(source: SourceId, kind: DiagnosticKind, range: Range<usize>) -> Self {
        Self {
            kind,
            source,
            range,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
            hints: kind.default_hint().map(str::to_string).into_iter().collect(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.range.start,
            self.range.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.range.start, related.range.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
