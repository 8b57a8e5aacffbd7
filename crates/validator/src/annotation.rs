//! Deprecation annotations and their warning texts.
//!
//! An annotation is the raw marker attached to a field's metadata. Two forms
//! are recognised:
//!
//! - `removed`: the field goes away with no replacement.
//! - `replaced,<newName>`: the field is superseded by `<newName>`.
//!
//! Whitespace around each comma-separated part is ignored. Anything else is
//! an [`AnnotationError`]; whether that aborts a traversal is decided by
//! [`AnnotationPolicy`](crate::AnnotationPolicy).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Warning text for a field annotated `removed`.
pub const REMOVED_MESSAGE: &str = "This field will be removed in a future version";

const REMOVED: &str = "removed";
const REPLACED: &str = "replaced";

// ============================================================================
// DEPRECATION
// ============================================================================

/// A parsed deprecation annotation.
///
/// # Examples
///
/// ```rust
/// use depwarn::Deprecation;
///
/// let removed: Deprecation = "removed".parse().unwrap();
/// assert_eq!(removed, Deprecation::Removed);
///
/// let replaced = Deprecation::parse("replaced,newField").unwrap();
/// assert_eq!(replaced.replacement(), Some("newField"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Deprecation {
    /// Slated for removal with no replacement.
    Removed,
    /// Deprecated in favour of another field.
    Replaced {
        /// Name of the field that supersedes this one.
        replacement: Cow<'static, str>,
    },
}

impl Deprecation {
    /// Creates a `replaced` annotation pointing at `replacement`.
    pub fn replaced(replacement: impl Into<Cow<'static, str>>) -> Self {
        Self::Replaced {
            replacement: replacement.into(),
        }
    }

    /// Parses a raw annotation string.
    pub fn parse(raw: &str) -> Result<Self, AnnotationError> {
        let mut parts = raw.split(',').map(str::trim);
        // `split` always yields at least one item
        let kind = parts.next().unwrap_or_default();
        let argument = parts.next();
        let extra = parts.next();

        match (kind, argument, extra) {
            ("", None, _) => Err(AnnotationError::Empty),
            (REMOVED, None, _) => Ok(Self::Removed),
            (REMOVED, Some(_), _) => Err(AnnotationError::UnexpectedArgument {
                raw: raw.to_owned(),
            }),
            (REPLACED, None | Some(""), _) => Err(AnnotationError::MissingReplacement {
                raw: raw.to_owned(),
            }),
            (REPLACED, Some(_), Some(_)) => Err(AnnotationError::UnexpectedArgument {
                raw: raw.to_owned(),
            }),
            (REPLACED, Some(name), None) => Ok(Self::replaced(name.to_owned())),
            (other, _, _) => Err(AnnotationError::UnknownKind {
                kind: other.to_owned(),
            }),
        }
    }

    /// Returns the replacement field name, if any.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            Self::Removed => None,
            Self::Replaced { replacement } => Some(replacement),
        }
    }

    /// Renders the warning text for a field carrying this annotation.
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Self::Removed => Cow::Borrowed(REMOVED_MESSAGE),
            Self::Replaced { replacement } => Cow::Owned(format!(
                "This field is deprecated and will be removed in a future version. \
                 Please use '{replacement}' instead"
            )),
        }
    }
}

/// Formats the annotation back into its raw marker form.
impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed => f.write_str(REMOVED),
            Self::Replaced { replacement } => write!(f, "{REPLACED},{replacement}"),
        }
    }
}

impl FromStr for Deprecation {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// A deprecation marker that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    /// The marker is present but blank.
    #[error("deprecation annotation is empty")]
    Empty,

    /// The first part is neither `removed` nor `replaced`.
    #[error("unknown deprecation kind '{kind}' (expected 'removed' or 'replaced,<name>')")]
    UnknownKind {
        /// The unrecognised kind.
        kind: String,
    },

    /// `replaced` without a replacement name.
    #[error("annotation '{raw}' is missing the replacement field name")]
    MissingReplacement {
        /// The raw annotation.
        raw: String,
    },

    /// Extra comma-separated parts.
    #[error("annotation '{raw}' has unexpected arguments")]
    UnexpectedArgument {
        /// The raw annotation.
        raw: String,
    },
}
