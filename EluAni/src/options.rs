//! Decode options for ELU and ANI files
//!
//! The defaults match how the game's own loader treats damaged files: a
//! wrong signature or an inconsistent table is reported and decoding goes on.

/// Options controlling how strictly a file is decoded.
///
/// # Example
///
/// ```
/// use eluani::DecodeOptions;
///
/// // Reject anything the lenient decoder would only diagnose
/// let options = DecodeOptions::strict();
///
/// // Or configure individually
/// let options = DecodeOptions::new()
///     .with_strict(false)
///     .with_require_signature(true);
/// assert!(options.require_signature);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Turn structural invariant violations into
    /// [`Error::StructuralInvariant`](crate::Error::StructuralInvariant)
    /// instead of recording a diagnostic.
    pub strict: bool,

    /// Fail with [`Error::InvalidSignature`](crate::Error::InvalidSignature)
    /// when the exporter signature does not match.
    pub require_signature: bool,
}

impl DecodeOptions {
    /// Create lenient options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strict: false,
            require_signature: false,
        }
    }

    /// Create options with every check promoted to an error.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            require_signature: true,
        }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_require_signature(mut self, require: bool) -> Self {
        self.require_signature = require;
        self
    }
}
