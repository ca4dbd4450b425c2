//! Error types for `EluAni`

use thiserror::Error;

/// The error type for `EluAni` operations.
///
/// Only conditions that stop a whole file from decoding live here. Problems
/// that leave a node usable are reported as [`Diagnostic`]s on the decoded
/// document instead.
///
/// [`Diagnostic`]: crate::diagnostics::Diagnostic
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Byte Stream Errors ====================
    /// A read needed more bytes than the buffer had left.
    #[error("truncated input at offset {offset}: needed {requested} bytes, {available} available")]
    TruncatedInput {
        /// Cursor position when the read was attempted.
        offset: usize,
        /// Number of bytes the read required.
        requested: usize,
        /// Number of bytes left in the buffer.
        available: usize,
    },

    /// A length or count field was negative where a size was expected.
    #[error("negative length {value} at offset {offset}")]
    NegativeLength {
        /// Cursor position just after the length field.
        offset: usize,
        /// The value read.
        value: i32,
    },

    // ==================== ELU Format Errors ====================
    /// The ELU version has no decoder.
    #[error("unsupported ELU version: {version} (supported: 12-18, 20)")]
    UnsupportedEluVersion {
        /// The version number found in the file.
        version: u32,
    },

    // ==================== ANI Format Errors ====================
    /// The ANI version has no decoder.
    #[error("unsupported ANI version: {version} (supported: 1-9, 11, 12)")]
    UnsupportedAniVersion {
        /// The version number found in the file.
        version: u32,
    },

    /// The animation kind in the ANI header is outside the known range.
    #[error("invalid animation kind: {value}")]
    InvalidAnimationKind {
        /// The raw kind value.
        value: i32,
    },

    // ==================== Strict Mode Errors ====================
    /// The signature did not match and `require_signature` was set.
    #[error("invalid signature: expected {expected:#010x}, found {found:#010x}")]
    InvalidSignature {
        /// The exporter signature.
        expected: u32,
        /// The signature read from the file.
        found: u32,
    },

    /// A structural invariant failed and strict decoding was requested.
    #[error("structural invariant violated in node '{node}': {message}")]
    StructuralInvariant {
        /// Name of the node being decoded.
        node: String,
        /// Description of the violated invariant.
        message: String,
    },

    // ==================== Inspection Errors ====================
    /// The path has neither an `.elu` nor an `.ani` extension.
    #[error("unrecognized file type: {path}")]
    UnrecognizedExtension {
        /// The path as given.
        path: String,
    },

    // ==================== Serialization Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `EluAni` operations.
pub type Result<T> = std::result::Result<T, Error>;
