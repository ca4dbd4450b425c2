//! Non-fatal decode conditions
//!
//! A [`Diagnostic`] records something wrong with a file that still left a
//! usable document: an unknown enum value, a table whose counts disagree, an
//! animation node abandoned on an unknown key encoding. Each one is logged
//! through `tracing` when raised and kept on the decoded document.

use serde::Serialize;
use thiserror::Error;

use crate::error::{Error, Result};
use crate::options::DecodeOptions;

/// A condition raised while decoding that did not stop the decode.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("signature mismatch: expected {expected:#010x}, found {found:#010x}")]
    SignatureMismatch { expected: u32, found: u32 },

    #[error("node '{node}': unrecognized {field} value {value}")]
    UnrecognizedEnumValue {
        node: String,
        field: &'static str,
        value: i64,
    },

    #[error("node '{node}': face corners sum to {actual}, header declares {declared}")]
    TotalDegreesMismatch {
        node: String,
        declared: usize,
        actual: usize,
    },

    #[error("node '{node}': {skin} skin entries for {points} points")]
    SkinCountMismatch {
        node: String,
        points: usize,
        skin: usize,
    },

    #[error("node '{node}': unknown {track} count type {count_type}, remaining transform tracks skipped")]
    UnknownCountType {
        node: String,
        track: &'static str,
        count_type: i32,
    },

    #[error("animation kind {kind} carries no node data, only visibility decoded")]
    UnhandledAnimationKind { kind: &'static str },
}

impl Diagnostic {
    /// Whether the condition breaks a structural invariant of a node.
    ///
    /// These are the diagnostics strict decoding turns into errors.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::TotalDegreesMismatch { .. }
                | Self::SkinCountMismatch { .. }
                | Self::UnknownCountType { .. }
        )
    }

    /// Name of the node the diagnostic refers to, if any.
    #[must_use]
    pub fn node(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedEnumValue { node, .. }
            | Self::TotalDegreesMismatch { node, .. }
            | Self::SkinCountMismatch { node, .. }
            | Self::UnknownCountType { node, .. } => Some(node),
            Self::SignatureMismatch { .. } | Self::UnhandledAnimationKind { .. } => None,
        }
    }
}

/// Collects diagnostics for one decode pass.
pub(crate) struct DiagnosticLog<'o> {
    options: &'o DecodeOptions,
    entries: Vec<Diagnostic>,
}

impl<'o> DiagnosticLog<'o> {
    pub(crate) fn new(options: &'o DecodeOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
        }
    }

    /// Record a diagnostic, or fail if strict decoding forbids it.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        if self.options.strict && diagnostic.is_structural() {
            return Err(Error::StructuralInvariant {
                node: diagnostic.node().unwrap_or_default().to_string(),
                message: diagnostic.to_string(),
            });
        }

        if matches!(diagnostic, Diagnostic::UnknownCountType { .. }) {
            tracing::error!("{diagnostic}");
        } else {
            tracing::warn!("{diagnostic}");
        }
        self.entries.push(diagnostic);
        Ok(())
    }

    /// Check the file signature against the exporter's.
    pub(crate) fn check_signature(&mut self, expected: u32, found: u32) -> Result<()> {
        if expected == found {
            return Ok(());
        }
        if self.options.require_signature {
            return Err(Error::InvalidSignature { expected, found });
        }
        self.report(Diagnostic::SignatureMismatch { expected, found })
    }

    pub(crate) fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
