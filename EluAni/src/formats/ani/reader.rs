//! `.ani` file reading and parsing

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{ANI_SIGNATURE, AniDocument, AniHeader, AniNode, AniVersion, AnimationKind, ROOT_BONE_NAME};
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::error::{Error, Result};
use crate::formats::common::ByteCursor;
use crate::options::DecodeOptions;

/// Read an .ani file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, and any
/// error of [`parse_ani_bytes`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_ani<P: AsRef<Path>>(path: P) -> Result<AniDocument> {
    read_ani_with(path, &DecodeOptions::default())
}

/// Read an .ani file from disk with explicit options
///
/// # Errors
///
/// See [`read_ani`] and [`parse_ani_bytes_with`].
pub fn read_ani_with<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<AniDocument> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    parse_ani_bytes_with(&buffer, options)
}

/// Parse .ani data from bytes
///
/// A bone whose keys use an unknown encoding is recorded as a diagnostic
/// and left incomplete; its visibility record and the following nodes are
/// still decoded.
///
/// # Errors
///
/// Returns [`Error::UnsupportedAniVersion`], then [`Error::InvalidAnimationKind`],
/// before any node is read, and [`Error::TruncatedInput`] when the data ends
/// inside a record.
///
/// [`Error::UnsupportedAniVersion`]: crate::Error::UnsupportedAniVersion
/// [`Error::InvalidAnimationKind`]: crate::Error::InvalidAnimationKind
/// [`Error::TruncatedInput`]: crate::Error::TruncatedInput
pub fn parse_ani_bytes(data: &[u8]) -> Result<AniDocument> {
    parse_ani_bytes_with(data, &DecodeOptions::default())
}

/// Parse .ani data from bytes with explicit options
///
/// # Errors
///
/// As [`parse_ani_bytes`], plus [`Error::InvalidSignature`] and
/// [`Error::StructuralInvariant`] when the options ask for them.
///
/// [`Error::InvalidSignature`]: crate::Error::InvalidSignature
/// [`Error::StructuralInvariant`]: crate::Error::StructuralInvariant
pub fn parse_ani_bytes_with(data: &[u8], options: &DecodeOptions) -> Result<AniDocument> {
    let mut cursor = ByteCursor::new(data);
    let mut log = DiagnosticLog::new(options);

    let signature = cursor.read_u32()?;
    let raw_version = cursor.read_u32()?;
    let max_frame = cursor.read_i32()?;
    let model_count = cursor.read_i32()?;
    let raw_kind = cursor.read_i32()?;

    log.check_signature(ANI_SIGNATURE, signature)?;
    let version = AniVersion::from_raw(raw_version)?;
    let kind = AnimationKind::from_raw(raw_kind)?;
    let header = AniHeader {
        signature,
        version: raw_version,
        max_frame,
        model_count,
        kind,
    };
    let node_count = usize::try_from(model_count).map_err(|_| Error::NegativeLength {
        offset: cursor.position(),
        value: model_count,
    })?;

    tracing::debug!(
        "Decoding ANI v{} ({} {} nodes, max frame {})",
        raw_version,
        node_count,
        kind,
        max_frame
    );

    if matches!(kind, AnimationKind::Transform | AnimationKind::Tm) {
        log.report(Diagnostic::UnhandledAnimationKind { kind: kind.name() })?;
    }

    let steps = version.steps();
    let mut nodes = Vec::new();
    for index in 0..node_count {
        let mut node = AniNode::default();
        match kind {
            AnimationKind::Vertex => (steps.vertex)(&mut cursor, &mut node, &mut log, raw_version)?,
            AnimationKind::Bone => (steps.bone)(&mut cursor, &mut node, &mut log, raw_version)?,
            AnimationKind::Transform | AnimationKind::Tm => {}
        }

        // The visibility record follows wherever the node's tracks stopped,
        // including after an abandoned bone.
        (steps.visibility)(&mut cursor, &mut node, &mut log, raw_version)?;
        tracing::debug!(
            "Node {}: '{}' ({} visibility keys{})",
            index,
            node.name,
            node.visibility.len(),
            if node.incomplete { ", incomplete" } else { "" }
        );

        if node.name == ROOT_BONE_NAME {
            tracing::debug!("Found skeleton root at node {}", index);
        }
        nodes.push(node);
    }

    if cursor.remaining() > 0 {
        tracing::debug!("{} trailing bytes after the last node", cursor.remaining());
    }

    Ok(AniDocument {
        header,
        version,
        nodes,
        diagnostics: log.into_entries(),
    })
}
