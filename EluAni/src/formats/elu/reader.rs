//! `.elu` file reading and parsing

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::steps::read_node;
use super::{ELU_SIGNATURE, EluDocument, EluHeader, EluVersion};
use crate::diagnostics::DiagnosticLog;
use crate::error::{Error, Result};
use crate::formats::common::ByteCursor;
use crate::options::DecodeOptions;

/// Read an .elu file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, and any
/// error of [`parse_elu_bytes`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_elu<P: AsRef<Path>>(path: P) -> Result<EluDocument> {
    read_elu_with(path, &DecodeOptions::default())
}

/// Read an .elu file from disk with explicit options
///
/// # Errors
///
/// See [`read_elu`] and [`parse_elu_bytes_with`].
pub fn read_elu_with<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<EluDocument> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    parse_elu_bytes_with(&buffer, options)
}

/// Parse .elu data from bytes
///
/// # Errors
///
/// Returns [`Error::UnsupportedEluVersion`] before any node is read when the
/// version has no decoder, and [`Error::TruncatedInput`] when the data ends
/// inside a record.
///
/// [`Error::UnsupportedEluVersion`]: crate::Error::UnsupportedEluVersion
/// [`Error::TruncatedInput`]: crate::Error::TruncatedInput
pub fn parse_elu_bytes(data: &[u8]) -> Result<EluDocument> {
    parse_elu_bytes_with(data, &DecodeOptions::default())
}

/// Parse .elu data from bytes with explicit options
///
/// # Errors
///
/// As [`parse_elu_bytes`], plus [`Error::InvalidSignature`] and
/// [`Error::StructuralInvariant`] when the options ask for them.
///
/// [`Error::InvalidSignature`]: crate::Error::InvalidSignature
/// [`Error::StructuralInvariant`]: crate::Error::StructuralInvariant
pub fn parse_elu_bytes_with(data: &[u8], options: &DecodeOptions) -> Result<EluDocument> {
    let mut cursor = ByteCursor::new(data);
    let mut log = DiagnosticLog::new(options);

    let header = EluHeader {
        signature: cursor.read_u32()?,
        version: cursor.read_u32()?,
        material_count: cursor.read_i32()?,
        mesh_count: cursor.read_i32()?,
    };
    log.check_signature(ELU_SIGNATURE, header.signature)?;
    let version = EluVersion::from_raw(header.version)?;
    let node_count = usize::try_from(header.mesh_count).map_err(|_| Error::NegativeLength {
        offset: cursor.position(),
        value: header.mesh_count,
    })?;

    tracing::debug!(
        "Decoding ELU v{} ({} nodes, {} materials)",
        header.version,
        node_count,
        header.material_count
    );

    let steps = version.steps();
    let mut nodes = Vec::new();
    for index in 0..node_count {
        let node = read_node(&mut cursor, steps, &mut log)?;
        tracing::debug!(
            "Node {}: '{}' ({} points, {} polygons, {} bones)",
            index,
            node.name,
            node.points.len(),
            node.polygons.len(),
            node.bones.len()
        );
        nodes.push(node);
    }

    if cursor.remaining() > 0 {
        tracing::debug!("{} trailing bytes after the last node", cursor.remaining());
    }

    Ok(EluDocument {
        header,
        version,
        nodes,
        diagnostics: log.into_entries(),
    })
}
