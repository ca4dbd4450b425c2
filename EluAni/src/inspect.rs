//! Document inspection
//!
//! Compact, serializable summaries of decoded ELU and ANI files, used by the
//! `inspect` and `json` commands.

use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::ani::{AniDocument, AniNode, AniNodeData, AnimationKind, parse_ani_bytes_with};
use crate::formats::elu::{EluDocument, EluNode, parse_elu_bytes_with};
use crate::options::DecodeOptions;

/// Which decoder a file needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetKind {
    Elu,
    Ani,
}

impl AssetKind {
    /// Pick the decoder from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "elu" => Some(Self::Elu),
            "ani" => Some(Self::Ani),
            _ => None,
        }
    }
}

/// Summary of one mesh node.
#[derive(Debug, Clone, Serialize)]
pub struct EluNodeInfo {
    pub name: String,
    pub parent: Option<String>,
    pub points: usize,
    pub polygons: usize,
    pub triangles: usize,
    pub bones: usize,
    pub skinned: bool,
    pub dummy: bool,
}

impl From<&EluNode> for EluNodeInfo {
    fn from(node: &EluNode) -> Self {
        Self {
            name: node.name.clone(),
            parent: (!node.parent_name.is_empty()).then(|| node.parent_name.clone()),
            points: node.points.len(),
            polygons: node.polygons.len(),
            triangles: node.total_triangles,
            bones: node.bones.len(),
            skinned: node.is_skinned(),
            dummy: node.is_dummy(),
        }
    }
}

/// Summary of an ELU file.
#[derive(Debug, Clone, Serialize)]
pub struct EluSummary {
    pub file_size: usize,
    pub version: u32,
    pub material_count: i32,
    pub nodes: Vec<EluNodeInfo>,
    pub diagnostics: Vec<String>,
}

impl EluSummary {
    #[must_use]
    pub fn from_document(doc: &EluDocument, file_size: usize) -> Self {
        Self {
            file_size,
            version: doc.header.version,
            material_count: doc.header.material_count,
            nodes: doc.nodes.iter().map(EluNodeInfo::from).collect(),
            diagnostics: doc.diagnostics.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn total_points(&self) -> usize {
        self.nodes.iter().map(|n| n.points).sum()
    }
}

/// Summary of one animation node.
#[derive(Debug, Clone, Serialize)]
pub struct AniNodeInfo {
    pub name: String,
    pub parent: Option<String>,
    pub position_keys: usize,
    pub rotation_keys: usize,
    pub scale_keys: usize,
    pub vertex_frames: usize,
    pub visibility_keys: usize,
    pub incomplete: bool,
}

impl From<&AniNode> for AniNodeInfo {
    fn from(node: &AniNode) -> Self {
        let mut info = Self {
            name: node.name.clone(),
            parent: None,
            position_keys: 0,
            rotation_keys: 0,
            scale_keys: 0,
            vertex_frames: 0,
            visibility_keys: node.visibility.len(),
            incomplete: node.incomplete,
        };
        match &node.data {
            AniNodeData::Bone(bone) => {
                info.parent = (!bone.parent_name.is_empty()).then(|| bone.parent_name.clone());
                info.position_keys = bone.position.declared_count;
                info.rotation_keys = bone.rotation.declared_count;
                info.scale_keys = bone.scale.declared_count;
            }
            AniNodeData::Vertex(vertex) => info.vertex_frames = vertex.frames.len(),
            AniNodeData::Empty => {}
        }
        info
    }
}

/// Summary of an ANI file.
#[derive(Debug, Clone, Serialize)]
pub struct AniSummary {
    pub file_size: usize,
    pub version: u32,
    pub kind: AnimationKind,
    pub max_frame: i32,
    pub root: Option<String>,
    pub nodes: Vec<AniNodeInfo>,
    pub diagnostics: Vec<String>,
}

impl AniSummary {
    #[must_use]
    pub fn from_document(doc: &AniDocument, file_size: usize) -> Self {
        Self {
            file_size,
            version: doc.header.version,
            kind: doc.header.kind,
            max_frame: doc.header.max_frame,
            root: doc.root_node().map(|n| n.name.clone()),
            nodes: doc.nodes.iter().map(AniNodeInfo::from).collect(),
            diagnostics: doc.diagnostics.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Summary of either file type.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum FileSummary {
    Elu(EluSummary),
    Ani(AniSummary),
}

impl FileSummary {
    pub fn diagnostics(&self) -> &[String] {
        match self {
            Self::Elu(s) => &s.diagnostics,
            Self::Ani(s) => &s.diagnostics,
        }
    }

    /// Pretty-printed JSON form of the summary.
    ///
    /// # Errors
    /// Returns [`Error::JsonError`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Decode bytes of a known kind and summarize them.
///
/// # Errors
/// Returns any decode error for the data.
pub fn inspect_bytes(data: &[u8], kind: AssetKind, options: &DecodeOptions) -> Result<FileSummary> {
    Ok(match kind {
        AssetKind::Elu => FileSummary::Elu(EluSummary::from_document(
            &parse_elu_bytes_with(data, options)?,
            data.len(),
        )),
        AssetKind::Ani => FileSummary::Ani(AniSummary::from_document(
            &parse_ani_bytes_with(data, options)?,
            data.len(),
        )),
    })
}

/// Decode a file, choosing the format by extension, and summarize it.
///
/// # Errors
/// Returns [`Error::UnrecognizedExtension`] for files that are neither
/// `.elu` nor `.ani`, [`Error::Io`] if the file cannot be read, and any
/// decode error.
pub fn inspect_file<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<FileSummary> {
    let path = path.as_ref();
    let kind = AssetKind::from_path(path).ok_or_else(|| Error::UnrecognizedExtension {
        path: path.display().to_string(),
    })?;
    let data = std::fs::read(path)?;
    inspect_bytes(&data, kind, options)
}
