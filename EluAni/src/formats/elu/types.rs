//! ELU document model

use serde::Serialize;

use super::version::EluVersion;
use super::MESH_FLAG_DUMMY;
use crate::diagnostics::Diagnostic;
use crate::formats::common::{BoundingBox, Matrix4};

/// Fixed 16-byte ELU file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EluHeader {
    pub signature: u32,
    pub version: u32,
    pub material_count: i32,
    pub mesh_count: i32,
}

/// How a mesh node orients itself relative to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MeshAlign {
    #[default]
    None,
    /// Billboard facing the view direction.
    Normal,
    /// Billboard rotating around the Z axis only.
    ZFixed,
}

impl MeshAlign {
    #[must_use]
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Normal),
            2 => Some(Self::ZFixed),
            _ => None,
        }
    }
}

/// Per-corner or per-vertex index set into the node's geometry streams.
///
/// `uv2` is `None` for files older than version 15, which have no secondary
/// UV channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VertexIndex {
    pub position: u16,
    pub normal: u16,
    pub uv: u16,
    pub uv2: Option<u16>,
    pub tangent: u16,
    pub bitangent: u16,
}

/// One polygon of the face table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub corners: Vec<VertexIndex>,
    pub material_id: i16,
}

/// One bone influence on a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinInfluence {
    pub bone: u16,
    /// Parent bone id stored beside the bone index.
    pub parent: u16,
    pub weight: f32,
}

/// Bone influences for one point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkinWeights {
    pub influences: Vec<SkinInfluence>,
}

impl SkinWeights {
    /// Sum of all influence weights.
    #[must_use]
    pub fn total_weight(&self) -> f32 {
        self.influences.iter().map(|i| i.weight).sum()
    }

    /// Copy with weights scaled to sum to 1.0.
    ///
    /// Returns the weights unchanged when they sum to zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.total_weight();
        if total <= 0.0 {
            return self.clone();
        }
        Self {
            influences: self
                .influences
                .iter()
                .map(|i| SkinInfluence {
                    weight: i.weight / total,
                    ..*i
                })
                .collect(),
        }
    }

    /// Keep the `max` heaviest influences, renormalized.
    ///
    /// Ordering is the exporter's exchange sort: each slot is swapped with
    /// any later, strictly heavier influence, which decides which of several
    /// tied weights survive. Weights with `max` or fewer influences are
    /// returned unchanged.
    #[must_use]
    pub fn capped(&self, max: usize) -> Self {
        if self.influences.len() <= max {
            return self.clone();
        }
        let mut influences = self.influences.clone();
        for m in 0..influences.len() {
            for n in m + 1..influences.len() {
                if influences[m].weight < influences[n].weight {
                    influences.swap(m, n);
                }
            }
        }
        influences.truncate(max);
        Self { influences }.normalized()
    }
}

/// Draw range of one material in the face index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterialInfo {
    pub material_id: i32,
    pub offset: u16,
    pub count: u16,
    /// Sub-material used for draw masking.
    pub masking_id: i32,
}

/// One decoded mesh node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EluNode {
    pub name: String,
    pub parent_name: String,
    /// Index of the parent node, -1 for roots.
    pub parent_id: i32,
    pub local_matrix: Matrix4,
    pub flags: u32,
    pub align: MeshAlign,
    pub base_visibility: f32,
    pub lod_index: i32,
    /// Light-map id of version 15-17 files.
    pub light_map_id: Option<i32>,

    pub points: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Tangents with handedness in `w`; 1.0 for files storing three floats.
    pub tangents: Vec<[f32; 4]>,
    pub bitangents: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 3]>,
    pub extra_uvs: Vec<[f32; 3]>,

    pub total_degrees: usize,
    pub total_triangles: usize,
    pub polygons: Vec<Polygon>,

    pub point_colors: Vec<[f32; 3]>,
    pub material_id: i32,
    pub skin: Vec<SkinWeights>,

    pub bones: Vec<Matrix4>,
    pub bone_indices: Vec<u16>,
    pub vertex_indices: Vec<VertexIndex>,
    pub primitive_type: i32,
    pub face_indices: Vec<u16>,
    pub material_infos: Vec<MaterialInfo>,
    pub bounds: Option<BoundingBox>,
}

impl Default for EluNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            parent_name: String::new(),
            parent_id: -1,
            local_matrix: Matrix4::IDENTITY,
            flags: 0,
            align: MeshAlign::None,
            base_visibility: 1.0,
            lod_index: 0,
            light_map_id: None,
            points: Vec::new(),
            normals: Vec::new(),
            tangents: Vec::new(),
            bitangents: Vec::new(),
            uvs: Vec::new(),
            extra_uvs: Vec::new(),
            total_degrees: 0,
            total_triangles: 0,
            polygons: Vec::new(),
            point_colors: Vec::new(),
            material_id: 0,
            skin: Vec::new(),
            bones: Vec::new(),
            bone_indices: Vec::new(),
            vertex_indices: Vec::new(),
            primitive_type: 0,
            face_indices: Vec::new(),
            material_infos: Vec::new(),
            bounds: None,
        }
    }
}

impl EluNode {
    /// Whether the node carries no drawable geometry.
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.flags & MESH_FLAG_DUMMY != 0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id < 0 && self.parent_name.is_empty()
    }

    #[must_use]
    pub fn is_skinned(&self) -> bool {
        !self.skin.is_empty()
    }

    /// Triangle count of the flat index buffer.
    #[must_use]
    pub fn index_triangle_count(&self) -> usize {
        self.face_indices.len() / 3
    }
}

/// A fully decoded ELU file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EluDocument {
    pub header: EluHeader,
    pub version: EluVersion,
    pub nodes: Vec<EluNode>,
    pub diagnostics: Vec<Diagnostic>,
}

impl EluDocument {
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<&EluNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Parent of `node`, looked up by name.
    #[must_use]
    pub fn parent_of(&self, node: &EluNode) -> Option<&EluNode> {
        if node.parent_name.is_empty() {
            return None;
        }
        self.node_by_name(&node.parent_name)
    }

    /// Nodes whose parent is `name`.
    pub fn children_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a EluNode> + 'a {
        self.nodes.iter().filter(move |n| n.parent_name == name)
    }

    /// Nodes with drawable geometry.
    pub fn meshes(&self) -> impl Iterator<Item = &EluNode> {
        self.nodes.iter().filter(|n| !n.is_dummy())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
