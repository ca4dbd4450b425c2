//! Node record readers for the ELU version tables.
//!
//! Every step shares the [`Step`] signature so a version table can swap any
//! of them. Layout differences inside one step (an extra flags word, wider
//! tangents) are described by [`VertexLayout`] and [`IndexLayout`] rather
//! than by copies of the whole reader.

use super::types::{EluNode, MaterialInfo, MeshAlign, Polygon, SkinInfluence, SkinWeights, VertexIndex};
use super::{MAX_SKIN_INFLUENCES, MESH_FLAG_DUMMY};
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::error::Result;
use crate::formats::common::{BoundingBox, ByteCursor, Matrix4};

/// One sub-step of a node record.
pub(crate) type Step = fn(&mut ByteCursor<'_>, &mut EluNode, &mut DiagnosticLog<'_>) -> Result<()>;

/// Decode one node record with the given step table.
pub(crate) fn read_node(
    cursor: &mut ByteCursor<'_>,
    steps: &super::version::NodeSteps,
    log: &mut DiagnosticLog<'_>,
) -> Result<EluNode> {
    let mut node = EluNode::default();
    for (name, step) in steps.in_order() {
        tracing::trace!("ELU step {} at offset {}", name, cursor.position());
        step(cursor, &mut node, log)?;
    }
    Ok(node)
}

// ==================== Name ====================

pub(crate) fn read_name_v12(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    node.name = cursor.read_string()?;
    node.parent_name = cursor.read_string()?;
    node.parent_id = cursor.read_i32()?;
    Ok(())
}

pub(crate) fn read_name_v20(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    node.name = cursor.read_string()?;
    node.parent_id = cursor.read_i32()?;
    node.parent_name = cursor.read_string()?;
    Ok(())
}

// ==================== Info ====================

pub(crate) fn read_info_v12(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    node.flags = cursor.read_u32()?;
    read_align(cursor, node, log)?;
    node.local_matrix = Matrix4::read(cursor)?;
    node.base_visibility = cursor.read_f32()?;
    Ok(())
}

pub(crate) fn read_info_v20(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    node.local_matrix = Matrix4::read(cursor)?;
    node.base_visibility = cursor.read_f32()?;
    node.flags = cursor.read_u32()?;
    read_align(cursor, node, log)?;
    node.lod_index = cursor.read_i32()?;
    Ok(())
}

fn read_align(cursor: &mut ByteCursor<'_>, node: &mut EluNode, log: &mut DiagnosticLog<'_>) -> Result<()> {
    let raw = cursor.read_i32()?;
    match MeshAlign::from_raw(raw) {
        Some(align) => node.align = align,
        None => log.report(Diagnostic::UnrecognizedEnumValue {
            node: node.name.clone(),
            field: "mesh alignment",
            value: i64::from(raw),
        })?,
    }
    Ok(())
}

// ==================== Vertex streams ====================

/// Optional parts of the pre-v20 vertex block.
#[derive(Debug, Clone, Copy, Default)]
struct VertexLayout {
    /// Leading FVF flags word (discarded).
    fvf: bool,
    light_map_id: bool,
    /// Light-map UV table after the UVs (skipped).
    light_map_uvs: bool,
    /// Tangents stored as four floats instead of three.
    wide_tangents: bool,
    /// Secondary UV table after the UVs.
    extra_uvs: bool,
}

const LIGHT_MAP_UV_SIZE: usize = 12;

fn read_vertex_streams(cursor: &mut ByteCursor<'_>, node: &mut EluNode, layout: VertexLayout) -> Result<()> {
    if layout.fvf {
        let _fvf = cursor.read_u32()?;
    }
    if layout.light_map_id {
        node.light_map_id = Some(cursor.read_i32()?);
    }
    read_points(cursor, node)?;
    node.normals = read_vec3s(cursor)?;
    node.tangents = read_tangents(cursor, layout.wide_tangents)?;
    node.bitangents = read_vec3s(cursor)?;
    node.uvs = read_vec3s(cursor)?;
    if layout.light_map_uvs {
        let count = cursor.read_count()?;
        cursor.skip(count.saturating_mul(LIGHT_MAP_UV_SIZE))?;
    }
    if layout.extra_uvs {
        node.extra_uvs = read_vec3s(cursor)?;
    }
    Ok(())
}

pub(crate) fn read_vertex_v12(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    read_vertex_streams(cursor, node, VertexLayout::default())
}

pub(crate) fn read_vertex_v14(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    let layout = VertexLayout {
        fvf: true,
        ..VertexLayout::default()
    };
    read_vertex_streams(cursor, node, layout)
}

pub(crate) fn read_vertex_v15(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    let layout = VertexLayout {
        fvf: true,
        light_map_id: true,
        light_map_uvs: true,
        ..VertexLayout::default()
    };
    read_vertex_streams(cursor, node, layout)
}

pub(crate) fn read_vertex_v16(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    let layout = VertexLayout {
        fvf: true,
        light_map_id: true,
        light_map_uvs: true,
        wide_tangents: true,
        extra_uvs: false,
    };
    read_vertex_streams(cursor, node, layout)
}

pub(crate) fn read_vertex_v17(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    let layout = VertexLayout {
        fvf: true,
        light_map_id: true,
        wide_tangents: true,
        ..VertexLayout::default()
    };
    read_vertex_streams(cursor, node, layout)
}

pub(crate) fn read_vertex_v18(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    let layout = VertexLayout {
        wide_tangents: true,
        extra_uvs: true,
        ..VertexLayout::default()
    };
    read_vertex_streams(cursor, node, layout)
}

pub(crate) fn read_vertex_v20(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    read_points(cursor, node)?;
    node.uvs = read_vec3s(cursor)?;
    node.extra_uvs = read_vec3s(cursor)?;
    node.normals = read_vec3s(cursor)?;
    node.tangents = read_tangents(cursor, true)?;
    node.bitangents = read_vec3s(cursor)?;
    Ok(())
}

fn read_points(cursor: &mut ByteCursor<'_>, node: &mut EluNode) -> Result<()> {
    node.points = read_vec3s(cursor)?;
    node.bounds = BoundingBox::from_points(&node.points);
    Ok(())
}

fn read_vec3s(cursor: &mut ByteCursor<'_>) -> Result<Vec<[f32; 3]>> {
    let count = cursor.read_count()?;
    cursor.read_f32_arrays::<3>(count)
}

fn read_tangents(cursor: &mut ByteCursor<'_>, wide: bool) -> Result<Vec<[f32; 4]>> {
    let count = cursor.read_count()?;
    if wide {
        return cursor.read_f32_arrays::<4>(count);
    }
    let narrow = cursor.read_f32_arrays::<3>(count)?;
    Ok(narrow.into_iter().map(|[x, y, z]| [x, y, z, 1.0]).collect())
}

// ==================== Faces ====================

/// Which index sets a table stores and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexLayout {
    /// Face corner: position, uv, normal, tangent, bitangent.
    FaceQuintuple,
    /// Face corner: position, uv, uv2, normal, tangent, bitangent.
    FaceSextuple,
    /// Vertex index: position, normal, uv, tangent, bitangent.
    VertexQuintuple,
    /// Vertex index: position, normal, uv, uv2, tangent, bitangent.
    VertexSextuple,
}

impl IndexLayout {
    fn width(self) -> usize {
        match self {
            Self::FaceQuintuple | Self::VertexQuintuple => 10,
            Self::FaceSextuple | Self::VertexSextuple => 12,
        }
    }

    fn read(self, cursor: &mut ByteCursor<'_>) -> Result<VertexIndex> {
        Ok(match self {
            Self::FaceQuintuple => {
                let [position, uv, normal, tangent, bitangent] = cursor.read_u16s::<5>()?;
                VertexIndex { position, normal, uv, uv2: None, tangent, bitangent }
            }
            Self::FaceSextuple => {
                let [position, uv, uv2, normal, tangent, bitangent] = cursor.read_u16s::<6>()?;
                VertexIndex { position, normal, uv, uv2: Some(uv2), tangent, bitangent }
            }
            Self::VertexQuintuple => {
                let [position, normal, uv, tangent, bitangent] = cursor.read_u16s::<5>()?;
                VertexIndex { position, normal, uv, uv2: None, tangent, bitangent }
            }
            Self::VertexSextuple => {
                let [position, normal, uv, uv2, tangent, bitangent] = cursor.read_u16s::<6>()?;
                VertexIndex { position, normal, uv, uv2: Some(uv2), tangent, bitangent }
            }
        })
    }

    fn read_many(self, cursor: &mut ByteCursor<'_>, count: usize) -> Result<Vec<VertexIndex>> {
        cursor.read_records(count, self.width(), |c| self.read(c))
    }
}

/// Smallest possible polygon record: corner count and material id.
const MIN_POLYGON_SIZE: usize = 6;

fn read_faces(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    log: &mut DiagnosticLog<'_>,
    layout: IndexLayout,
) -> Result<()> {
    let face_count = cursor.read_count()?;
    if face_count == 0 {
        return Ok(());
    }
    node.total_degrees = cursor.read_count()?;
    node.total_triangles = cursor.read_count()?;

    node.polygons = cursor.read_records(face_count, MIN_POLYGON_SIZE, |c| {
        let corner_count = c.read_count()?;
        let corners = layout.read_many(c, corner_count)?;
        let material_id = c.read_i16()?;
        Ok(Polygon { corners, material_id })
    })?;

    let actual: usize = node.polygons.iter().map(|p| p.corners.len()).sum();
    if actual != node.total_degrees {
        log.report(Diagnostic::TotalDegreesMismatch {
            node: node.name.clone(),
            declared: node.total_degrees,
            actual,
        })?;
    }
    Ok(())
}

pub(crate) fn read_face_v12(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    read_faces(cursor, node, log, IndexLayout::FaceQuintuple)
}

pub(crate) fn read_face_v15(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    read_faces(cursor, node, log, IndexLayout::FaceSextuple)
}

// ==================== Vertex info ====================

/// Smallest skin record: an influence count with no influences.
const MIN_SKIN_SIZE: usize = 4;
const SKIN_INFLUENCE_SIZE: usize = 8;

pub(crate) fn read_vertex_info(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    node.point_colors = read_vec3s(cursor)?;
    if node.points.is_empty() || node.polygons.is_empty() {
        node.flags |= MESH_FLAG_DUMMY;
    }
    node.material_id = cursor.read_i32()?;

    let skin_count = cursor.read_count()?;
    if skin_count > 0 && skin_count != node.points.len() {
        log.report(Diagnostic::SkinCountMismatch {
            node: node.name.clone(),
            points: node.points.len(),
            skin: skin_count,
        })?;
    }
    node.skin = cursor.read_records(skin_count, MIN_SKIN_SIZE, read_skin_weights)?;
    Ok(())
}

fn read_skin_weights(cursor: &mut ByteCursor<'_>) -> Result<SkinWeights> {
    let size = cursor.read_count()?;
    let influences = cursor.read_records(size, SKIN_INFLUENCE_SIZE, |c| {
        Ok(SkinInfluence {
            bone: c.read_u16()?,
            parent: c.read_u16()?,
            weight: c.read_f32()?,
        })
    })?;
    Ok(SkinWeights { influences }.capped(MAX_SKIN_INFLUENCES))
}

// ==================== Etc ====================

const MATRIX_SIZE: usize = 64;
const MATERIAL_INFO_SIZE: usize = 12;

fn read_bones(cursor: &mut ByteCursor<'_>, node: &mut EluNode) -> Result<()> {
    let count = cursor.read_count()?;
    node.bones = cursor.read_records(count, MATRIX_SIZE, Matrix4::read)?;
    node.bone_indices = cursor.read_u16_vec(count)?;
    Ok(())
}

fn read_vertex_indices(cursor: &mut ByteCursor<'_>, node: &mut EluNode, layout: IndexLayout) -> Result<()> {
    let count = cursor.read_count()?;
    node.vertex_indices = layout.read_many(cursor, count)?;
    Ok(())
}

fn read_face_indices(cursor: &mut ByteCursor<'_>, node: &mut EluNode) -> Result<()> {
    let count = cursor.read_count()?;
    node.face_indices = cursor.read_u16_vec(count)?;
    Ok(())
}

fn read_material_infos(cursor: &mut ByteCursor<'_>, node: &mut EluNode) -> Result<()> {
    let count = cursor.read_count()?;
    node.material_infos = cursor.read_records(count, MATERIAL_INFO_SIZE, |c| {
        Ok(MaterialInfo {
            material_id: c.read_i32()?,
            offset: c.read_u16()?,
            count: c.read_u16()?,
            masking_id: c.read_i32()?,
        })
    })?;
    Ok(())
}

fn read_tail(cursor: &mut ByteCursor<'_>, node: &mut EluNode, layout: IndexLayout) -> Result<()> {
    read_bones(cursor, node)?;
    read_vertex_indices(cursor, node, layout)?;
    node.primitive_type = cursor.read_i32()?;
    read_face_indices(cursor, node)?;
    read_material_infos(cursor, node)
}

pub(crate) fn read_etc_v12(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    read_tail(cursor, node, IndexLayout::VertexQuintuple)
}

pub(crate) fn read_etc_v13(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    read_tail(cursor, node, IndexLayout::VertexQuintuple)?;
    node.bounds = Some(BoundingBox::read(cursor)?);
    Ok(())
}

pub(crate) fn read_etc_v15(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    read_tail(cursor, node, IndexLayout::VertexSextuple)?;
    node.bounds = Some(BoundingBox::read(cursor)?);
    Ok(())
}

pub(crate) fn read_etc_v20(
    cursor: &mut ByteCursor<'_>,
    node: &mut EluNode,
    _log: &mut DiagnosticLog<'_>,
) -> Result<()> {
    node.primitive_type = cursor.read_i32()?;
    read_vertex_indices(cursor, node, IndexLayout::VertexSextuple)?;
    read_bones(cursor, node)?;
    read_material_infos(cursor, node)?;
    read_face_indices(cursor, node)?;
    node.bounds = Some(BoundingBox::read(cursor)?);
    Ok(())
}
