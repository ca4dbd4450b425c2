//! Node record readers for the ANI version tables.
//!
//! Steps receive the raw file version so the version 6 readers can serve
//! the older files that share their layout.

use glam::Vec3;

use super::types::{AniNode, AniNodeData, AnimType, BindPose, BoneAnimation, Key, Track, VertexAnimation};
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::error::Result;
use crate::formats::common::{BoundingBox, ByteCursor, Matrix4};

/// One part of a node record.
pub(crate) type Step = fn(&mut ByteCursor<'_>, &mut AniNode, &mut DiagnosticLog<'_>, u32) -> Result<()>;

/// Count types of version 12 position and rotation keys.
pub const COUNT_TYPE_HALF: i32 = 10;
pub const COUNT_TYPE_FLOAT: i32 = 16;
pub const COUNT_TYPE_QUATERNION: i32 = 20;

const VEC3_KEY_SIZE: usize = 16;
const QUAT_KEY_SIZE: usize = 20;
const HALF_KEY_SIZE: usize = 10;
const VISIBILITY_KEY_SIZE: usize = 8;

// ==================== Key readers ====================

fn read_vec3_key(cursor: &mut ByteCursor<'_>) -> Result<Key<[f32; 3]>> {
    let value = cursor.read_f32s::<3>()?;
    let frame = cursor.read_i32()?;
    Ok(Key { frame, value })
}

fn read_quat_key(cursor: &mut ByteCursor<'_>) -> Result<Key<[f32; 4]>> {
    let value = cursor.read_f32s::<4>()?;
    let frame = cursor.read_i32()?;
    Ok(Key { frame, value })
}

fn read_half_vec3_key(cursor: &mut ByteCursor<'_>) -> Result<Key<[f32; 3]>> {
    let frame = cursor.read_i32()?;
    let value = cursor.read_f16s::<3>()?;
    Ok(Key { frame, value })
}

fn read_half_quat_key(cursor: &mut ByteCursor<'_>) -> Result<Key<[f32; 4]>> {
    let key = read_half_vec3_key(cursor)?;
    Ok(Key {
        frame: key.frame,
        value: reconstruct_quaternion(key.value),
    })
}

fn read_float_quat_key(cursor: &mut ByteCursor<'_>) -> Result<Key<[f32; 4]>> {
    let frame = cursor.read_i32()?;
    let xyz = cursor.read_f32s::<3>()?;
    Ok(Key {
        frame,
        value: reconstruct_quaternion(xyz),
    })
}

fn read_frame_value_key(cursor: &mut ByteCursor<'_>) -> Result<Key<f32>> {
    let frame = cursor.read_i32()?;
    let value = cursor.read_f32()?;
    Ok(Key { frame, value })
}

fn read_value_frame_key(cursor: &mut ByteCursor<'_>) -> Result<Key<f32>> {
    let value = cursor.read_f32()?;
    let frame = cursor.read_i32()?;
    Ok(Key { frame, value })
}

/// Rebuild a unit quaternion from its vector part.
///
/// `w` is `sqrt(1 - |xyz|²)`, or zero when the vector part is longer than
/// one.
#[must_use]
pub fn reconstruct_quaternion(xyz: [f32; 3]) -> [f32; 4] {
    let length_squared = Vec3::from_array(xyz).length_squared();
    let w = if length_squared <= 1.0 {
        (1.0 - length_squared).sqrt()
    } else {
        0.0
    };
    [xyz[0], xyz[1], xyz[2], w]
}

fn read_descriptor(cursor: &mut ByteCursor<'_>) -> Result<AnimType> {
    let [kind, count_type, count] = cursor.read_i32s::<3>()?;
    Ok(AnimType {
        kind,
        count_type,
        count,
    })
}

// ==================== Vertex animation ====================

fn read_vertex_frames(cursor: &mut ByteCursor<'_>, node: &mut AniNode) -> Result<VertexAnimation> {
    node.name = cursor.read_string()?;
    let frame_count = cursor.read_count()?;
    let vertex_count = cursor.read_count()?;
    let frames = cursor.read_records(frame_count, 4, ByteCursor::read_u32)?;
    let row_size = vertex_count.saturating_mul(12);
    let positions = cursor.read_records(frame_count, row_size, |c| c.read_f32_arrays::<3>(vertex_count))?;
    Ok(VertexAnimation {
        frames,
        vertex_count,
        positions,
        bounds: None,
    })
}

pub(crate) fn read_vertex_v6(
    cursor: &mut ByteCursor<'_>,
    node: &mut AniNode,
    _log: &mut DiagnosticLog<'_>,
    _version: u32,
) -> Result<()> {
    let animation = read_vertex_frames(cursor, node)?;
    node.data = AniNodeData::Vertex(animation);
    Ok(())
}

pub(crate) fn read_vertex_v7(
    cursor: &mut ByteCursor<'_>,
    node: &mut AniNode,
    _log: &mut DiagnosticLog<'_>,
    _version: u32,
) -> Result<()> {
    let mut animation = read_vertex_frames(cursor, node)?;
    animation.bounds = Some(BoundingBox::read(cursor)?);
    node.data = AniNodeData::Vertex(animation);
    Ok(())
}

// ==================== Bone animation ====================

pub(crate) fn read_bone_v6(
    cursor: &mut ByteCursor<'_>,
    node: &mut AniNode,
    _log: &mut DiagnosticLog<'_>,
    version: u32,
) -> Result<()> {
    node.name = cursor.read_string()?;
    let parent_name = if version >= 6 {
        cursor.read_string()?
    } else {
        String::new()
    };
    let mut bone = BoneAnimation::new(parent_name, BindPose::Matrix(Matrix4::read(cursor)?));

    let count = cursor.read_count()?;
    bone.position = Track::padded(cursor.read_records(count, VEC3_KEY_SIZE, read_vec3_key)?);
    let count = cursor.read_count()?;
    bone.rotation = Track::padded(cursor.read_records(count, QUAT_KEY_SIZE, read_quat_key)?);
    if version >= 5 {
        let count = cursor.read_count()?;
        bone.scale = Track::new(cursor.read_records(count, VEC3_KEY_SIZE, read_vec3_key)?);
    }

    node.data = AniNodeData::Bone(bone);
    Ok(())
}

pub(crate) fn read_bone_v11(
    cursor: &mut ByteCursor<'_>,
    node: &mut AniNode,
    _log: &mut DiagnosticLog<'_>,
    _version: u32,
) -> Result<()> {
    node.name = cursor.read_string()?;
    let parent_name = cursor.read_string()?;
    let mut bone = BoneAnimation::new(parent_name, BindPose::Matrix(Matrix4::read(cursor)?));

    let count = read_descriptor(cursor)?.key_count();
    bone.position = Track::padded(cursor.read_records(count, VEC3_KEY_SIZE, read_vec3_key)?);
    let count = read_descriptor(cursor)?.key_count();
    bone.rotation = Track::padded(cursor.read_records(count, QUAT_KEY_SIZE, read_quat_key)?);
    let count = read_descriptor(cursor)?.key_count();
    bone.scale = Track::new(cursor.read_records(count, VEC3_KEY_SIZE, read_vec3_key)?);

    node.data = AniNodeData::Bone(bone);
    Ok(())
}

pub(crate) fn read_bone_v12(
    cursor: &mut ByteCursor<'_>,
    node: &mut AniNode,
    log: &mut DiagnosticLog<'_>,
    _version: u32,
) -> Result<()> {
    node.name = cursor.read_string()?;
    let bind = BindPose::Components {
        translation: cursor.read_f32s::<3>()?,
        rotation: cursor.read_f32s::<4>()?,
        scale: cursor.read_f32s::<3>()?,
    };
    let mut bone = BoneAnimation::new(String::new(), bind);
    let complete = read_compressed_tracks(cursor, &node.name, &mut bone, log)?;
    node.incomplete = !complete;
    node.data = AniNodeData::Bone(bone);
    Ok(())
}

/// Read the version 12 tracks, returning `false` if the node was abandoned
/// on an unknown count type.
fn read_compressed_tracks(
    cursor: &mut ByteCursor<'_>,
    name: &str,
    bone: &mut BoneAnimation,
    log: &mut DiagnosticLog<'_>,
) -> Result<bool> {
    let position = read_descriptor(cursor)?;
    let count = position.key_count();
    if count > 0 {
        let keys = match position.count_type {
            COUNT_TYPE_HALF => cursor.read_records(count, HALF_KEY_SIZE, read_half_vec3_key)?,
            COUNT_TYPE_FLOAT => cursor.read_records(count, VEC3_KEY_SIZE, read_vec3_key)?,
            other => return abandon(log, name, "position", other),
        };
        bone.position = Track::padded(keys);
    }

    let rotation = read_descriptor(cursor)?;
    let count = rotation.key_count();
    if count > 0 {
        let keys = match rotation.count_type {
            COUNT_TYPE_HALF => cursor.read_records(count, HALF_KEY_SIZE, read_half_quat_key)?,
            COUNT_TYPE_FLOAT => cursor.read_records(count, VEC3_KEY_SIZE, read_float_quat_key)?,
            COUNT_TYPE_QUATERNION => cursor.read_records(count, QUAT_KEY_SIZE, read_quat_key)?,
            other => return abandon(log, name, "rotation", other),
        };
        bone.rotation = Track::padded(keys);
    }

    let count = read_descriptor(cursor)?.key_count();
    bone.scale = Track::new(cursor.read_records(count, VEC3_KEY_SIZE, read_vec3_key)?);
    Ok(true)
}

fn abandon(log: &mut DiagnosticLog<'_>, node: &str, track: &'static str, count_type: i32) -> Result<bool> {
    log.report(Diagnostic::UnknownCountType {
        node: node.to_string(),
        track,
        count_type,
    })?;
    Ok(false)
}

// ==================== Visibility ====================

pub(crate) fn read_visibility_v6(
    cursor: &mut ByteCursor<'_>,
    node: &mut AniNode,
    _log: &mut DiagnosticLog<'_>,
    version: u32,
) -> Result<()> {
    let count = cursor.read_count()?;
    let keys = if version >= 5 {
        cursor.read_records(count, VISIBILITY_KEY_SIZE, read_frame_value_key)?
    } else {
        cursor.read_records(count, VISIBILITY_KEY_SIZE, read_value_frame_key)?
    };
    node.visibility = Track::new(keys).clamped();
    Ok(())
}

pub(crate) fn read_visibility_v9(
    cursor: &mut ByteCursor<'_>,
    node: &mut AniNode,
    _log: &mut DiagnosticLog<'_>,
    _version: u32,
) -> Result<()> {
    let count = cursor.read_count()?;
    node.visibility = Track::new(cursor.read_records(count, VISIBILITY_KEY_SIZE, read_frame_value_key)?);
    Ok(())
}

pub(crate) fn read_visibility_v11(
    cursor: &mut ByteCursor<'_>,
    node: &mut AniNode,
    _log: &mut DiagnosticLog<'_>,
    _version: u32,
) -> Result<()> {
    let count = read_descriptor(cursor)?.key_count();
    node.visibility = Track::new(cursor.read_records(count, VISIBILITY_KEY_SIZE, read_frame_value_key)?);
    Ok(())
}
