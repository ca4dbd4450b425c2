//! ANI document model

use serde::Serialize;

use super::ROOT_BONE_NAME;
use super::version::AniVersion;
use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::formats::common::{BoundingBox, Matrix4};

/// What the nodes of an ANI file animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnimationKind {
    Transform,
    Vertex,
    Bone,
    Tm,
}

impl AnimationKind {
    /// Map the raw header value.
    pub fn from_raw(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Transform),
            1 => Ok(Self::Vertex),
            2 => Ok(Self::Bone),
            3 => Ok(Self::Tm),
            _ => Err(Error::InvalidAnimationKind { value }),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Vertex => "vertex",
            Self::Bone => "bone",
            Self::Tm => "tm",
        }
    }
}

impl std::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed 20-byte ANI file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AniHeader {
    pub signature: u32,
    pub version: u32,
    pub max_frame: i32,
    pub model_count: i32,
    pub kind: AnimationKind,
}

/// Packed track descriptor used from version 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimType {
    pub kind: i32,
    /// Wire encoding of the keys that follow.
    pub count_type: i32,
    pub count: i32,
}

impl AnimType {
    /// Number of keys that follow; zero for non-positive counts.
    #[must_use]
    pub fn key_count(&self) -> usize {
        usize::try_from(self.count).unwrap_or(0)
    }
}

/// One keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Key<T> {
    pub frame: i32,
    pub value: T,
}

/// Ordered keyframes of one channel.
///
/// `declared_count` is the key count stored in the file. Position and
/// rotation tracks hold one extra entry, a copy of the last decoded key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track<T> {
    pub declared_count: usize,
    pub keys: Vec<Key<T>>,
}

impl<T> Default for Track<T> {
    fn default() -> Self {
        Self {
            declared_count: 0,
            keys: Vec::new(),
        }
    }
}

impl<T: Copy> Track<T> {
    /// Track holding exactly the decoded keys.
    #[must_use]
    pub fn new(keys: Vec<Key<T>>) -> Self {
        Self {
            declared_count: keys.len(),
            keys,
        }
    }

    /// Track with the last key repeated once, as the engine samples
    /// position and rotation.
    #[must_use]
    pub fn padded(mut keys: Vec<Key<T>>) -> Self {
        let declared_count = keys.len();
        if let Some(&last) = keys.last() {
            keys.push(last);
        }
        Self {
            declared_count,
            keys,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Frame of the last key.
    #[must_use]
    pub fn last_frame(&self) -> Option<i32> {
        self.keys.last().map(|k| k.frame)
    }

    pub fn frames(&self) -> impl Iterator<Item = i32> + '_ {
        self.keys.iter().map(|k| k.frame)
    }
}

/// Visibility keys; values are opacity in `[0, 1]`.
pub type VisibilityTrack = Track<f32>;

impl Track<f32> {
    /// Copy with negative values raised to zero.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            declared_count: self.declared_count,
            keys: self
                .keys
                .iter()
                .map(|k| Key {
                    frame: k.frame,
                    value: k.value.max(0.0),
                })
                .collect(),
        }
    }
}

/// Per-frame point positions of a vertex-animated node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VertexAnimation {
    /// Frame number of each entry of `positions`.
    pub frames: Vec<u32>,
    /// Points per frame.
    pub vertex_count: usize,
    pub positions: Vec<Vec<[f32; 3]>>,
    /// Stored from version 7.
    pub bounds: Option<BoundingBox>,
}

/// Rest pose of an animated bone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BindPose {
    /// Local bind matrix (before version 12).
    Matrix(Matrix4),
    /// Separate base components (version 12).
    Components {
        translation: [f32; 3],
        rotation: [f32; 4],
        scale: [f32; 3],
    },
}

impl BindPose {
    /// Bind pose as a glam matrix.
    #[must_use]
    pub fn to_mat4(&self) -> glam::Mat4 {
        match self {
            Self::Matrix(matrix) => matrix.to_mat4(),
            Self::Components {
                translation,
                rotation,
                scale,
            } => glam::Mat4::from_scale_rotation_translation(
                glam::Vec3::from_array(*scale),
                glam::Quat::from_array(*rotation),
                glam::Vec3::from_array(*translation),
            ),
        }
    }
}

/// Keyed transform tracks of one bone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoneAnimation {
    /// Empty when the version stores no parent name.
    pub parent_name: String,
    pub bind: BindPose,
    pub position: Track<[f32; 3]>,
    /// Quaternions as `[x, y, z, w]`.
    pub rotation: Track<[f32; 4]>,
    pub scale: Track<[f32; 3]>,
}

impl BoneAnimation {
    pub(crate) fn new(parent_name: String, bind: BindPose) -> Self {
        Self {
            parent_name,
            bind,
            position: Track::default(),
            rotation: Track::default(),
            scale: Track::default(),
        }
    }
}

/// Animated content of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum AniNodeData {
    Vertex(VertexAnimation),
    Bone(BoneAnimation),
    /// Transform and Tm files carry only visibility.
    #[default]
    Empty,
}

/// One decoded animation node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AniNode {
    pub name: String,
    pub data: AniNodeData,
    pub visibility: VisibilityTrack,
    /// Set when decoding stopped early on an unknown key encoding. Transform
    /// tracks from the failing one on are empty; visibility is still read.
    pub incomplete: bool,
}

impl AniNode {
    #[must_use]
    pub fn bone(&self) -> Option<&BoneAnimation> {
        match &self.data {
            AniNodeData::Bone(bone) => Some(bone),
            _ => None,
        }
    }

    #[must_use]
    pub fn vertex(&self) -> Option<&VertexAnimation> {
        match &self.data {
            AniNodeData::Vertex(vertex) => Some(vertex),
            _ => None,
        }
    }
}

/// A fully decoded ANI file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AniDocument {
    pub header: AniHeader,
    pub version: AniVersion,
    pub nodes: Vec<AniNode>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AniDocument {
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<&AniNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Skeleton root bone, when the file animates one.
    #[must_use]
    pub fn root_node(&self) -> Option<&AniNode> {
        self.nodes
            .iter()
            .find(|n| n.name == ROOT_BONE_NAME && n.bone().is_some())
    }

    pub fn bones(&self) -> impl Iterator<Item = (&str, &BoneAnimation)> {
        self.nodes
            .iter()
            .filter_map(|n| n.bone().map(|b| (n.name.as_str(), b)))
    }

    /// Nodes abandoned on an unknown key encoding.
    pub fn incomplete_nodes(&self) -> impl Iterator<Item = &AniNode> {
        self.nodes.iter().filter(|n| n.incomplete)
    }
}
