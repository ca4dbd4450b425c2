//! .ani animation file format
//!
//! Either per-frame vertex positions for mesh nodes, or keyed position,
//! rotation and scale tracks for skeleton bones. Every node is followed by
//! a visibility track. Layouts differ between versions 1 and 12; see
//! [`AniVersion`].

mod reader;
mod steps;
mod types;
mod version;

pub use reader::{parse_ani_bytes, parse_ani_bytes_with, read_ani, read_ani_with};
pub use steps::{COUNT_TYPE_FLOAT, COUNT_TYPE_HALF, COUNT_TYPE_QUATERNION, reconstruct_quaternion};
pub use types::{
    AniDocument, AniHeader, AniNode, AniNodeData, AnimType, AnimationKind, BindPose, BoneAnimation, Key,
    Track, VertexAnimation, VisibilityTrack,
};
pub use version::AniVersion;

/// Signature expected at the start of an ANI file
pub const ANI_SIGNATURE: u32 = crate::formats::common::EXPORTER_SIGNATURE;

/// Size of the fixed file header
pub const ANI_HEADER_SIZE: usize = 20;

/// Name of the skeleton root bone
pub const ROOT_BONE_NAME: &str = "Bip01";
