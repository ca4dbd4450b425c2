//! # `EluAni`
//!
//! A pure-Rust decoder for the RaiderZ engine's mesh and animation files.
//!
//! ## Supported Formats
//!
//! - **ELU** - Scene graphs of static and skinned mesh nodes, versions 12-18 and 20
//! - **ANI** - Bone and vertex animation, versions 1-9, 11 and 12
//!
//! Decoding is read-only and single pass. Damaged but usable files decode
//! with [`Diagnostic`]s attached to the document; truncated files and
//! unknown versions fail with an [`Error`].
//!
//! ## Quick Start
//!
//! ### Decoding a Mesh
//!
//! ```no_run
//! let data = std::fs::read("hf_body.elu")?;
//! let mesh = eluani::decode_mesh(&data)?;
//! for node in mesh.meshes() {
//!     println!("{}: {} points", node.name, node.points.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Decoding an Animation Strictly
//!
//! ```no_run
//! use eluani::DecodeOptions;
//!
//! let data = std::fs::read("idle.ani")?;
//! let anim = eluani::decode_animation_with(&data, &DecodeOptions::strict())?;
//! if let Some(root) = anim.root_node() {
//!     println!("root bone: {}", root.name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use eluani::prelude::*;
//!
//! // Now you have access to:
//! // - EluDocument, EluNode, AniDocument, AniNode
//! // - DecodeOptions, Diagnostic
//! // - Error, Result, and more
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `eluani` command-line binary

pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod inspect;
pub mod options;

// Re-exports for convenience
pub use diagnostics::Diagnostic;
pub use error::{Error, Result};
pub use options::DecodeOptions;

use formats::ani::{AniDocument, parse_ani_bytes_with};
use formats::elu::{EluDocument, parse_elu_bytes_with};

/// Decode an ELU mesh file held in memory.
///
/// # Errors
/// See [`formats::elu::parse_elu_bytes`].
pub fn decode_mesh(data: &[u8]) -> Result<EluDocument> {
    parse_elu_bytes_with(data, &DecodeOptions::default())
}

/// Decode an ELU mesh file with explicit options.
///
/// # Errors
/// See [`formats::elu::parse_elu_bytes_with`].
pub fn decode_mesh_with(data: &[u8], options: &DecodeOptions) -> Result<EluDocument> {
    parse_elu_bytes_with(data, options)
}

/// Decode an ANI animation file held in memory.
///
/// # Errors
/// See [`formats::ani::parse_ani_bytes`].
pub fn decode_animation(data: &[u8]) -> Result<AniDocument> {
    parse_ani_bytes_with(data, &DecodeOptions::default())
}

/// Decode an ANI animation file with explicit options.
///
/// # Errors
/// See [`formats::ani::parse_ani_bytes_with`].
pub fn decode_animation_with(data: &[u8], options: &DecodeOptions) -> Result<AniDocument> {
    parse_ani_bytes_with(data, options)
}

/// Prelude module for common imports
pub mod prelude {
    pub use crate::diagnostics::Diagnostic;
    pub use crate::error::{Error, Result};
    pub use crate::options::DecodeOptions;
    pub use crate::{decode_animation, decode_animation_with, decode_mesh, decode_mesh_with};

    pub use crate::formats::ani::{
        AniDocument, AniNode, AniNodeData, AniVersion, AnimationKind, BoneAnimation, Key, Track,
        VertexAnimation, VisibilityTrack, read_ani,
    };
    pub use crate::formats::common::{BoundingBox, Matrix4};
    pub use crate::formats::elu::{EluDocument, EluNode, EluVersion, MeshAlign, SkinWeights, read_elu};

    pub use crate::inspect::{AniSummary, EluSummary, FileSummary, inspect_file};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
