//! .elu mesh file format
//!
//! Scene graph of mesh nodes: names and parent links, local transforms,
//! geometry streams, polygon tables, skin weights and the flat index buffers
//! the engine draws from. The node record layout changed across versions
//! 12 to 20; see [`EluVersion`].

mod reader;
mod steps;
mod types;
mod version;

pub use reader::{parse_elu_bytes, parse_elu_bytes_with, read_elu, read_elu_with};
pub use types::{
    EluDocument, EluHeader, EluNode, MaterialInfo, MeshAlign, Polygon, SkinInfluence, SkinWeights,
    VertexIndex,
};
pub use version::EluVersion;

/// Signature expected at the start of an ELU file
pub const ELU_SIGNATURE: u32 = crate::formats::common::EXPORTER_SIGNATURE;

/// Size of the fixed file header
pub const ELU_HEADER_SIZE: usize = 16;

/// Node flag set when the node has no points or no faces
pub const MESH_FLAG_DUMMY: u32 = 0x0800;

/// Maximum bone influences kept per point
pub const MAX_SKIN_INFLUENCES: usize = 3;
