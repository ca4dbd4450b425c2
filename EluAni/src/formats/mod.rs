//! File format handlers for the ELU mesh and ANI animation formats

pub mod ani;
pub mod common;
pub mod elu;

// Re-export main document types
pub use ani::{AniDocument, AniNode, AniVersion, parse_ani_bytes, read_ani};
pub use common::{BoundingBox, ByteCursor, Matrix4, half_to_f32};
pub use elu::{EluDocument, EluNode, EluVersion, parse_elu_bytes, read_elu};
