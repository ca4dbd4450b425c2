//! Building blocks shared by the ELU and ANI readers

mod cursor;
mod half;
mod types;

pub use cursor::ByteCursor;
pub use half::{half_to_f32, half_to_f32_bits};
pub use types::{BoundingBox, Matrix4};

/// Exporter signature written at the start of ELU and ANI files.
pub const EXPORTER_SIGNATURE: u32 = 0x0107_F060;
