//! ELU version dispatch
//!
//! Each supported version maps to a table of step functions. A node record is
//! decoded by running the six steps of its version's table in order.

use serde::Serialize;

use super::steps::{self, Step};
use crate::error::{Error, Result};

/// A supported ELU format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EluVersion {
    V12,
    V13,
    V14,
    V15,
    V16,
    V17,
    V18,
    V20,
}

/// The per-version readers for one node record.
pub(crate) struct NodeSteps {
    pub name: Step,
    pub info: Step,
    pub vertex: Step,
    pub face: Step,
    pub vertex_info: Step,
    pub etc: Step,
}

impl NodeSteps {
    pub(crate) fn in_order(&self) -> [(&'static str, Step); 6] {
        [
            ("name", self.name),
            ("info", self.info),
            ("vertex", self.vertex),
            ("face", self.face),
            ("vertex_info", self.vertex_info),
            ("etc", self.etc),
        ]
    }
}

const V12_STEPS: NodeSteps = NodeSteps {
    name: steps::read_name_v12,
    info: steps::read_info_v12,
    vertex: steps::read_vertex_v12,
    face: steps::read_face_v12,
    vertex_info: steps::read_vertex_info,
    etc: steps::read_etc_v12,
};

const V13_STEPS: NodeSteps = NodeSteps {
    etc: steps::read_etc_v13,
    ..V12_STEPS
};

const V14_STEPS: NodeSteps = NodeSteps {
    vertex: steps::read_vertex_v14,
    ..V13_STEPS
};

const V15_STEPS: NodeSteps = NodeSteps {
    vertex: steps::read_vertex_v15,
    face: steps::read_face_v15,
    etc: steps::read_etc_v15,
    ..V14_STEPS
};

const V16_STEPS: NodeSteps = NodeSteps {
    vertex: steps::read_vertex_v16,
    ..V15_STEPS
};

const V17_STEPS: NodeSteps = NodeSteps {
    vertex: steps::read_vertex_v17,
    ..V16_STEPS
};

const V18_STEPS: NodeSteps = NodeSteps {
    vertex: steps::read_vertex_v18,
    ..V17_STEPS
};

const V20_STEPS: NodeSteps = NodeSteps {
    name: steps::read_name_v20,
    info: steps::read_info_v20,
    vertex: steps::read_vertex_v20,
    etc: steps::read_etc_v20,
    ..V18_STEPS
};

impl EluVersion {
    /// Resolve the version number from a file header.
    pub fn from_raw(version: u32) -> Result<Self> {
        match version {
            12 => Ok(Self::V12),
            13 => Ok(Self::V13),
            14 => Ok(Self::V14),
            15 => Ok(Self::V15),
            16 => Ok(Self::V16),
            17 => Ok(Self::V17),
            18 => Ok(Self::V18),
            20 => Ok(Self::V20),
            _ => Err(Error::UnsupportedEluVersion { version }),
        }
    }

    #[must_use]
    pub fn raw(self) -> u32 {
        match self {
            Self::V12 => 12,
            Self::V13 => 13,
            Self::V14 => 14,
            Self::V15 => 15,
            Self::V16 => 16,
            Self::V17 => 17,
            Self::V18 => 18,
            Self::V20 => 20,
        }
    }

    pub(crate) fn steps(self) -> &'static NodeSteps {
        match self {
            Self::V12 => &V12_STEPS,
            Self::V13 => &V13_STEPS,
            Self::V14 => &V14_STEPS,
            Self::V15 => &V15_STEPS,
            Self::V16 => &V16_STEPS,
            Self::V17 => &V17_STEPS,
            Self::V18 => &V18_STEPS,
            Self::V20 => &V20_STEPS,
        }
    }
}
