use eluani::formats::ani::{AniNodeData, AnimationKind, BindPose};
use eluani::formats::elu::{ELU_SIGNATURE, MeshAlign};
use eluani::inspect::{FileSummary, inspect_file};
use eluani::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
];

/// Little-endian byte builder for synthetic files.
#[derive(Default)]
struct Bytes(Vec<u8>);

impl Bytes {
    fn new() -> Self {
        Self::default()
    }

    fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn i16(mut self, v: i16) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn u16s(mut self, values: &[u16]) -> Self {
        for v in values {
            self.0.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    fn f32s(mut self, values: &[f32]) -> Self {
        for v in values {
            self.0.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    fn i32s(mut self, values: &[i32]) -> Self {
        for v in values {
            self.0.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    fn string(self, s: &str) -> Self {
        let mut this = self.i32(s.len() as i32);
        this.0.extend_from_slice(s.as_bytes());
        this
    }

    fn append(mut self, other: Bytes) -> Self {
        self.0.extend(other.0);
        self
    }

    fn build(self) -> Vec<u8> {
        self.0
    }
}

// ==================== ELU builders ====================

fn elu_header(signature: u32, version: u32, mesh_count: i32) -> Bytes {
    Bytes::new().u32(signature).u32(version).i32(0).i32(mesh_count)
}

/// Name and info blocks shared by versions 12-18.
fn v18_name_info(name: &str, align: i32) -> Bytes {
    Bytes::new()
        .string(name)
        .string("")
        .i32(-1)
        .u32(0)
        .i32(align)
        .f32s(&IDENTITY)
        .f32s(&[1.0])
}

/// Version 18 vertex block with points only.
fn v18_vertices(points: &[[f32; 3]]) -> Bytes {
    let mut bytes = Bytes::new().i32(points.len() as i32);
    for p in points {
        bytes = bytes.f32s(p);
    }
    // normals, tangents, bitangents, uvs, extra uvs
    bytes.i32s(&[0, 0, 0, 0, 0])
}

/// One triangle declaring `total_degrees` corners.
fn one_triangle(total_degrees: i32) -> Bytes {
    Bytes::new()
        .i32(1)
        .i32(total_degrees)
        .i32(1)
        .i32(3)
        .u16s(&[0, 0, 0, 0, 0, 0])
        .u16s(&[1, 1, 1, 1, 1, 1])
        .u16s(&[2, 2, 2, 2, 2, 2])
        .i16(0)
}

/// Version 15-18 tail with no tables and the given bounding box.
fn v15_empty_tail(bounds: [f32; 6]) -> Bytes {
    // bones, vertex indices, primitive type, face indices, material infos
    Bytes::new().i32s(&[0, 0, 4, 0, 0]).f32s(&bounds)
}

fn triangle_points() -> [[f32; 3]; 3] {
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]]
}

// ==================== ELU ====================

#[test]
fn test_minimal_v18_file_yields_dummy_node() {
    let data = elu_header(0x12345678, 18, 1)
        .append(v18_name_info("Dummy01", 0))
        .append(v18_vertices(&[]))
        .i32(0) // faces
        .i32s(&[0, 0, 0]) // point colours, material id, skin
        .append(v15_empty_tail([-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]))
        .build();

    let doc = decode_mesh(&data).unwrap();
    assert_eq!(doc.version, EluVersion::V18);
    assert_eq!(doc.nodes.len(), 1);
    let node = &doc.nodes[0];
    assert_eq!(node.name, "Dummy01");
    assert!(node.is_dummy());
    assert!(node.is_root());
    assert_eq!(node.primitive_type, 4);
    assert_eq!(
        node.bounds,
        Some(BoundingBox {
            min: [-1.0, -1.0, -1.0],
            max: [1.0, 1.0, 1.0],
        })
    );
    assert_eq!(
        doc.diagnostics,
        vec![Diagnostic::SignatureMismatch {
            expected: ELU_SIGNATURE,
            found: 0x12345678,
        }]
    );
    assert_eq!(doc.meshes().count(), 0);
}

#[test]
fn test_required_signature_rejects_mismatch() {
    let data = elu_header(0x12345678, 18, 0).build();
    let options = DecodeOptions::new().with_require_signature(true);
    assert!(matches!(
        decode_mesh_with(&data, &options),
        Err(Error::InvalidSignature { found: 0x12345678, .. })
    ));
}

fn triangle_file(total_degrees: i32, skin: Bytes) -> Vec<u8> {
    elu_header(ELU_SIGNATURE, 18, 1)
        .append(v18_name_info("Tri01", 0))
        .append(v18_vertices(&triangle_points()))
        .append(one_triangle(total_degrees))
        .i32s(&[0, 3]) // point colours, material id
        .append(skin)
        .append(v15_empty_tail([0.0; 6]))
        .build()
}

#[test]
fn test_total_degrees_mismatch_is_diagnosed() {
    let data = triangle_file(4, Bytes::new().i32(0));
    let doc = decode_mesh(&data).unwrap();
    let node = &doc.nodes[0];
    assert_eq!(node.polygons.len(), 1);
    assert_eq!(node.polygons[0].corners.len(), 3);
    assert_eq!(node.polygons[0].corners[1].uv2, Some(1));
    assert_eq!(node.material_id, 3);
    assert!(!node.is_dummy());
    assert_eq!(
        doc.diagnostics,
        vec![Diagnostic::TotalDegreesMismatch {
            node: "Tri01".to_string(),
            declared: 4,
            actual: 3,
        }]
    );
}

#[test]
fn test_total_degrees_mismatch_fails_when_strict() {
    let data = triangle_file(4, Bytes::new().i32(0));
    let result = decode_mesh_with(&data, &DecodeOptions::new().with_strict(true));
    assert!(matches!(result, Err(Error::StructuralInvariant { node, .. }) if node == "Tri01"));
}

#[test]
fn test_consistent_triangle_has_no_diagnostics() {
    let data = triangle_file(3, Bytes::new().i32(0));
    let doc = decode_mesh(&data).unwrap();
    assert!(doc.is_clean());
    // The stored box replaces the one computed from points.
    assert_eq!(doc.nodes[0].bounds.map(|b| b.max), Some([0.0; 3]));
}

fn skin_entry(weights: &[f32]) -> Bytes {
    let mut bytes = Bytes::new().i32(weights.len() as i32);
    for (bone, weight) in weights.iter().enumerate() {
        bytes = bytes.u16s(&[bone as u16, 0]).f32s(&[*weight]);
    }
    bytes
}

#[test]
fn test_skin_weights_capped_to_three() {
    let skin = Bytes::new()
        .i32(3)
        .append(skin_entry(&[0.1, 0.3, 0.05, 0.4, 0.15]))
        .append(skin_entry(&[1.0]))
        .append(skin_entry(&[0.5, 0.5]));
    let doc = decode_mesh(&triangle_file(3, skin)).unwrap();
    let node = &doc.nodes[0];
    assert!(node.is_skinned());
    let first = &node.skin[0];
    assert_eq!(first.influences.len(), 3);
    let bones: Vec<u16> = first.influences.iter().map(|i| i.bone).collect();
    assert_eq!(bones, vec![3, 1, 4]);
    assert!((first.total_weight() - 1.0).abs() < 1e-6);
    assert_eq!(node.skin[2].influences.len(), 2);
    assert_eq!(node.skin[2].influences[0].weight, 0.5);
}

#[test]
fn test_skin_count_mismatch_is_diagnosed() {
    let skin = Bytes::new().i32(1).append(skin_entry(&[1.0]));
    let doc = decode_mesh(&triangle_file(3, skin)).unwrap();
    assert!(matches!(
        doc.diagnostics.as_slice(),
        [Diagnostic::SkinCountMismatch { points: 3, skin: 1, .. }]
    ));
}

#[test]
fn test_unknown_alignment_defaults_to_none() {
    let data = elu_header(ELU_SIGNATURE, 18, 1)
        .append(v18_name_info("Board", 9))
        .append(v18_vertices(&[]))
        .i32(0)
        .i32s(&[0, 0, 0])
        .append(v15_empty_tail([0.0; 6]))
        .build();
    let doc = decode_mesh(&data).unwrap();
    assert_eq!(doc.nodes[0].align, MeshAlign::None);
    assert!(matches!(
        doc.diagnostics.as_slice(),
        [Diagnostic::UnrecognizedEnumValue { value: 9, .. }]
    ));
}

#[test]
fn test_unsupported_mesh_version() {
    // Header only: the version must be rejected before any node is read.
    let data = elu_header(ELU_SIGNATURE, 4, 3).build();
    assert!(matches!(
        decode_mesh(&data),
        Err(Error::UnsupportedEluVersion { version: 4 })
    ));
    let data = elu_header(ELU_SIGNATURE, 19, 0).build();
    assert!(matches!(
        decode_mesh(&data),
        Err(Error::UnsupportedEluVersion { version: 19 })
    ));
}

#[test]
fn test_truncated_mesh_fails() {
    let mut data = triangle_file(3, Bytes::new().i32(0));
    data.truncate(data.len() - 5);
    assert!(matches!(decode_mesh(&data), Err(Error::TruncatedInput { .. })));
}

#[test]
fn test_mesh_decode_is_deterministic() {
    let skin = Bytes::new()
        .i32(3)
        .append(skin_entry(&[0.2, 0.2, 0.2, 0.4]))
        .append(skin_entry(&[1.0]))
        .append(skin_entry(&[1.0]));
    let data = triangle_file(3, skin);
    let first = decode_mesh(&data).unwrap();
    let second = decode_mesh(&data).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_v12_quintuple_layouts() {
    let data = elu_header(ELU_SIGNATURE, 12, 1)
        .append(v18_name_info("Old", 1))
        // points, normals, tangents (3 floats), bitangents, uvs
        .i32(1)
        .f32s(&[1.0, 2.0, 3.0])
        .i32(0)
        .i32(1)
        .f32s(&[0.0, 1.0, 0.0])
        .i32s(&[0, 0])
        // one triangle of quintuples
        .i32s(&[1, 3, 1, 3])
        .u16s(&[0, 1, 2, 3, 4])
        .u16s(&[0, 1, 2, 3, 4])
        .u16s(&[0, 1, 2, 3, 4])
        .i16(-1)
        .i32s(&[0, 0, 0])
        // tail: one bone, one vertex index, primitive, face indices, materials
        .i32(1)
        .f32s(&IDENTITY)
        .u16s(&[7])
        .i32(1)
        .u16s(&[0, 1, 2, 3, 4])
        .i32(4)
        .i32(3)
        .u16s(&[0, 0, 0])
        .i32(1)
        .i32(2)
        .u16s(&[0, 3])
        .i32(-1)
        .build();

    let doc = decode_mesh(&data).unwrap();
    let node = &doc.nodes[0];
    assert_eq!(node.align, MeshAlign::Normal);
    assert_eq!(node.tangents, vec![[0.0, 1.0, 0.0, 1.0]]);
    let corner = node.polygons[0].corners[0];
    assert_eq!((corner.uv, corner.normal, corner.uv2), (1, 2, None));
    assert_eq!(node.polygons[0].material_id, -1);
    let vertex = node.vertex_indices[0];
    assert_eq!((vertex.normal, vertex.uv, vertex.tangent), (1, 2, 3));
    assert_eq!(node.bone_indices, vec![7]);
    assert_eq!(node.face_indices.len(), 3);
    assert_eq!(node.index_triangle_count(), 1);
    assert_eq!(node.material_infos[0].count, 3);
    assert_eq!(node.material_infos[0].masking_id, -1);
    // No stored box before v13: computed from the single point.
    assert_eq!(node.bounds.map(|b| b.min), Some([1.0, 2.0, 3.0]));
}

/// One point, one tangent and a single vertex index in the version 13-17 layout.
fn legacy_node(version: u32, name: &str) -> Bytes {
    let mut bytes = Bytes::new().append(v18_name_info(name, 0));
    if version >= 14 {
        bytes = bytes.u32(0x112);
    }
    if version >= 15 {
        bytes = bytes.i32(7);
    }
    bytes = bytes.i32(1).f32s(&[1.0, 2.0, 3.0]).i32(0).i32(1);
    bytes = if version >= 16 {
        bytes.f32s(&[0.0, 1.0, 0.0, -1.0])
    } else {
        bytes.f32s(&[0.0, 1.0, 0.0])
    };
    // bitangents, uvs
    bytes = bytes.i32s(&[0, 0]);
    if version == 15 || version == 16 {
        bytes = bytes.i32(2).f32s(&[0.5; 6]);
    }
    // faces, point colours, material id, skin, bones
    bytes = bytes.i32s(&[0, 0, 0, 0, 0]).i32(1);
    bytes = if version >= 15 {
        bytes.u16s(&[0, 1, 2, 3, 4, 5])
    } else {
        bytes.u16s(&[0, 1, 2, 3, 4])
    };
    // primitive type, face indices, material infos
    bytes.i32s(&[4, 0, 0]).f32s(&[-2.0, -2.0, -2.0, 2.0, 2.0, 2.0])
}

fn assert_legacy_layout(version: u32) {
    let data = elu_header(ELU_SIGNATURE, version, 2)
        .append(legacy_node(version, "Mesh01"))
        .append(legacy_node(version, "Mesh02"))
        .build();

    let doc = decode_mesh(&data).unwrap();
    assert!(doc.is_clean());
    assert_eq!(doc.version.raw(), version);
    assert_eq!(doc.nodes.len(), 2);
    assert_eq!(doc.nodes[1].name, "Mesh02");
    for node in &doc.nodes {
        assert_eq!(node.points, vec![[1.0, 2.0, 3.0]]);
        let w = if version >= 16 { -1.0 } else { 1.0 };
        assert_eq!(node.tangents, vec![[0.0, 1.0, 0.0, w]]);
        let light_map = (version >= 15).then_some(7);
        assert_eq!(node.light_map_id, light_map);
        let vertex = node.vertex_indices[0];
        if version >= 15 {
            assert_eq!((vertex.uv, vertex.uv2, vertex.tangent), (2, Some(3), 4));
        } else {
            assert_eq!((vertex.uv, vertex.uv2, vertex.tangent), (2, None, 3));
        }
        assert_eq!(node.primitive_type, 4);
        assert_eq!(
            node.bounds,
            Some(BoundingBox {
                min: [-2.0; 3],
                max: [2.0; 3],
            })
        );
    }
}

#[test]
fn test_v13_layout() {
    assert_legacy_layout(13);
}

#[test]
fn test_v14_layout_with_fvf_word() {
    assert_legacy_layout(14);
}

#[test]
fn test_v15_layout_with_light_map() {
    assert_legacy_layout(15);
}

#[test]
fn test_v16_layout_with_wide_tangents() {
    assert_legacy_layout(16);
}

#[test]
fn test_v17_layout_without_light_map_uvs() {
    assert_legacy_layout(17);
}

#[test]
fn test_v20_node_layout() {
    let data = elu_header(ELU_SIGNATURE, 20, 2)
        // root
        .string("Bip01")
        .i32(-1)
        .string("")
        .f32s(&IDENTITY)
        .f32s(&[0.5])
        .u32(0x10)
        .i32(2)
        .i32(1)
        // points, uvs, extra uvs, normals, tangents, bitangents
        .i32(1)
        .f32s(&[4.0, 5.0, 6.0])
        .i32(1)
        .f32s(&[0.25, 0.75, 0.0])
        .i32(0)
        .i32(0)
        .i32(1)
        .f32s(&[1.0, 0.0, 0.0, -1.0])
        .i32(0)
        .i32(0) // faces
        .i32s(&[0, 0, 0])
        // primitive, vertex indices, bones, materials, face indices, bounds
        .i32(4)
        .i32(1)
        .u16s(&[0, 1, 2, 3, 4, 5])
        .i32(0)
        .i32(0)
        .i32(0)
        .f32s(&[0.0; 6])
        // child
        .string("Bip01 Pelvis")
        .i32(0)
        .string("Bip01")
        .f32s(&IDENTITY)
        .f32s(&[1.0])
        .u32(0)
        .i32(0)
        .i32(0)
        .i32s(&[0, 0, 0, 0, 0, 0])
        .i32(0)
        .i32s(&[0, 0, 0])
        .i32s(&[4, 0, 0, 0, 0])
        .f32s(&[0.0; 6])
        .build();

    let doc = decode_mesh(&data).unwrap();
    assert!(doc.is_clean());
    let root = &doc.nodes[0];
    assert_eq!(root.base_visibility, 0.5);
    assert_eq!(root.flags & 0x10, 0x10);
    assert_eq!(root.align, MeshAlign::ZFixed);
    assert_eq!(root.lod_index, 1);
    assert_eq!(root.uvs, vec![[0.25, 0.75, 0.0]]);
    assert_eq!(root.tangents, vec![[1.0, 0.0, 0.0, -1.0]]);
    assert_eq!(root.vertex_indices[0].uv2, Some(3));
    let child = &doc.nodes[1];
    assert_eq!(child.parent_id, 0);
    assert_eq!(doc.parent_of(child).map(|n| n.name.as_str()), Some("Bip01"));
}

#[test]
fn test_read_elu_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tri.elu");
    std::fs::write(&path, triangle_file(3, Bytes::new().i32(0))).unwrap();

    let doc = read_elu(&path).unwrap();
    assert_eq!(doc.nodes[0].points.len(), 3);

    let summary = inspect_file(&path, &DecodeOptions::default()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
    assert_eq!(json["format"], "elu");
    assert_eq!(json["nodes"][0]["name"], "Tri01");

    match summary {
        FileSummary::Elu(summary) => {
            assert_eq!(summary.nodes.len(), 1);
            assert_eq!(summary.total_points(), 3);
            assert_eq!(summary.nodes[0].parent, None);
        }
        FileSummary::Ani(_) => panic!("expected an ELU summary"),
    }
}

#[test]
fn test_read_elu_missing_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(read_elu(dir.path().join("none.elu")), Err(Error::Io(_))));
}

// ==================== ANI ====================

fn ani_header(version: u32, model_count: i32, kind: i32) -> Bytes {
    Bytes::new()
        .u32(eluani::formats::ani::ANI_SIGNATURE)
        .u32(version)
        .i32(30)
        .i32(model_count)
        .i32(kind)
}

fn vec3_keys(keys: &[([f32; 3], i32)]) -> Bytes {
    let mut bytes = Bytes::new();
    for (value, frame) in keys {
        bytes = bytes.f32s(value).i32(*frame);
    }
    bytes
}

#[test]
fn test_position_track_padding() {
    let data = ani_header(11, 1, 2)
        .string("Bip01")
        .string("")
        .f32s(&IDENTITY)
        .i32s(&[0, 0, 3])
        .append(vec3_keys(&[
            ([0.0, 0.0, 0.0], 0),
            ([1.0, 0.0, 0.0], 10),
            ([1.5, -2.25, 3.125], 20),
        ]))
        .i32s(&[0, 0, 0]) // rotation
        .i32s(&[0, 0, 0]) // scale
        .i32s(&[0, 0, 1])
        .i32(0)
        .f32s(&[1.0])
        .build();

    let doc = decode_animation(&data).unwrap();
    let bone = doc.nodes[0].bone().unwrap();
    assert_eq!(bone.position.declared_count, 3);
    assert_eq!(bone.position.len(), 4);
    let third = bone.position.keys[2];
    let fourth = bone.position.keys[3];
    assert_eq!(fourth.frame, third.frame);
    assert_eq!(fourth.value.map(f32::to_bits), third.value.map(f32::to_bits));
    assert!(bone.rotation.is_empty());
    assert!(bone.scale.is_empty());
    assert_eq!(doc.root_node().map(|n| n.name.as_str()), Some("Bip01"));
    assert_eq!(doc.nodes[0].visibility.len(), 1);
}

fn v12_bone(name: &str) -> Bytes {
    Bytes::new()
        .string(name)
        .f32s(&[0.0, 1.0, 0.0])
        .f32s(&[0.0, 0.0, 0.0, 1.0])
        .f32s(&[1.0, 1.0, 1.0])
}

#[test]
fn test_unknown_count_type_abandons_transform_tracks_only() {
    let data = ani_header(12, 2, 2)
        // First bone: position keys in an unknown encoding, then its own
        // visibility record.
        .append(v12_bone("Broken"))
        .i32s(&[0, 99, 2])
        .i32s(&[0, 0, 1])
        .i32(4)
        .f32s(&[0.25])
        // Second bone decodes normally.
        .append(v12_bone("Bip01"))
        .i32s(&[0, 16, 1])
        .append(vec3_keys(&[([1.0, 2.0, 3.0], 5)]))
        .i32s(&[0, 20, 1])
        .f32s(&[0.0, 0.0, 0.0, 1.0])
        .i32(5)
        .i32s(&[0, 0, 0])
        .i32s(&[0, 0, 1])
        .i32(5)
        .f32s(&[0.5])
        .build();

    let doc = decode_animation(&data).unwrap();
    assert_eq!(doc.nodes.len(), 2);

    let broken = &doc.nodes[0];
    assert!(broken.incomplete);
    assert_eq!(broken.visibility.len(), 1);
    assert_eq!(broken.visibility.keys[0].frame, 4);
    assert_eq!(broken.visibility.keys[0].value, 0.25);
    assert!(broken.bone().unwrap().position.is_empty());
    assert!(broken.bone().unwrap().scale.is_empty());
    assert_eq!(
        doc.diagnostics,
        vec![Diagnostic::UnknownCountType {
            node: "Broken".to_string(),
            track: "position",
            count_type: 99,
        }]
    );
    assert_eq!(doc.incomplete_nodes().count(), 1);

    let root = doc.root_node().unwrap();
    assert!(!root.incomplete);
    let bone = root.bone().unwrap();
    assert_eq!(bone.position.keys[0].value, [1.0, 2.0, 3.0]);
    assert_eq!(bone.position.len(), 2);
    assert_eq!(bone.rotation.len(), 2);
    assert_eq!(root.visibility.keys[0].value, 0.5);
    assert!(matches!(bone.bind, BindPose::Components { .. }));
}

#[test]
fn test_unknown_count_type_fails_when_strict() {
    let data = ani_header(12, 1, 2)
        .append(v12_bone("Broken"))
        .i32s(&[0, 99, 2])
        .build();
    assert!(matches!(
        decode_animation_with(&data, &DecodeOptions::strict()),
        Err(Error::StructuralInvariant { node, .. }) if node == "Broken"
    ));
}

#[test]
fn test_half_float_keys_and_reconstructed_w() {
    let data = ani_header(12, 1, 2)
        .append(v12_bone("Bip01"))
        .i32s(&[0, 10, 1])
        .i32(3)
        .u16s(&[0x3C00, 0x0000, 0xC000])
        .i32s(&[0, 10, 2])
        .i32(3)
        .u16s(&[0x0000, 0x0000, 0x0000])
        .i32(6)
        .u16s(&[0x3C00, 0x3C00, 0x0000])
        .i32s(&[0, 0, 1])
        .f32s(&[2.0, 2.0, 2.0])
        .i32(9)
        .i32s(&[0, 0, 0])
        .build();

    let doc = decode_animation(&data).unwrap();
    let bone = doc.nodes[0].bone().unwrap();
    assert_eq!(bone.position.keys[0].frame, 3);
    assert_eq!(bone.position.keys[0].value, [1.0, 0.0, -2.0]);
    assert_eq!(bone.rotation.keys[0].value, [0.0, 0.0, 0.0, 1.0]);
    // |xyz|² = 2 exceeds one, so w is zero.
    assert_eq!(bone.rotation.keys[1].value, [1.0, 1.0, 0.0, 0.0]);
    assert_eq!(bone.rotation.len(), 3);
    assert_eq!(bone.scale.len(), 1);
    assert_eq!(bone.scale.keys[0].frame, 9);
}

#[test]
fn test_old_bone_file_without_parent_or_scale() {
    let data = ani_header(4, 1, 2)
        .string("Bip01")
        .f32s(&IDENTITY)
        .i32(1)
        .append(vec3_keys(&[([0.0, 0.0, 1.0], 0)]))
        .i32(1)
        .f32s(&[0.0, 0.0, 0.0, 1.0])
        .i32(0)
        // no scale track before version 5; visibility is value then frame
        .i32(1)
        .f32s(&[-3.0])
        .i32(15)
        .build();

    let doc = decode_animation(&data).unwrap();
    assert_eq!(doc.version, AniVersion::V6);
    let node = &doc.nodes[0];
    let bone = node.bone().unwrap();
    assert_eq!(bone.parent_name, "");
    assert_eq!(bone.position.len(), 2);
    assert!(bone.scale.is_empty());
    assert_eq!(node.visibility.keys[0].frame, 15);
    assert_eq!(node.visibility.keys[0].value, 0.0);
}

#[test]
fn test_v5_bone_has_scale_but_no_parent() {
    let data = ani_header(5, 1, 2)
        .string("Bip01")
        .f32s(&IDENTITY)
        .i32(1)
        .append(vec3_keys(&[([0.0, 0.0, 1.0], 0)]))
        .i32(0)
        .i32(1)
        .append(vec3_keys(&[([2.0, 2.0, 2.0], 6)]))
        // visibility is frame then value from version 5
        .i32(1)
        .i32(3)
        .f32s(&[0.75])
        .build();

    let doc = decode_animation(&data).unwrap();
    assert_eq!(doc.version, AniVersion::V6);
    let node = &doc.nodes[0];
    let bone = node.bone().unwrap();
    assert_eq!(bone.parent_name, "");
    assert_eq!(bone.scale.len(), 1);
    assert_eq!(bone.scale.keys[0].value, [2.0, 2.0, 2.0]);
    assert_eq!(node.visibility.keys[0].frame, 3);
    assert_eq!(node.visibility.keys[0].value, 0.75);
}

#[test]
fn test_v7_bone_reads_parent_and_clamps_visibility() {
    let data = ani_header(7, 1, 2)
        .string("Bip01 Spine")
        .string("Bip01")
        .f32s(&IDENTITY)
        .i32s(&[0, 0, 0])
        .i32(1)
        .i32(2)
        .f32s(&[-0.5])
        .build();

    let doc = decode_animation(&data).unwrap();
    assert_eq!(doc.version, AniVersion::V7);
    let node = &doc.nodes[0];
    assert_eq!(node.bone().unwrap().parent_name, "Bip01");
    assert_eq!(node.visibility.keys[0].frame, 2);
    assert_eq!(node.visibility.keys[0].value, 0.0);
}

#[test]
fn test_vertex_animation_with_bounds() {
    let data = ani_header(8, 1, 1)
        .string("Cloth")
        .i32(2)
        .i32(2)
        .u32(0)
        .u32(10)
        .f32s(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0])
        .f32s(&[0.0, 1.0, 0.0, 1.0, 1.0, 0.0])
        .f32s(&[0.0, 0.0, 0.0, 1.0, 1.0, 0.0])
        .i32(0)
        .build();

    let doc = decode_animation(&data).unwrap();
    assert_eq!(doc.header.kind, AnimationKind::Vertex);
    assert_eq!(doc.version, AniVersion::V7);
    let vertex = doc.nodes[0].vertex().unwrap();
    assert_eq!(vertex.frames, vec![0, 10]);
    assert_eq!(vertex.positions[1][1], [1.0, 1.0, 0.0]);
    assert_eq!(vertex.bounds.map(|b| b.max), Some([1.0, 1.0, 0.0]));
    assert!(doc.root_node().is_none());
}

#[test]
fn test_tm_animation_reads_visibility_only() {
    let data = ani_header(9, 1, 3).i32(1).i32(0).f32s(&[-0.5]).build();
    let doc = decode_animation(&data).unwrap();
    assert!(matches!(doc.nodes[0].data, AniNodeData::Empty));
    // No clamp from version 9 on.
    assert_eq!(doc.nodes[0].visibility.keys[0].value, -0.5);
    assert_eq!(doc.nodes[0].visibility.clamped().keys[0].value, 0.0);
    assert!(matches!(
        doc.diagnostics.as_slice(),
        [Diagnostic::UnhandledAnimationKind { kind: "tm" }]
    ));
}

#[test]
fn test_invalid_animation_header() {
    let data = ani_header(12, 0, 7).build();
    assert!(matches!(
        decode_animation(&data),
        Err(Error::InvalidAnimationKind { value: 7 })
    ));
    let data = ani_header(10, 0, 2).build();
    assert!(matches!(
        decode_animation(&data),
        Err(Error::UnsupportedAniVersion { version: 10 })
    ));
}

#[test]
fn test_unsupported_version_reported_before_kind() {
    let data = ani_header(10, 0, 7).build();
    assert!(matches!(
        decode_animation(&data),
        Err(Error::UnsupportedAniVersion { version: 10 })
    ));
}

#[test]
fn test_read_ani_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("idle.ani");
    let data = ani_header(9, 1, 2)
        .string("Bip01")
        .string("")
        .f32s(&IDENTITY)
        .i32s(&[0, 0, 0, 0])
        .build();
    std::fs::write(&path, data).unwrap();

    let doc = read_ani(&path).unwrap();
    assert_eq!(doc.nodes.len(), 1);
    match inspect_file(&path, &DecodeOptions::default()).unwrap() {
        FileSummary::Ani(summary) => {
            assert_eq!(summary.root.as_deref(), Some("Bip01"));
            assert_eq!(summary.max_frame, 30);
        }
        FileSummary::Elu(_) => panic!("expected an ANI summary"),
    }
}
