//! Skinning Tests
//!
//! Tests for:
//! - Vertex-to-bone weight reduction into the fixed-width GPU layout
//! - Matrix palette computation from bone world transforms
//! - Load-time validation (bone limits, unresolved and unreachable bones)
//! - End-to-end asset instantiation

use glam::{Mat4, Quat, Vec3};

use marionette::animation::{PlayMode, TrackPlayer, TransformTrack};
use marionette::asset::{
    instantiate, AssetAnimation, AssetBone, AssetChannel, AssetMesh, AssetNode, AssetScene,
};
use marionette::errors::MarionetteError;
use marionette::scene::{FrameContext, Node, SceneGraph};
use marionette::skinning::{
    bind_vertex_bones, BoneWeight, Geometry, SkinnedMesh, MAX_VERTEX_BONES,
};

const EPSILON: f32 = 1e-5;

fn translation_of(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}

// ============================================================================
// Vertex bone binding
// ============================================================================

#[test]
fn binding_keeps_four_highest_weight_bones() {
    // One vertex influenced by six bones with distinct weights.
    let weights = [0.05_f32, 0.3, 0.1, 0.25, 0.12, 0.18];
    let bones: Vec<Vec<BoneWeight>> = weights
        .iter()
        .map(|&w| vec![BoneWeight::new(0, w)])
        .collect();

    let out = bind_vertex_bones(1, &bones).unwrap();
    assert_eq!(out.len(), 1);

    let mut kept: Vec<(u32, f32)> = out[0]
        .joints
        .iter()
        .zip(out[0].weights.iter())
        .map(|(&j, &w)| (j, w))
        .collect();
    kept.sort_by_key(|&(j, _)| j);

    // Top four by weight: bones 1, 3, 4 and 5; bones 0 and 2 are dropped.
    assert_eq!(
        kept.iter().map(|&(j, _)| j).collect::<Vec<_>>(),
        vec![1, 3, 4, 5]
    );
    for &(j, w) in &kept {
        assert!((w - weights[j as usize]).abs() < EPSILON, "weight of bone {j} changed");
    }

    // Truncation is lossy on purpose: the kept weights are not renormalized.
    let sum: f32 = out[0].weights.iter().sum();
    assert!((sum - 0.85).abs() < EPSILON);
}

#[test]
fn binding_pads_sparse_vertices_with_zero_weights() {
    let bones = vec![vec![BoneWeight::new(0, 1.0)]];
    let out = bind_vertex_bones(1, &bones).unwrap();

    let nonzero: Vec<f32> = out[0].weights.iter().copied().filter(|&w| w > 0.0).collect();
    assert_eq!(nonzero, vec![1.0]);
    assert_eq!(out[0].weights.iter().filter(|&&w| w == 0.0).count(), MAX_VERTEX_BONES - 1);
}

#[test]
fn binding_separates_vertices() {
    let bones = vec![
        vec![BoneWeight::new(0, 0.7), BoneWeight::new(1, 0.4)],
        vec![BoneWeight::new(1, 0.6)],
    ];
    let out = bind_vertex_bones(2, &bones).unwrap();

    let strongest =
        |set: &marionette::skinning::VertexBoneSet| -> (u32, f32) {
            set.joints
                .iter()
                .zip(set.weights.iter())
                .map(|(&j, &w)| (j, w))
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap()
        };
    assert_eq!(strongest(&out[0]), (0, 0.7));
    assert_eq!(strongest(&out[1]), (1, 0.6));
}

#[test]
fn binding_rejects_too_many_bones() {
    let bones: Vec<Vec<BoneWeight>> = (0..129).map(|_| Vec::new()).collect();
    let result = bind_vertex_bones(4, &bones);
    assert!(matches!(result, Err(MarionetteError::TooManyBones { .. })));
}

#[test]
fn binding_rejects_out_of_range_vertex() {
    let bones = vec![vec![BoneWeight::new(5, 1.0)]];
    let result = bind_vertex_bones(2, &bones);
    assert!(matches!(
        result,
        Err(MarionetteError::VertexOutOfRange { vertex: 5, .. })
    ));
}

// ============================================================================
// Palette computation
// ============================================================================

#[test]
fn identity_bone_and_offset_give_identity_palette() {
    let mut graph = SceneGraph::new();
    let bone = graph.add_node(Node::new("bone"));

    let skin = SkinnedMesh::new(
        "skin",
        vec![bone],
        vec![Mat4::IDENTITY],
        Vec::new(),
        Geometry::default(),
    )
    .unwrap();
    let key = graph.add_skinned_mesh(skin).unwrap();

    graph.update(&FrameContext::new(0.0));

    let palette = graph.get_skin(key).unwrap().palette();
    assert!(palette[0].abs_diff_eq(Mat4::IDENTITY, EPSILON));
}

#[test]
fn palette_composes_world_with_bind_offset() {
    let mut graph = SceneGraph::new();
    let bone = graph.add_node(Node::with_transform(
        "bone",
        Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)),
    ));

    // Bind pose at y=1, so the offset is its inverse.
    let offset = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)).inverse();
    let skin =
        SkinnedMesh::new("skin", vec![bone], vec![offset], Vec::new(), Geometry::default())
            .unwrap();
    let key = graph.add_skinned_mesh(skin).unwrap();

    graph.update(&FrameContext::new(0.0));

    let palette = graph.get_skin(key).unwrap().palette();
    let expected = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
    assert!(palette[0].abs_diff_eq(expected, EPSILON));
}

#[test]
fn palette_tracks_animated_bone_across_frames() {
    let track = TransformTrack::from_uniform_scale_keys(
        [(0.0, Vec3::ZERO), (10.0, Vec3::new(100.0, 0.0, 0.0))],
        [(0.0, Quat::IDENTITY), (10.0, Quat::IDENTITY)],
        [(0.0, 1.0), (10.0, 1.0)],
    )
    .unwrap();

    let mut graph = SceneGraph::new();
    let bone = graph.add_node(Node::new("bone").with_player(TrackPlayer::new(track, PlayMode::Loop)));
    let skin = SkinnedMesh::new(
        "skin",
        vec![bone],
        vec![Mat4::IDENTITY],
        Vec::new(),
        Geometry::default(),
    )
    .unwrap();
    let key = graph.add_skinned_mesh(skin).unwrap();

    graph.update(&FrameContext::new(0.0));
    let rest = translation_of(&graph.get_skin(key).unwrap().palette()[0]);

    graph.update(&FrameContext::new(5.0));
    let moved = translation_of(&graph.get_skin(key).unwrap().palette()[0]);

    assert!(rest.abs_diff_eq(Vec3::ZERO, EPSILON));
    assert!(moved.abs_diff_eq(Vec3::new(50.0, 0.0, 0.0), EPSILON));
}

// ============================================================================
// Load-time validation
// ============================================================================

#[test]
fn skinned_mesh_rejects_mismatched_offsets() {
    let mut graph = SceneGraph::new();
    let bone = graph.add_node(Node::new("bone"));

    let result = SkinnedMesh::new(
        "skin",
        vec![bone],
        vec![Mat4::IDENTITY, Mat4::IDENTITY],
        Vec::new(),
        Geometry::default(),
    );
    assert!(matches!(
        result,
        Err(MarionetteError::BoneCountMismatch { .. })
    ));
}

#[test]
fn graph_rejects_unreachable_bone() {
    let mut graph = SceneGraph::new();
    // Inserted straight into the arena, never attached under a root: the
    // traversal would never refresh this node.
    let loose = graph.nodes.insert(Node::new("loose"));

    let skin = SkinnedMesh::new(
        "skin",
        vec![loose],
        vec![Mat4::IDENTITY],
        Vec::new(),
        Geometry::default(),
    )
    .unwrap();

    let result = graph.add_skinned_mesh(skin);
    assert!(matches!(
        result,
        Err(MarionetteError::UnreachableBone { .. })
    ));
}

// ============================================================================
// Asset instantiation
// ============================================================================

fn skinned_asset() -> AssetScene {
    let mut root = AssetNode::new("torso", Mat4::IDENTITY);
    root.children.push(AssetNode::new("arm", Mat4::IDENTITY));
    root.meshes.push(0);

    let mesh = AssetMesh {
        name: "body".to_string(),
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        normals: vec![Vec3::Z; 3],
        uvs: Vec::new(),
        indices: vec![0, 1, 2],
        bones: vec![
            AssetBone {
                name: "arm".to_string(),
                offset: Mat4::IDENTITY,
                weights: vec![BoneWeight::new(0, 1.0), BoneWeight::new(1, 0.5)],
            },
            AssetBone {
                name: "torso".to_string(),
                offset: Mat4::IDENTITY,
                weights: vec![BoneWeight::new(1, 0.5), BoneWeight::new(2, 1.0)],
            },
        ],
    };

    // Key timestamps in ticks: 2 ticks per second, so the track spans ten
    // seconds.
    let animation = AssetAnimation {
        name: "wave".to_string(),
        ticks_per_second: 2.0,
        channels: vec![AssetChannel {
            node_name: "arm".to_string(),
            position_keys: vec![(0.0, Vec3::ZERO), (20.0, Vec3::new(4.0, 0.0, 0.0))],
            rotation_keys: vec![(0.0, Quat::IDENTITY), (20.0, Quat::IDENTITY)],
            scaling_keys: vec![(0.0, Vec3::ONE), (20.0, Vec3::ONE)],
        }],
    };

    AssetScene {
        root,
        meshes: vec![mesh],
        animation: Some(animation),
    }
}

#[test]
fn instantiate_builds_animated_skinned_scene() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut graph = instantiate(&skinned_asset()).unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.skins.len(), 1);

    graph.update(&FrameContext::new(5.0));

    // Ticks converted to seconds: the channel spans [0, 10], so t=5 is the
    // midpoint of the four-unit move.
    let arm = graph.find_by_name("arm").unwrap();
    let world = translation_of(graph.get_node(arm).unwrap().world_matrix());
    assert!(world.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), EPSILON));

    // Bone 0 of the mesh is the arm; identity offset leaves the palette
    // equal to the bone world transform.
    let skin = graph.skins.values().next().unwrap();
    let palette0 = translation_of(&skin.palette()[0]);
    assert!(palette0.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), EPSILON));
}

#[test]
fn instantiate_rejects_unknown_bone_name() {
    let mut asset = skinned_asset();
    asset.meshes[0].bones[1].name = "tail".to_string();

    let result = instantiate(&asset);
    assert!(matches!(
        result,
        Err(MarionetteError::UnresolvedBone { .. })
    ));
}

#[test]
fn instantiate_accepts_static_single_key_channel() {
    // Channels with one key at tick 0 still get a looping player; sampling
    // far past zero must hold the authored pose.
    let mut asset = skinned_asset();
    let channel = &mut asset.animation.as_mut().unwrap().channels[0];
    channel.position_keys = vec![(0.0, Vec3::new(1.0, 0.0, 0.0))];
    channel.rotation_keys = vec![(0.0, Quat::IDENTITY)];
    channel.scaling_keys = vec![(0.0, Vec3::ONE)];

    let mut graph = instantiate(&asset).unwrap();
    graph.update(&FrameContext::new(185.0));

    let arm = graph.find_by_name("arm").unwrap();
    let world = translation_of(graph.get_node(arm).unwrap().world_matrix());
    assert!(world.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), EPSILON));
}

#[test]
fn instantiate_rejects_out_of_range_mesh_index() {
    let mut asset = skinned_asset();
    asset.root.meshes.push(7);

    let result = instantiate(&asset);
    assert!(matches!(
        result,
        Err(MarionetteError::MeshIndexOutOfRange { index: 7, .. })
    ));
}

#[test]
fn instantiate_rejects_channel_with_no_keys() {
    let mut asset = skinned_asset();
    asset.animation.as_mut().unwrap().channels[0].rotation_keys.clear();

    let result = instantiate(&asset);
    assert!(matches!(result, Err(MarionetteError::EmptyTrack)));
}
