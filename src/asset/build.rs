use glam::Mat4;
use log::debug;
use rustc_hash::FxHashMap;

use crate::animation::{PlayMode, TrackPlayer, TransformTrack};
use crate::asset::{AssetChannel, AssetMesh, AssetNode, AssetScene};
use crate::errors::{MarionetteError, Result};
use crate::scene::{Node, NodeKey, SceneGraph};
use crate::skinning::{bind_vertex_bones, Geometry, SkinnedMesh};

/// Fallback tick rate for assets that leave `ticks_per_second` unset.
pub const DEFAULT_TICKS_PER_SECOND: f32 = 25.0;

/// Builds a live scene graph from a decoded asset scene.
///
/// Node hierarchy and local transforms carry over one-to-one. Animation
/// channels become looping [`TrackPlayer`]s on their named nodes, with key
/// times converted from ticks to seconds. Skinned meshes get their vertex
/// weights reduced to the fixed-width GPU layout and their bone names
/// resolved to node handles; a bone name with no matching node is a fatal
/// load error, so per-frame updates never have to cope with a missing
/// bone.
pub fn instantiate(asset: &AssetScene) -> Result<SceneGraph> {
    let mut graph = SceneGraph::new();

    let (ticks_per_second, channels) = match &asset.animation {
        Some(animation) => {
            let tps = if animation.ticks_per_second > 0.0 {
                animation.ticks_per_second
            } else {
                DEFAULT_TICKS_PER_SECOND
            };
            let by_name: FxHashMap<&str, &AssetChannel> = animation
                .channels
                .iter()
                .map(|c| (c.node_name.as_str(), c))
                .collect();
            (tps, by_name)
        }
        None => (DEFAULT_TICKS_PER_SECOND, FxHashMap::default()),
    };

    build_node(
        &mut graph,
        &asset.root,
        None,
        ticks_per_second,
        &channels,
        asset.meshes.len(),
    )?;

    for mesh in &asset.meshes {
        if mesh.bones.is_empty() {
            // Rigid geometry rides its node's world transform; nothing for
            // the skinning machinery to do.
            continue;
        }
        build_skinned_mesh(&mut graph, mesh)?;
    }

    debug!(
        "instantiated asset scene: {} nodes, {} skinned meshes, {} animation channels",
        graph.nodes.len(),
        graph.skins.len(),
        channels.len()
    );
    Ok(graph)
}

fn build_node(
    graph: &mut SceneGraph,
    asset_node: &AssetNode,
    parent: Option<NodeKey>,
    ticks_per_second: f32,
    channels: &FxHashMap<&str, &AssetChannel>,
    mesh_count: usize,
) -> Result<NodeKey> {
    for &index in &asset_node.meshes {
        if index >= mesh_count {
            return Err(MarionetteError::MeshIndexOutOfRange {
                node: asset_node.name.clone(),
                index,
                mesh_count,
            });
        }
    }

    let mut node = Node::with_transform(asset_node.name.as_str(), asset_node.transform);
    if let Some(channel) = channels.get(asset_node.name.as_str()) {
        let track = channel_track(channel, ticks_per_second)?;
        node.player = Some(TrackPlayer::new(track, PlayMode::Loop));
    }

    let key = match parent {
        Some(parent) => graph.add_child(parent, node),
        None => graph.add_node(node),
    };

    for child in &asset_node.children {
        build_node(graph, child, Some(key), ticks_per_second, channels, mesh_count)?;
    }
    Ok(key)
}

fn channel_track(channel: &AssetChannel, ticks_per_second: f32) -> Result<TransformTrack> {
    let to_seconds = |ticks: f32| ticks / ticks_per_second;
    TransformTrack::from_keys(
        channel.position_keys.iter().map(|&(t, v)| (to_seconds(t), v)),
        channel.rotation_keys.iter().map(|&(t, q)| (to_seconds(t), q)),
        channel.scaling_keys.iter().map(|&(t, s)| (to_seconds(t), s)),
    )
}

fn build_skinned_mesh(graph: &mut SceneGraph, mesh: &AssetMesh) -> Result<()> {
    let mut bones = Vec::with_capacity(mesh.bones.len());
    let mut offsets: Vec<Mat4> = Vec::with_capacity(mesh.bones.len());
    let mut weights = Vec::with_capacity(mesh.bones.len());
    for bone in &mesh.bones {
        let key = graph
            .find_by_name(&bone.name)
            .ok_or_else(|| MarionetteError::UnresolvedBone {
                mesh: mesh.name.clone(),
                bone: bone.name.clone(),
            })?;
        bones.push(key);
        offsets.push(bone.offset);
        weights.push(bone.weights.clone());
    }

    let vertex_bones = bind_vertex_bones(mesh.positions.len(), &weights)?;
    let geometry = Geometry {
        positions: mesh.positions.clone(),
        normals: mesh.normals.clone(),
        uvs: mesh.uvs.clone(),
        indices: mesh.indices.clone(),
    };

    let skin = SkinnedMesh::new(mesh.name.as_str(), bones, offsets, vertex_bones, geometry)?;
    graph.add_skinned_mesh(skin)?;
    Ok(())
}
