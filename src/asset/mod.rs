//! Input data model for decoded assets and its instantiation into a
//! [`SceneGraph`](crate::scene::SceneGraph).
//!
//! The importer itself is an external collaborator treated as a black box:
//! whatever parses the file format hands over this already-decoded scene
//! description, and [`instantiate`] turns it into live nodes, tracks and
//! skinned meshes.

pub mod build;

pub use build::{instantiate, DEFAULT_TICKS_PER_SECOND};

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::skinning::BoneWeight;

/// A decoded asset scene: node hierarchy, meshes, optional animation.
#[derive(Debug, Clone, Default)]
pub struct AssetScene {
    pub root: AssetNode,
    pub meshes: Vec<AssetMesh>,
    pub animation: Option<AssetAnimation>,
}

/// A named node with a local transform, child nodes, and indices into the
/// scene's mesh list.
#[derive(Debug, Clone)]
pub struct AssetNode {
    pub name: String,
    pub transform: Mat4,
    pub children: Vec<AssetNode>,
    pub meshes: Vec<usize>,
}

impl AssetNode {
    #[must_use]
    pub fn new(name: impl Into<String>, transform: Mat4) -> Self {
        Self {
            name: name.into(),
            transform,
            children: Vec::new(),
            meshes: Vec::new(),
        }
    }
}

impl Default for AssetNode {
    fn default() -> Self {
        Self::new("root", Mat4::IDENTITY)
    }
}

/// Decoded vertex data plus, for skinned meshes, per-bone weight tables.
#[derive(Debug, Clone, Default)]
pub struct AssetMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    /// Empty for rigid meshes.
    pub bones: Vec<AssetBone>,
}

/// One bone of a skinned mesh: a name matched against scene-graph node
/// names, the bind-offset matrix, and the vertices it influences.
#[derive(Debug, Clone)]
pub struct AssetBone {
    pub name: String,
    pub offset: Mat4,
    pub weights: Vec<BoneWeight>,
}

/// An animation: per-node channels with key timestamps in ticks.
#[derive(Debug, Clone, Default)]
pub struct AssetAnimation {
    pub name: String,
    /// Tick-to-second conversion factor. Zero means "unspecified" and falls
    /// back to [`DEFAULT_TICKS_PER_SECOND`].
    pub ticks_per_second: f32,
    pub channels: Vec<AssetChannel>,
}

/// Raw keyed sequences for one named node. Timestamps are in ticks.
#[derive(Debug, Clone, Default)]
pub struct AssetChannel {
    pub node_name: String,
    pub position_keys: Vec<(f32, Vec3)>,
    pub rotation_keys: Vec<(f32, Quat)>,
    pub scaling_keys: Vec<(f32, Vec3)>,
}
