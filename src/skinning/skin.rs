use glam::{Mat4, Vec2, Vec3};
use slotmap::SlotMap;

use crate::errors::{MarionetteError, Result};
use crate::scene::node::Node;
use crate::scene::NodeKey;
use crate::skinning::binding::{VertexBoneSet, MAX_BONES};

/// Static vertex data for a skinned mesh, as decoded from the asset.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

/// A mesh deformed by bone nodes elsewhere in the scene graph.
///
/// `bones` is a non-owning handle list into the graph's node arena; the
/// nodes' lifetime belongs to the graph, not to the mesh. `offsets` holds
/// the per-bone bind-pose inverse matrices, set once at load. Every frame,
/// after the hierarchy traversal, the palette entry for bone `i` becomes
/// `world(bones[i]) * offsets[i]`; the rendering layer uploads the palette
/// before its draw call.
#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    name: String,
    bones: Vec<NodeKey>,
    offsets: Vec<Mat4>,
    vertex_bones: Vec<VertexBoneSet>,
    geometry: Geometry,
    palette: Vec<Mat4>,
}

impl SkinnedMesh {
    pub fn new(
        name: impl Into<String>,
        bones: Vec<NodeKey>,
        offsets: Vec<Mat4>,
        vertex_bones: Vec<VertexBoneSet>,
        geometry: Geometry,
    ) -> Result<Self> {
        let name = name.into();
        if bones.len() != offsets.len() {
            return Err(MarionetteError::BoneCountMismatch {
                mesh: name,
                bones: bones.len(),
                offsets: offsets.len(),
            });
        }
        if bones.len() > MAX_BONES {
            return Err(MarionetteError::TooManyBones {
                count: bones.len(),
                max: MAX_BONES,
            });
        }

        let palette = vec![Mat4::IDENTITY; bones.len()];
        Ok(Self {
            name,
            bones,
            offsets,
            vertex_bones,
            geometry,
            palette,
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[NodeKey] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn offsets(&self) -> &[Mat4] {
        &self.offsets
    }

    /// Per-vertex fixed-width bone attributes, ready for vertex upload.
    #[inline]
    #[must_use]
    pub fn vertex_bones(&self) -> &[VertexBoneSet] {
        &self.vertex_bones
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The matrix palette as of the last graph update.
    #[inline]
    #[must_use]
    pub fn palette(&self) -> &[Mat4] {
        &self.palette
    }

    /// Recomputes the palette from the bones' current world transforms.
    /// Called by the owning graph after its hierarchy pass.
    pub(crate) fn compute_palette(&mut self, nodes: &SlotMap<NodeKey, Node>) {
        for (i, &bone) in self.bones.iter().enumerate() {
            let Some(node) = nodes.get(bone) else {
                continue;
            };
            self.palette[i] = *node.world_matrix() * self.offsets[i];
        }
    }
}
