//! Linear-blend skinning: the one-time vertex-to-bone weight reduction and
//! the per-frame bone matrix palette.

pub mod binding;
pub mod skin;

pub use binding::{bind_vertex_bones, BoneWeight, VertexBoneSet, MAX_BONES, MAX_VERTEX_BONES};
pub use skin::{Geometry, SkinnedMesh};
