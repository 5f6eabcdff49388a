//! Keyframe animation and linear-blend skinning over a hierarchical scene
//! graph.
//!
//! The crate covers the animation core of a scene-graph renderer and
//! nothing else: interpolated keyframe tracks (linear and spherical),
//! TRS transform sampling, per-frame hierarchical world-transform
//! propagation, and the vertex-weight reduction plus bone matrix palette
//! that feed GPU skinning. Windowing, shader compilation, file parsing and
//! actual draw calls are external collaborators; they hand in a decoded
//! [`asset::AssetScene`] and a per-frame [`scene::FrameContext`], and read
//! back node world transforms and skin palettes.

pub mod animation;
pub mod asset;
pub mod errors;
pub mod scene;
pub mod skinning;

pub use animation::{Interpolatable, KeyframeTrack, PlayMode, TrackPlayer, TransformTrack};
pub use asset::{instantiate, AssetScene};
pub use errors::{MarionetteError, Result};
pub use scene::{FrameContext, InputEvent, Node, NodeKey, SceneGraph, SkinKey};
pub use skinning::{
    bind_vertex_bones, BoneWeight, SkinnedMesh, VertexBoneSet, MAX_BONES, MAX_VERTEX_BONES,
};
