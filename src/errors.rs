//! Error types.
//!
//! All failure modes are load-time: once a scene graph and its keyframe
//! tracks have been validated, per-frame sampling cannot fail. Public
//! construction APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, MarionetteError>`.

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum MarionetteError {
    // ========================================================================
    // Keyframe Track Errors
    // ========================================================================
    /// A keyframe track was built from zero samples.
    #[error("keyframe track has no samples")]
    EmptyTrack,

    /// Two samples share a timestamp; times must be strictly increasing.
    #[error("duplicate keyframe timestamp {time}")]
    DuplicateKeyTime {
        /// The repeated timestamp
        time: f32,
    },

    // ========================================================================
    // Skinning Errors
    // ========================================================================
    /// A mesh carries more bones than the fixed palette can hold.
    #[error("mesh uses {count} bones, at most {max} are supported")]
    TooManyBones {
        /// Number of bones in the asset
        count: usize,
        /// The palette capacity
        max: usize,
    },

    /// A bone weight names a vertex outside the mesh.
    #[error("bone {bone} weights vertex {vertex}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        /// Index of the offending bone
        bone: usize,
        /// The out-of-range vertex id
        vertex: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// Bone node list and bind-offset list disagree in length.
    #[error("skinned mesh '{mesh}' has {bones} bones but {offsets} offset matrices")]
    BoneCountMismatch {
        /// Mesh name
        mesh: String,
        /// Number of bone nodes
        bones: usize,
        /// Number of offset matrices
        offsets: usize,
    },

    // ========================================================================
    // Scene Assembly Errors
    // ========================================================================
    /// A node's mesh list points past the end of the scene's mesh table.
    #[error("node '{node}' references mesh {index}, but the scene has {mesh_count} meshes")]
    MeshIndexOutOfRange {
        /// Node name
        node: String,
        /// The out-of-range mesh index
        index: usize,
        /// Number of meshes in the scene
        mesh_count: usize,
    },

    /// A skinned mesh references a bone name absent from the scene-graph
    /// node set. The asset is inconsistent with itself.
    #[error("skinned mesh '{mesh}' references bone '{bone}' absent from the scene graph")]
    UnresolvedBone {
        /// Mesh name
        mesh: String,
        /// The missing bone name
        bone: String,
    },

    /// A skinned mesh references a bone node that no traversal from the
    /// scene roots can reach, so its world transform would never update.
    #[error("skinned mesh '{mesh}' references bone '{bone}' not reachable from any scene root")]
    UnreachableBone {
        /// Mesh name
        mesh: String,
        /// The detached bone name
        bone: String,
    },
}

/// Alias for `Result<T, MarionetteError>`.
pub type Result<T> = std::result::Result<T, MarionetteError>;
