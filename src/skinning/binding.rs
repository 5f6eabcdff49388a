use bytemuck::{Pod, Zeroable};
use log::{debug, warn};

use crate::errors::{MarionetteError, Result};

/// Bone influences retained per vertex in the GPU vertex format.
pub const MAX_VERTEX_BONES: usize = 4;
/// Palette capacity: bones addressable by one skinned mesh.
pub const MAX_BONES: usize = 128;

/// Fixed-width per-vertex bone attribute: the ids and weights of the most
/// influential bones, laid out for direct upload as vertex data.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VertexBoneSet {
    pub joints: [u32; MAX_VERTEX_BONES],
    pub weights: [f32; MAX_VERTEX_BONES],
}

/// One vertex influenced by some bone, as listed in the asset's per-bone
/// weight tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneWeight {
    pub vertex: u32,
    pub weight: f32,
}

impl BoneWeight {
    #[must_use]
    pub fn new(vertex: u32, weight: f32) -> Self {
        Self { vertex, weight }
    }
}

/// Converts an asset's per-bone vertex-weight lists into fixed-width
/// per-vertex bone attributes. Runs once per mesh at load time.
///
/// For each vertex the `MAX_VERTEX_BONES` highest-weight contributors are
/// kept, ids and weights as authored. Kept weights are NOT renormalized and
/// influences past the top four are dropped outright: a lossy approximation
/// accepted by design, not a defect.
pub fn bind_vertex_bones(
    vertex_count: usize,
    bone_weights: &[Vec<BoneWeight>],
) -> Result<Vec<VertexBoneSet>> {
    if bone_weights.len() > MAX_BONES {
        return Err(MarionetteError::TooManyBones {
            count: bone_weights.len(),
            max: MAX_BONES,
        });
    }

    // One (weight, bone_id) slot per possible bone, per vertex. A bone
    // writes into the slot matching its own id, so a vertex can never
    // collect two entries for the same bone.
    let mut slots = vec![[(0.0_f32, 0_u32); MAX_BONES]; vertex_count];
    for (bone_id, weights) in bone_weights.iter().enumerate() {
        for bw in weights {
            let vertex = bw.vertex as usize;
            if vertex >= vertex_count {
                return Err(MarionetteError::VertexOutOfRange {
                    bone: bone_id,
                    vertex: bw.vertex,
                    vertex_count,
                });
            }
            slots[vertex][bone_id] = (bw.weight, bone_id as u32);
        }
    }

    let cut = MAX_BONES - MAX_VERTEX_BONES;
    let mut dropped = 0_usize;
    let out = slots
        .iter_mut()
        .map(|slot| {
            slot.sort_by(|a, b| a.0.total_cmp(&b.0));
            dropped += slot[..cut].iter().filter(|(w, _)| *w > 0.0).count();

            let mut set = VertexBoneSet::default();
            for (i, &(weight, bone_id)) in slot[cut..].iter().enumerate() {
                set.joints[i] = bone_id;
                set.weights[i] = weight;
            }
            set
        })
        .collect();

    if dropped > 0 {
        warn!("skin binding dropped {dropped} low-weight influences beyond {MAX_VERTEX_BONES} per vertex");
    }
    debug!(
        "bound {} bones over {vertex_count} vertices",
        bone_weights.len()
    );
    Ok(out)
}
