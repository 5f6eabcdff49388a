//! Keyframe animation: interpolation primitives, generic keyframe tracks,
//! TRS transform tracks, and the per-node playback state machine.

pub mod player;
pub mod track;
pub mod transform_track;
pub mod values;

pub use player::{PlayMode, TrackPlayer};
pub use track::KeyframeTrack;
pub use transform_track::TransformTrack;
pub use values::{Interpolatable, normalize_or_self, slerp};
