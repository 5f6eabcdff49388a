use glam::{Mat4, Quat, Vec3};

use crate::animation::track::KeyframeTrack;
use crate::animation::values::normalize_or_self;
use crate::errors::Result;

/// Three keyframe tracks (translation, rotation, scale) composed into one
/// 4x4 transform sampler.
///
/// The tracks share no required time alignment; each is sampled
/// independently and the results are composed as `T * R * S` (scale first,
/// then rotate, then translate). The ordering is load-bearing: authored
/// animations change visually if it is swapped.
#[derive(Debug, Clone)]
pub struct TransformTrack {
    pub translation: KeyframeTrack<Vec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,
}

impl TransformTrack {
    #[must_use]
    pub fn new(
        translation: KeyframeTrack<Vec3>,
        rotation: KeyframeTrack<Quat>,
        scale: KeyframeTrack<Vec3>,
    ) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Builds all three tracks from raw key sets.
    pub fn from_keys(
        translate_keys: impl IntoIterator<Item = (f32, Vec3)>,
        rotate_keys: impl IntoIterator<Item = (f32, Quat)>,
        scale_keys: impl IntoIterator<Item = (f32, Vec3)>,
    ) -> Result<Self> {
        Ok(Self {
            translation: KeyframeTrack::from_samples(translate_keys)?,
            rotation: KeyframeTrack::from_samples(rotate_keys)?,
            scale: KeyframeTrack::from_samples(scale_keys)?,
        })
    }

    /// As [`from_keys`](Self::from_keys), with uniform scalar scale keys.
    pub fn from_uniform_scale_keys(
        translate_keys: impl IntoIterator<Item = (f32, Vec3)>,
        rotate_keys: impl IntoIterator<Item = (f32, Quat)>,
        scale_keys: impl IntoIterator<Item = (f32, f32)>,
    ) -> Result<Self> {
        Self::from_keys(
            translate_keys,
            rotate_keys,
            scale_keys.into_iter().map(|(t, s)| (t, Vec3::splat(s))),
        )
    }

    /// Samples each component track at `time` and composes the TRS matrix.
    #[must_use]
    pub fn value(&self, time: f32) -> Mat4 {
        let t = Mat4::from_translation(self.translation.value(time));
        let r = Mat4::from_quat(normalize_or_self(self.rotation.value(time)));
        let s = Mat4::from_scale(self.scale.value(time));
        t * r * s
    }

    /// Time of the first translation key. Loop wrapping and the one-shot
    /// path both span the translation track's time range.
    #[inline]
    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.translation.start_time()
    }

    /// Time of the last translation key.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.translation.end_time()
    }
}
