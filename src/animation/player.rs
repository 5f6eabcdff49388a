use glam::Mat4;
use log::debug;

use crate::animation::transform_track::TransformTrack;
use crate::scene::InputEvent;

/// Step between successive one-shot path samples, in track time units.
const PATH_STEP: f32 = 0.05;

/// How a [`TrackPlayer`] maps host time onto its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Sample directly at host time. A single pass-through, useful for
    /// simple non-repeating intros.
    Clock,
    /// Wrap host time by the track's end time. Never terminates.
    Loop,
    /// Hold the first key's pose until triggered, then walk a precomputed
    /// dense path of sample times, one entry per traversal, and revert to
    /// the held pose at the end of the range.
    OneShot,
}

/// Drives a node's local transform from a [`TransformTrack`].
///
/// One-shot playback advances its path cursor once per draw traversal
/// rather than by elapsed wall-clock time, so its speed follows the frame
/// rate. That matches the authored content this machinery carries and is
/// kept deliberately.
#[derive(Debug, Clone)]
pub struct TrackPlayer {
    track: TransformTrack,
    mode: PlayMode,
    trigger: Option<InputEvent>,
    /// Dense intermediate times spanning the track range, one-shot only.
    path: Vec<f32>,
    cursor: usize,
    firing: bool,
}

impl TrackPlayer {
    #[must_use]
    pub fn new(track: TransformTrack, mode: PlayMode) -> Self {
        let path = if mode == PlayMode::OneShot {
            dense_path(track.start_time(), track.end_time())
        } else {
            Vec::new()
        };
        Self {
            track,
            mode,
            trigger: None,
            path,
            cursor: 1,
            firing: false,
        }
    }

    /// Sets the event that starts one-shot playback.
    #[must_use]
    pub fn with_trigger(mut self, trigger: InputEvent) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn track(&self) -> &TransformTrack {
        &self.track
    }

    /// Whether a one-shot is currently walking its path.
    #[inline]
    #[must_use]
    pub fn is_firing(&self) -> bool {
        self.firing
    }

    /// Starts one-shot playback. No effect in other modes.
    pub fn fire(&mut self) {
        if self.mode == PlayMode::OneShot {
            self.firing = true;
        }
    }

    /// Event hook: fires when the event matches this player's trigger.
    pub fn handle_event(&mut self, event: InputEvent) {
        if self.trigger == Some(event) {
            debug!("track player triggered by {event:?}");
            self.fire();
        }
    }

    /// Computes the local transform for this traversal, advancing one-shot
    /// state. Called once per node visit while the owning graph updates.
    pub fn sample(&mut self, host_time: f32) -> Mat4 {
        let time = match self.mode {
            PlayMode::Clock => host_time,
            PlayMode::Loop => {
                let end = self.track.end_time();
                // A zero-length range (single key at t=0) has nothing to
                // wrap over; the remainder would be NaN.
                if end > 0.0 {
                    host_time % end
                } else {
                    self.track.start_time()
                }
            }
            PlayMode::OneShot => {
                if self.firing {
                    let time = self.path[self.cursor];
                    self.cursor += 1;
                    if time >= self.track.end_time() - PATH_STEP || self.cursor >= self.path.len()
                    {
                        self.firing = false;
                        self.cursor = 1;
                    }
                    time
                } else {
                    // Held pose while idle.
                    self.track.start_time()
                }
            }
        };
        self.track.value(time)
    }
}

fn dense_path(start: f32, end: f32) -> Vec<f32> {
    let mut path = Vec::new();
    let mut t = start;
    while t < end {
        path.push(t);
        t += PATH_STEP;
    }
    // The cursor starts at index 1, so even a degenerate range needs two
    // entries to index safely.
    while path.len() < 2 {
        path.push(end);
    }
    path
}
