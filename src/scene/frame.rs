use glam::Vec3;

/// Per-frame state passed down the draw traversal.
///
/// Carries the host clock sample plus the shared atmosphere parameters
/// (day/night fog, light falloff) that draw calls read, so nothing in the
/// graph depends on process-wide mutable state.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Monotonic host seconds, sampled once per frame.
    pub time: f32,
    /// Current fog color for distance blending.
    pub fog_color: Vec3,
    /// Constant / linear / quadratic light attenuation factors.
    pub light_attenuation: Vec3,
}

impl FrameContext {
    /// A frame at `time` with default atmosphere.
    #[must_use]
    pub fn new(time: f32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fog_color(mut self, fog_color: Vec3) -> Self {
        self.fog_color = fog_color;
        self
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            time: 0.0,
            fog_color: Vec3::new(0.5, 0.5, 0.5),
            light_attenuation: Vec3::new(1.0, 0.0, 0.0),
        }
    }
}
