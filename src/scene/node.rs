use glam::Mat4;

use crate::animation::TrackPlayer;
use crate::scene::{InputEvent, NodeKey};

/// A scene-graph node: a named local transform with an ordered list of
/// children.
///
/// Node flavors are composed, not subclassed. A plain node carries no
/// player and keeps its static `local` transform; an animated control node
/// carries a [`TrackPlayer`] that rewrites `local` every traversal. Every
/// node records its accumulated world transform during the traversal, which
/// is what lets any node serve as a named bone for skinned meshes.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,

    /// Local transform. Static for plain nodes, rewritten per frame when a
    /// player is attached.
    pub local: Mat4,
    /// Accumulated `parent_world * local`, refreshed by the traversal
    /// before children are visited.
    pub(crate) world: Mat4,

    /// Optional animation behavior.
    pub player: Option<TrackPlayer>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_transform(name, Mat4::IDENTITY)
    }

    #[must_use]
    pub fn with_transform(name: impl Into<String>, local: Mat4) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            local,
            world: Mat4::IDENTITY,
            player: None,
        }
    }

    /// Attaches an animation player driving this node's local transform.
    #[must_use]
    pub fn with_player(mut self, player: TrackPlayer) -> Self {
        self.player = Some(player);
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// World transform as of the last traversal. Identity before the first
    /// update.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    /// Event hook. Containers forward events through the graph traversal;
    /// a node reacts only via its attached behaviors.
    pub(crate) fn handle_event(&mut self, event: InputEvent) {
        if let Some(player) = self.player.as_mut() {
            player.handle_event(event);
        }
    }
}
