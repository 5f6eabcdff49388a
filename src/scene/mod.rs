//! Hierarchical scene graph: arena-resident nodes, the per-frame draw
//! traversal, frame context, and input event dispatch.

pub mod frame;
pub mod graph;
pub mod node;

pub use frame::FrameContext;
pub use graph::SceneGraph;
pub use node::Node;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a [`Node`] in a [`SceneGraph`] arena.
    pub struct NodeKey;
    /// Stable handle to a registered skinned mesh.
    pub struct SkinKey;
}

/// A discrete key-press-like event from the host, dispatched into the
/// graph's event hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Launch trigger for one-shot animations (cannon fire and the like).
    Fire,
}
