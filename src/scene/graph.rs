use glam::Mat4;
use log::debug;
use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::errors::{MarionetteError, Result};
use crate::scene::frame::FrameContext;
use crate::scene::node::Node;
use crate::scene::{InputEvent, NodeKey, SkinKey};
use crate::skinning::SkinnedMesh;

/// The scene graph: an arena of nodes plus the skinned meshes that read
/// bone world transforms out of it.
///
/// Nodes are addressed by stable [`NodeKey`] handles; skinned meshes hold
/// handle lists rather than references, so there is no ownership cycle
/// between the graph and the bone tables.
///
/// One synchronous depth-first [`update`](Self::update) runs per rendered
/// frame. Each node's world transform is written exactly once, before its
/// children are visited, and skin palettes are refreshed after the
/// hierarchy pass, so every palette reflects the current frame.
pub struct SceneGraph {
    pub nodes: SlotMap<NodeKey, Node>,
    pub roots: Vec<NodeKey>,
    pub skins: SlotMap<SkinKey, SkinnedMesh>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            skins: SlotMap::with_key(),
        }
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.roots.push(key);
        key
    }

    /// Adds a node as a child of `parent`.
    pub fn add_child(&mut self, parent: NodeKey, child: Node) -> NodeKey {
        let key = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        if let Some(c) = self.nodes.get_mut(key) {
            c.parent = Some(parent);
        }
        key
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Depth-first search for the first node with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        let mut stack: Vec<NodeKey> = self.roots.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            if node.name == name {
                return Some(key);
            }
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// Runs the per-frame traversal.
    ///
    /// For every node, in depth-first order: sample the attached player (if
    /// any) into the local transform, then store
    /// `world = parent_world * local` before descending, so children and
    /// skinned meshes observe this frame's value. After the hierarchy pass
    /// every skin palette is recomputed.
    pub fn update(&mut self, frame: &FrameContext) {
        // Explicit stack instead of recursion; deep scenes stay safe.
        let mut stack: Vec<(NodeKey, Mat4)> = Vec::with_capacity(64);
        for &root in self.roots.iter().rev() {
            stack.push((root, Mat4::IDENTITY));
        }

        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };

            if let Some(player) = node.player.as_mut() {
                node.local = player.sample(frame.time);
            }
            node.world = parent_world * node.local;

            let world = node.world;
            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }

        for skin in self.skins.values_mut() {
            skin.compute_palette(&self.nodes);
        }
    }

    /// Dispatches a discrete input event top-down through the graph.
    /// Every node receives it; containers forward to all children
    /// unconditionally.
    pub fn dispatch_event(&mut self, event: InputEvent) {
        let mut stack: Vec<NodeKey> = self.roots.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };
            node.handle_event(event);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Registers a skinned mesh after checking that every referenced bone
    /// node is reachable from a scene root. An unreachable bone would
    /// silently render with a stale transform, so it is rejected at load
    /// time instead.
    pub fn add_skinned_mesh(&mut self, skin: SkinnedMesh) -> Result<SkinKey> {
        let reachable = self.reachable_nodes();
        for &bone in skin.bones() {
            if !reachable.contains(&bone) {
                let name = self
                    .nodes
                    .get(bone)
                    .map_or_else(|| "<removed>".to_string(), |n| n.name.clone());
                return Err(MarionetteError::UnreachableBone {
                    mesh: skin.name().to_string(),
                    bone: name,
                });
            }
        }
        debug!(
            "registered skinned mesh '{}' with {} bones",
            skin.name(),
            skin.bone_count()
        );
        Ok(self.skins.insert(skin))
    }

    #[inline]
    #[must_use]
    pub fn get_skin(&self, key: SkinKey) -> Option<&SkinnedMesh> {
        self.skins.get(key)
    }

    fn reachable_nodes(&self) -> FxHashSet<NodeKey> {
        let mut seen = FxHashSet::default();
        let mut stack: Vec<NodeKey> = self.roots.clone();
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            if seen.insert(key) {
                stack.extend_from_slice(&node.children);
            }
        }
        seen
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
