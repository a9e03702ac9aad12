use egui::Pos2;
use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Position of a single tree entry computed by the hierarchical layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaidOutNode {
    /// Handle of the entry in the owning [`crate::AttackTree`].
    pub id: NodeIndex,
    /// Distance from the root, root is 0.
    pub depth: usize,
    /// Position along the sibling axis.
    pub primary: f32,
    /// Position along the depth axis, grows with depth.
    pub depth_pos: f32,

    location: Pos2,
}

impl LaidOutNode {
    pub(crate) fn new(
        id: NodeIndex,
        depth: usize,
        primary: f32,
        depth_pos: f32,
        location: Pos2,
    ) -> Self {
        Self {
            id,
            depth,
            primary,
            depth_pos,
            location,
        }
    }

    /// Canvas coordinates of the node center with the orientation applied.
    pub fn location(&self) -> Pos2 {
        self.location
    }
}
