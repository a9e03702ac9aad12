use egui::{Pos2, Vec2};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{layouts::Layout, AttackTree, LaidOutNode, TreeLayout, ViewTransform};

/// Smallest inner extent along either axis. Keeps depth strictly monotonic
/// when the margins eat the whole drawing area.
const MIN_INNER_EXTENT: f32 = 1.0;

/// Orientation of the hierarchical layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Levels grow downward. Depth drives Y, sibling order drives X.
    TopDown,
    /// Levels grow to the right (dendrogram). Depth drives X, sibling order drives Y.
    #[default]
    LeftRight,
}

/// Space reserved around the tree on every side, in canvas units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn same(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::same(50.)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutSettings {
    /// Width and height of the drawing area the tree has to fit in.
    pub extent: Vec2,
    pub margins: Margins,
    pub orientation: Orientation,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            extent: Vec2::new(1200., 800.),
            margins: Margins::default(),
            orientation: Orientation::default(),
        }
    }
}

impl LayoutSettings {
    pub fn with_extent(mut self, extent: Vec2) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Extent left after removing the margins, clamped to a small positive size.
    pub fn inner_extent(&self) -> Vec2 {
        let inner = Vec2::new(
            self.extent.x - self.margins.left - self.margins.right,
            self.extent.y - self.margins.top - self.margins.bottom,
        );
        if inner.x < MIN_INNER_EXTENT || inner.y < MIN_INNER_EXTENT {
            warn!(
                "inner layout extent {inner:?} is degenerate, clamping to {MIN_INNER_EXTENT}"
            );
        }
        inner.max(Vec2::splat(MIN_INNER_EXTENT))
    }

    /// Transform that places the layout origin at the top left margin.
    pub fn initial_transform(&self) -> ViewTransform {
        ViewTransform::new(Vec2::new(self.margins.left, self.margins.top), 1.)
    }

    /// Splits `inner` into (primary, depth) lengths according to orientation.
    fn axes(&self, inner: Vec2) -> (f32, f32) {
        match self.orientation {
            Orientation::LeftRight => (inner.y, inner.x),
            Orientation::TopDown => (inner.x, inner.y),
        }
    }

    fn location(&self, primary: f32, depth_pos: f32) -> Pos2 {
        match self.orientation {
            Orientation::LeftRight => Pos2::new(depth_pos, primary),
            Orientation::TopDown => Pos2::new(primary, depth_pos),
        }
    }
}

/// Tidy tree layout: leaves take evenly spaced slots in source order and every
/// parent is centered over its children.
#[derive(Debug, Default)]
pub struct Hierarchical {
    settings: LayoutSettings,
}

impl Layout for Hierarchical {
    type Settings = LayoutSettings;

    fn from_settings(settings: LayoutSettings) -> Self {
        Hierarchical { settings }
    }

    fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    fn layout(&self, tree: &AttackTree) -> TreeLayout {
        layout(tree, &self.settings)
    }
}

/// Computes the layout of `tree` inside the area described by `settings`.
///
/// Total over any rooted tree: a single node, a chain without branching and
/// arbitrarily deep trees are all placed without dividing by zero.
pub fn layout(tree: &AttackTree, settings: &LayoutSettings) -> TreeLayout {
    let order = tree.preorder();
    let size = tree
        .node_indices()
        .map(|idx| idx.index() + 1)
        .max()
        .unwrap_or_default();

    // depth top-down, leaf slots left to right
    let mut depth = vec![0usize; size];
    let mut slot = vec![0f32; size];
    let mut next_slot = 0usize;
    let mut max_depth = 0usize;
    for &idx in &order {
        let children = tree.children(idx);
        for c in &children {
            depth[c.index()] = depth[idx.index()] + 1;
        }
        max_depth = max_depth.max(depth[idx.index()]);
        if children.is_empty() {
            slot[idx.index()] = next_slot as f32;
            next_slot += 1;
        }
    }

    // parents are centered over their children, bottom-up
    for &idx in order.iter().rev() {
        let children = tree.children(idx);
        if children.is_empty() {
            continue;
        }
        let sum = children.iter().map(|c| slot[c.index()]).sum::<f32>();
        slot[idx.index()] = sum / children.len() as f32;
    }

    let (primary_extent, depth_extent) = settings.axes(settings.inner_extent());
    let span = next_slot.saturating_sub(1) as f32;

    let mut nodes = Vec::with_capacity(order.len());
    for idx in tree.node_indices() {
        let d = depth[idx.index()];
        let primary = if span == 0. {
            primary_extent / 2.
        } else {
            slot[idx.index()] / span * primary_extent
        };
        let depth_pos = if max_depth == 0 {
            depth_extent / 2.
        } else {
            d as f32 / max_depth as f32 * depth_extent
        };

        nodes.push(LaidOutNode::new(
            idx,
            d,
            primary,
            depth_pos,
            settings.location(primary, depth_pos),
        ));
    }

    debug!(
        "laid out {} nodes, {} leaves, max depth {max_depth}",
        nodes.len(),
        next_slot
    );

    TreeLayout::new(tree, nodes, settings.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttackNode, NodeKind};

    fn scenario() -> AttackNode {
        AttackNode::new("Compromise Software Supply Chain", NodeKind::Goal).with_children([
            AttackNode::new("Compromise Source Code", NodeKind::Attack).with_children([
                AttackNode::new("Direct Repository Access", NodeKind::Technique),
                AttackNode::new("Code Injection", NodeKind::Technique),
            ]),
        ])
    }

    #[test]
    fn test_single_branch_centers_exactly() {
        let tree = AttackTree::new(&scenario());
        let l = layout(&tree, &LayoutSettings::default());

        assert_eq!(l.node_count(), 3);
        assert_eq!(l.link_count(), 2);

        let goal = l.node(tree.root()).unwrap();
        let attack_idx = tree.children(tree.root())[0];
        let attack = l.node(attack_idx).unwrap();
        let leaves = tree
            .children(attack_idx)
            .into_iter()
            .map(|c| l.node(c).unwrap().primary)
            .collect::<Vec<_>>();

        assert_ne!(leaves[0], leaves[1]);
        assert!((leaves[0] + leaves[1] - 2. * attack.primary).abs() < 1e-4);
        assert_eq!(attack.primary, goal.primary);
    }

    #[test]
    fn test_single_node_lays_out_at_center() {
        let tree = AttackTree::new(&AttackNode::new("alone", NodeKind::Goal));
        let settings = LayoutSettings::default();
        let l = layout(&tree, &settings);
        let inner = settings.inner_extent();

        let root = l.node(tree.root()).unwrap();
        assert_eq!(root.location(), Pos2::new(inner.x / 2., inner.y / 2.));
        assert_eq!(l.link_count(), 0);
    }

    #[test]
    fn test_leaves_fill_the_primary_extent() {
        let tree = AttackTree::new(&scenario());
        let settings = LayoutSettings::default();
        let l = layout(&tree, &settings);
        let inner = settings.inner_extent();

        let (min, max) = l.nodes_iter().fold((f32::MAX, f32::MIN), |(lo, hi), (_, n)| {
            (lo.min(n.primary), hi.max(n.primary))
        });
        assert_eq!(min, 0.);
        assert_eq!(max, inner.y);
    }

    #[test]
    fn test_depth_spans_the_depth_extent() {
        let tree = AttackTree::new(&scenario());
        let settings = LayoutSettings::default();
        let l = layout(&tree, &settings);
        let inner = settings.inner_extent();

        assert_eq!(l.node(tree.root()).unwrap().depth_pos, 0.);
        let deepest = l.nodes_iter().map(|(_, n)| n.depth_pos).fold(0., f32::max);
        assert_eq!(deepest, inner.x);
    }

    #[test]
    fn test_top_down_swaps_axes() {
        let tree = AttackTree::new(&scenario());
        let settings = LayoutSettings::default().with_orientation(Orientation::TopDown);
        let l = layout(&tree, &settings);

        for (_, n) in l.nodes_iter() {
            assert_eq!(n.location(), Pos2::new(n.primary, n.depth_pos));
        }
    }

    #[test]
    fn test_degenerate_extent_keeps_depth_monotonic() {
        let tree = AttackTree::new(&scenario());
        let settings = LayoutSettings::default().with_extent(Vec2::new(100., 100.));
        let l = layout(&tree, &settings);

        for (idx, n) in l.nodes_iter() {
            if let Some(parent) = l.parent(idx) {
                assert!(n.depth_pos > l.node(parent).unwrap().depth_pos);
            }
        }
    }

    #[test]
    fn test_initial_transform_uses_margins() {
        let settings = LayoutSettings::default().with_margins(Margins {
            top: 10.,
            right: 20.,
            bottom: 30.,
            left: 40.,
        });
        let t = settings.initial_transform();
        assert_eq!(t.translate, Vec2::new(40., 10.));
        assert_eq!(t.scale, 1.);
    }
}
