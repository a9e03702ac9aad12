use egui::{Pos2, Rect};
use petgraph::{
    stable_graph::{EdgeIndex, NodeIndex, StableGraph},
    visit::{EdgeRef, IntoEdgeReferences, IntoNodeReferences},
    Direction::{Incoming, Outgoing},
};

use crate::{
    layouts::hierarchical::{LayoutSettings, Orientation},
    AttackTree, LaidOutLink, LaidOutNode,
};

/// Immutable result of a layout pass.
///
/// Node indices are the same as in the [`AttackTree`] the layout was built
/// from, so selection and hover state can be expressed with one index type.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    g: StableGraph<LaidOutNode, LaidOutLink>,
    root: NodeIndex,
    settings: LayoutSettings,
}

impl TreeLayout {
    pub(crate) fn new(tree: &AttackTree, nodes: Vec<LaidOutNode>, settings: LayoutSettings) -> Self {
        let mut g = StableGraph::with_capacity(nodes.len(), nodes.len().saturating_sub(1));
        for n in nodes {
            let idx = g.add_node(n);
            debug_assert_eq!(idx, n.id);
        }

        for idx in tree.node_indices() {
            for child in tree.children(idx) {
                g.add_edge(
                    idx,
                    child,
                    LaidOutLink {
                        source: idx,
                        target: child,
                    },
                );
            }
        }

        Self {
            g,
            root: tree.root(),
            settings,
        }
    }

    pub fn g(&self) -> &StableGraph<LaidOutNode, LaidOutLink> {
        &self.g
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&LaidOutNode> {
        self.g.node_weight(idx)
    }

    pub fn link(&self, idx: EdgeIndex) -> Option<&LaidOutLink> {
        self.g.edge_weight(idx)
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.g.edge_count()
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = (NodeIndex, &LaidOutNode)> {
        self.g.node_references()
    }

    pub fn links_iter(&self) -> impl Iterator<Item = (EdgeIndex, &LaidOutLink)> {
        self.g.edge_references().map(|e| (e.id(), e.weight()))
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.g.neighbors_directed(idx, Incoming).next()
    }

    /// Children of `idx` ordered along the sibling axis.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self
            .g
            .neighbors_directed(idx, Outgoing)
            .filter_map(|c| self.node(c).map(|n| (n.primary, c)))
            .collect::<Vec<_>>();
        children.sort_by(|a, b| a.0.total_cmp(&b.0));
        children.into_iter().map(|(_, c)| c).collect()
    }

    /// Control points of the cubic Bézier connecting the two ends of `link`.
    ///
    /// The curve leaves the source and enters the target parallel to the depth
    /// axis, bending halfway between the two levels.
    pub fn connector(&self, link: &LaidOutLink) -> Option<[Pos2; 4]> {
        let (start, end) = self.link_endpoints(link)?;
        Some(connector_points(start, end, self.settings.orientation))
    }

    /// Canvas locations of the parent and the child of `link`.
    pub fn link_endpoints(&self, link: &LaidOutLink) -> Option<(Pos2, Pos2)> {
        let start = self.node(link.source)?.location();
        let end = self.node(link.target)?.location();
        Some((start, end))
    }

    /// Rectangle covering all node centers in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        let mut bounds = Rect::NOTHING;
        for (_, n) in self.nodes_iter() {
            bounds.extend_with(n.location());
        }
        bounds
    }
}

pub(crate) fn connector_points(start: Pos2, end: Pos2, orientation: Orientation) -> [Pos2; 4] {
    match orientation {
        Orientation::LeftRight => {
            let mid = (start.x + end.x) / 2.;
            [start, Pos2::new(mid, start.y), Pos2::new(mid, end.y), end]
        }
        Orientation::TopDown => {
            let mid = (start.y + end.y) / 2.;
            [start, Pos2::new(start.x, mid), Pos2::new(end.x, mid), end]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layouts::hierarchical::layout, AttackNode, NodeKind};

    fn tree() -> AttackTree {
        AttackTree::new(&AttackNode::new("g", NodeKind::Goal).with_children([
            AttackNode::new("a", NodeKind::Attack),
            AttackNode::new("b", NodeKind::Attack),
            AttackNode::new("c", NodeKind::Attack),
        ]))
    }

    #[test]
    fn test_indices_match_the_tree() {
        let t = tree();
        let l = layout(&t, &LayoutSettings::default());
        for idx in t.node_indices() {
            assert_eq!(l.node(idx).unwrap().id, idx);
        }
        assert_eq!(l.children(t.root()), t.children(t.root()));
    }

    #[test]
    fn test_parent_is_a_back_reference() {
        let t = tree();
        let l = layout(&t, &LayoutSettings::default());
        for child in t.children(t.root()) {
            assert_eq!(l.parent(child), Some(t.root()));
        }
        assert_eq!(l.parent(t.root()), None);
    }

    #[test]
    fn test_horizontal_connector_bends_halfway() {
        let points = connector_points(
            Pos2::new(0., 10.),
            Pos2::new(100., 50.),
            Orientation::LeftRight,
        );
        assert_eq!(
            points,
            [
                Pos2::new(0., 10.),
                Pos2::new(50., 10.),
                Pos2::new(50., 50.),
                Pos2::new(100., 50.),
            ]
        );
    }

    #[test]
    fn test_vertical_connector_bends_halfway() {
        let points = connector_points(Pos2::new(10., 0.), Pos2::new(50., 100.), Orientation::TopDown);
        assert_eq!(points[1], Pos2::new(10., 50.));
        assert_eq!(points[2], Pos2::new(50., 50.));
    }

    #[test]
    fn test_bounds_cover_the_inner_extent() {
        let t = tree();
        let settings = LayoutSettings::default();
        let l = layout(&t, &settings);
        let b = l.bounds();

        assert_eq!(b.min, Pos2::ZERO);
        assert_eq!(b.max, settings.inner_extent().to_pos2());
    }

    #[test]
    fn test_every_link_has_a_connector() {
        let t = tree();
        let l = layout(&t, &LayoutSettings::default());
        for (_, link) in l.links_iter() {
            let points = l.connector(link).unwrap();
            assert_eq!(points[0], l.node(link.source).unwrap().location());
            assert_eq!(points[3], l.node(link.target).unwrap().location());
        }
    }
}
