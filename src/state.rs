use instant::Instant;
use log::debug;
use petgraph::stable_graph::NodeIndex;

use crate::{
    layouts::Layout, viewport::Gesture, AttackNode, AttackTree, Hierarchical, LayoutSettings,
    SelectionState, SettingsNavigation, TreeLayout, ViewTransform, ViewportController,
};

/// Interaction policy invoked by the rendering surface.
///
/// The surface only reports what the user did; implementors decide what it
/// means. Every method returns `true` when it changed any state.
pub trait InteractionSink {
    /// Node was clicked or tapped.
    fn on_activate(&mut self, idx: NodeIndex) -> bool;

    /// Pointer entered a node, or left every node when `idx` is `None`.
    fn on_hover_change(&mut self, idx: Option<NodeIndex>) -> bool;

    /// Drag, scroll or pinch over the canvas.
    fn on_gesture(&mut self, gesture: Gesture, now: Instant) -> bool;
}

/// Owned view state of one attack tree widget: dataset, layout, view
/// transform, selection, hover and search highlights.
///
/// The layout is derived from the dataset and rebuilt only when the dataset
/// or the layout settings change. Zoom and pan never touch it.
#[derive(Debug, Clone)]
pub struct TreeViewState {
    tree: AttackTree,
    layout: TreeLayout,
    viewport: ViewportController,
    selection: SelectionState,
    hovered: Option<NodeIndex>,
    search: String,
    highlighted: Vec<NodeIndex>,

    /// Selection changed since the widget last reported it.
    selection_changed: bool,
}

impl From<&AttackNode> for TreeViewState {
    fn from(root: &AttackNode) -> Self {
        Self::new(AttackTree::new(root))
    }
}

impl TreeViewState {
    pub fn new(tree: AttackTree) -> Self {
        Self::with_settings(tree, LayoutSettings::default(), &SettingsNavigation::default())
    }

    pub fn with_settings(
        tree: AttackTree,
        layout_settings: LayoutSettings,
        navigation: &SettingsNavigation,
    ) -> Self {
        let layout = relayout(&tree, &layout_settings);
        let mut viewport = ViewportController::new(layout_settings.initial_transform(), navigation);
        viewport.set_viewport_size(layout_settings.extent);

        Self {
            tree,
            layout,
            viewport,
            selection: SelectionState::default(),
            hovered: None,
            search: String::new(),
            highlighted: Vec::new(),
            selection_changed: false,
        }
    }

    /// Replaces the dataset. The layout is rebuilt from scratch, selection and
    /// hover are cleared and the view returns to its initial transform.
    pub fn set_tree(&mut self, tree: AttackTree) {
        debug!("dataset changed, {} nodes", tree.node_count());

        self.layout = relayout(&tree, self.layout.settings());
        self.tree = tree;
        self.selection_changed |= self.selection.deselect();
        self.hovered = None;
        self.highlighted = self.tree.find(&self.search);
        self.viewport.set_transform(self.viewport.initial());
    }

    /// Re-runs the layout with new settings, keeping selection and view.
    pub fn set_layout_settings(&mut self, settings: LayoutSettings) {
        self.layout = relayout(&self.tree, &settings);
        let mut viewport =
            ViewportController::new(settings.initial_transform(), self.viewport.settings());
        viewport.set_viewport_size(self.viewport.viewport_size());
        viewport.set_transform(self.viewport.target());
        self.viewport = viewport;
    }

    pub fn set_navigation(&mut self, settings: &SettingsNavigation, now: Instant) {
        self.viewport.set_settings(settings, now);
    }

    pub fn tree(&self) -> &AttackTree {
        &self.tree
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> Option<NodeIndex> {
        self.selection.selected()
    }

    /// Nested record of the selected subtree.
    pub fn selected_node(&self) -> Option<AttackNode> {
        self.tree.to_node(self.selection.selected()?)
    }

    /// Selects `idx` if it belongs to the current tree.
    pub fn select(&mut self, idx: NodeIndex) -> bool {
        if self.tree.entry(idx).is_none() {
            return false;
        }
        let changed = self.selection.select(idx);
        self.selection_changed |= changed;
        changed
    }

    pub fn deselect(&mut self) -> bool {
        let changed = self.selection.deselect();
        self.selection_changed |= changed;
        changed
    }

    /// Returns whether the selection changed since the last call and resets the flag.
    pub fn take_selection_change(&mut self) -> bool {
        std::mem::take(&mut self.selection_changed)
    }

    pub fn hovered(&self) -> Option<NodeIndex> {
        self.hovered
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Highlights every node whose name contains `query`.
    pub fn set_search(&mut self, query: &str) {
        if self.search == query {
            return;
        }
        self.search = query.to_string();
        self.highlighted = self.tree.find(query);
        debug!("search {query:?} matches {} nodes", self.highlighted.len());
    }

    pub fn highlighted(&self) -> &[NodeIndex] {
        &self.highlighted
    }

    pub fn transform(&self, now: Instant) -> ViewTransform {
        self.viewport.current(now)
    }

    pub fn zoom_in(&mut self, now: Instant) -> ViewTransform {
        self.viewport.zoom_in(now)
    }

    pub fn zoom_out(&mut self, now: Instant) -> ViewTransform {
        self.viewport.zoom_out(now)
    }

    pub fn reset_view(&mut self, now: Instant) -> ViewTransform {
        self.viewport.reset_view(now)
    }
}

fn relayout(tree: &AttackTree, settings: &LayoutSettings) -> TreeLayout {
    Hierarchical::from_settings(settings.clone()).layout(tree)
}

impl InteractionSink for TreeViewState {
    fn on_activate(&mut self, idx: NodeIndex) -> bool {
        self.select(idx)
    }

    fn on_hover_change(&mut self, idx: Option<NodeIndex>) -> bool {
        let idx = idx.filter(|i| self.tree.entry(*i).is_some());
        if self.hovered == idx {
            return false;
        }
        self.hovered = idx;
        true
    }

    fn on_gesture(&mut self, gesture: Gesture, now: Instant) -> bool {
        self.viewport.on_gesture(gesture, now)
    }
}
