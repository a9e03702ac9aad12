use log::debug;
use petgraph::stable_graph::NodeIndex;

/// Single node selection. The last selected node wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<NodeIndex>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<NodeIndex> {
        self.selected
    }

    pub fn is_selected(&self, idx: NodeIndex) -> bool {
        self.selected == Some(idx)
    }

    /// Selects `idx`. Returns `true` if the selection changed.
    pub fn select(&mut self, idx: NodeIndex) -> bool {
        if self.selected == Some(idx) {
            return false;
        }
        debug!("selected node {}", idx.index());
        self.selected = Some(idx);
        true
    }

    /// Clears the selection. Returns `true` if a node was selected before.
    pub fn deselect(&mut self) -> bool {
        let Some(prev) = self.selected.take() else {
            return false;
        };
        debug!("deselected node {}", prev.index());
        true
    }
}
