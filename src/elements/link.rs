use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Parent to child connection of the layout. Only used for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaidOutLink {
    pub source: NodeIndex,
    pub target: NodeIndex,
}
