mod elements;
mod error;
mod graph;
mod graph_view;
mod selections;
mod settings;
mod state;
mod transform;
mod tree;
mod viewport;

pub mod dataset;
pub mod draw;
pub mod events;
pub mod layouts;

pub use self::elements::{LaidOutLink, LaidOutNode, NodeKind};
pub use self::error::DatasetError;
pub use self::graph::TreeLayout;
pub use self::graph_view::TreeView;
pub use self::layouts::hierarchical::{layout, Hierarchical, LayoutSettings, Margins, Orientation};
pub use self::layouts::Layout;
pub use self::selections::SelectionState;
pub use self::settings::{
    SettingsInteraction, SettingsNavigation, SettingsStyle, MIN_SCALE_FLOOR,
};
pub use self::state::{InteractionSink, TreeViewState};
pub use self::transform::ViewTransform;
pub use self::tree::{count_nodes, AttackNode, AttackTree, Entry};
pub use self::viewport::{ease_cubic_in_out, Gesture, ViewportController};

pub use petgraph::stable_graph::NodeIndex;
