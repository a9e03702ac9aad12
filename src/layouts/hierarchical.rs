mod layout;

pub use layout::{layout, Hierarchical, LayoutSettings, Margins, Orientation};
