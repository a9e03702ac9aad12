pub mod hierarchical;

mod layout;
pub use layout::Layout;
