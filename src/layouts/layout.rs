use std::fmt::Debug;

use crate::{AttackTree, TreeLayout};

/// Turns an attack tree into positioned nodes and links.
///
/// Implementations are pure: the same tree and settings always produce the
/// same layout, and a layout is never changed after it was built.
pub trait Layout: Default {
    type Settings: Clone + Debug + Default;

    /// Creates a new layout from the given settings.
    fn from_settings(settings: Self::Settings) -> Self;

    /// Returns the settings the layout was created with.
    fn settings(&self) -> &Self::Settings;

    /// Computes positions for every node of the tree.
    fn layout(&self, tree: &AttackTree) -> TreeLayout;
}
