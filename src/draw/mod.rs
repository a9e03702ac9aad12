mod drawer;
mod scene;

pub use self::drawer::Drawer;
pub use self::scene::{node_width, truncate_label, LinkShape, NodeShape, Scene, SceneContext};
