mod kind;
mod link;
mod node;

pub use self::kind::NodeKind;
pub use self::link::LaidOutLink;
pub use self::node::LaidOutNode;
