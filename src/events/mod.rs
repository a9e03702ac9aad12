mod event;
mod sink;

pub use event::{
    Event, PayloadNodeHoverEnter, PayloadNodeHoverLeave, PayloadNodeSelect, PayloadPan,
    PayloadZoom,
};

pub use sink::EventSink;
