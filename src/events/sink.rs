use super::Event;

/// Receiver of widget events.
///
/// Implemented for closures and, with the `events` feature, for crossbeam senders.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl<F> EventSink for F
where
    F: Fn(Event),
{
    fn send(&self, event: Event) {
        self(event);
    }
}

#[cfg(feature = "events")]
impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        // a dropped receiver only means nobody listens anymore
        let _ = crossbeam::channel::Sender::send(self, event);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::events::PayloadNodeHoverEnter;

    #[test]
    fn test_closure_sink_receives_events() {
        let received = RefCell::new(Vec::new());
        let sink = |e: Event| received.borrow_mut().push(e);

        sink.send(Event::NodeHoverEnter(PayloadNodeHoverEnter { id: 4 }));

        assert_eq!(
            received.into_inner(),
            vec![Event::NodeHoverEnter(PayloadNodeHoverEnter { id: 4 })]
        );
    }

    #[cfg(feature = "events")]
    #[test]
    fn test_crossbeam_sink_forwards_events() {
        let (tx, rx) = crossbeam::channel::unbounded();
        EventSink::send(&tx, Event::NodeHoverEnter(PayloadNodeHoverEnter { id: 1 }));
        assert_eq!(
            rx.try_recv().unwrap(),
            Event::NodeHoverEnter(PayloadNodeHoverEnter { id: 1 })
        );
    }
}
