use tokio::sync::mpsc;

use super::types::PluginEvent;
use crate::host::EventSink;

/// Event queue buffer size
const QUEUE_SIZE: usize = 1000;

/// Creates a new event queue channel pair
pub fn create_event_queue() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel(QUEUE_SIZE);
    (EventSender(tx), EventReceiver(rx))
}

/// Sender side of the event queue
#[derive(Clone)]
pub struct EventSender(pub mpsc::Sender<PluginEvent>);

impl EventSink for EventSender {
    /// Never blocks: a full or closed queue drops the event with a warning
    fn send_event(&mut self, event: PluginEvent) {
        if let Err(e) = self.0.try_send(event) {
            tracing::warn!(error = %e, "dropping plugin event");
        }
    }
}

/// Receiver side of the event queue
pub struct EventReceiver(pub mpsc::Receiver<PluginEvent>);

impl EventReceiver {
    pub fn try_recv(&mut self) -> Result<PluginEvent, mpsc::error::TryRecvError> {
        self.0.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Vec3;

    #[test]
    fn test_send_event_without_runtime() {
        let (mut tx, mut rx) = create_event_queue();
        tx.send_event(PluginEvent::Moved(Vec3::new(1.0, 2.0, 3.0).into()));

        match rx.try_recv() {
            Ok(PluginEvent::Moved(p)) => assert_eq!((p.x, p.y, p.z), (1.0, 2.0, 3.0)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_send_event_after_receiver_dropped_does_not_panic() {
        let (mut tx, rx) = create_event_queue();
        drop(rx);
        tx.send_event(PluginEvent::Moved(Vec3::ZERO.into()));
    }
}
