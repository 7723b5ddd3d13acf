//! Session Events
//!
//! Event-based communication for UI synchronization. Events are emitted
//! after each command has finished mutating state, so a subscriber that
//! re-reads the snapshot always sees the complete update.
//!
//! Two delivery paths:
//! - subscribers registered with `subscribe` are called synchronously
//! - every event is also queued for `drain_events` (polling UIs)

use crate::types::TransportState;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Events emitted by the session manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Transport state changed (playing, paused, stopped)
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// Current item changed
    ItemChanged {
        /// ID of the new (current) item
        item_id: String,
        /// ID of the previous item (if any)
        previous_item_id: Option<String>,
    },

    /// Queue replaced or reordered
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Position changed (seek, time update, restart)
    ProgressChanged {
        /// Elapsed seconds
        position: f64,
    },

    /// Duration became known
    DurationChanged {
        /// Total seconds
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume
        volume: f64,
    },

    /// Repeat flag changed
    RepeatChanged {
        /// New repeat flag
        repeat: bool,
    },
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// Subscriber registry plus the polling queue
pub(crate) struct EventHub {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    pending: VecDeque<SessionEvent>,
    max_pending: usize,
}

impl EventHub {
    pub(crate) fn new(max_pending: usize) -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
            pending: VecDeque::new(),
            max_pending,
        }
    }

    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn emit(&mut self, event: SessionEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }

        if self.max_pending == 0 {
            return;
        }
        if self.pending.len() == self.max_pending {
            self.pending.pop_front();
        }
        self.pending.push_back(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<SessionEvent> {
        self.pending.drain(..).collect()
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_receive_events_until_unsubscribed() {
        let mut hub = EventHub::new(16);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = hub.subscribe(Box::new(move |event| sink.borrow_mut().push(event.clone())));

        hub.emit(SessionEvent::RepeatChanged { repeat: true });
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.emit(SessionEvent::RepeatChanged { repeat: false });

        assert_eq!(
            *seen.borrow(),
            vec![SessionEvent::RepeatChanged { repeat: true }]
        );
    }

    #[test]
    fn pending_queue_drops_oldest_when_full() {
        let mut hub = EventHub::new(2);
        for length in 0..3 {
            hub.emit(SessionEvent::QueueChanged { length });
        }

        assert_eq!(
            hub.drain(),
            vec![
                SessionEvent::QueueChanged { length: 1 },
                SessionEvent::QueueChanged { length: 2 },
            ]
        );
        assert!(!hub.has_pending());
    }

    #[test]
    fn zero_capacity_disables_polling() {
        let mut hub = EventHub::new(0);
        hub.emit(SessionEvent::VolumeChanged { volume: 0.5 });
        assert!(hub.drain().is_empty());
    }
}
