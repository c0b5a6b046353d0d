use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Notifications emitted to the tree-rendering host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A rebuild completed. Carries no payload: consumers re-read the whole forest.
    ForestChanged,
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Event::ForestChanged => write!(f, "ForestChanged"),
        }
    }
}

/// Fan-out of [`Event`]s to every subscribed channel.
///
/// Subscribers whose receiving end has been dropped are pruned on the next
/// [`Subscribers::fire`].
#[derive(Debug, Default)]
pub struct Subscribers {
    senders: Vec<Sender<Event>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new channel and return its receiving end.
    pub fn subscribe(&mut self) -> Receiver<Event> {
        let (tx, rx) = channel();
        self.senders.push(tx);
        rx
    }

    /// Register a sender owned by the host.
    pub fn attach(&mut self, tx: Sender<Event>) {
        self.senders.push(tx);
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Deliver `event` to every live subscriber, returning how many received it.
    pub fn fire(&mut self, event: Event) -> usize {
        self.senders.retain(|tx| match tx.send(event) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("Dropping disconnected subscriber ({})", err.0);
                false
            }
        });
        self.senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_reaches_every_subscriber() {
        let mut subscribers = Subscribers::new();
        let rx1 = subscribers.subscribe();
        let rx2 = subscribers.subscribe();

        assert_eq!(subscribers.fire(Event::ForestChanged), 2);
        assert_eq!(rx1.try_recv(), Ok(Event::ForestChanged));
        assert_eq!(rx2.try_recv(), Ok(Event::ForestChanged));
        assert!(rx1.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let mut subscribers = Subscribers::new();
        let kept = subscribers.subscribe();
        drop(subscribers.subscribe());

        assert_eq!(subscribers.fire(Event::ForestChanged), 1);
        assert_eq!(subscribers.len(), 1);
        assert_eq!(kept.try_recv(), Ok(Event::ForestChanged));
    }
}
