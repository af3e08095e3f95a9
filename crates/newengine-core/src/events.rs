use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use crate::host_events::{InputHostEvent, InputTopic};

/// Identity of a hub subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Receiving end handed to a subscriber by [`EventHub::register`].
///
/// Events are queued per subscriber in publish order; the owner drains them on its own thread.
pub struct Subscription {
    id: SubscriberId,
    inbox: Receiver<InputHostEvent>,
}

impl Subscription {
    #[inline]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    #[inline]
    pub fn try_recv(&self) -> Option<InputHostEvent> {
        self.inbox.try_recv().ok()
    }

    #[inline]
    pub fn drain<F: FnMut(InputHostEvent)>(&self, mut f: F) -> usize {
        let mut n = 0usize;
        while let Ok(ev) = self.inbox.try_recv() {
            f(ev);
            n += 1;
        }
        n
    }
}

struct Subscriber {
    id: SubscriberId,
    topics: u8,
    tx: Sender<InputHostEvent>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Multicast input events hub (pub/sub).
///
/// Producer side: the platform adapter `publish`es raw host events.
/// Consumer side: each subscriber registers once, then opts into topics.
///
/// Rules:
/// - subscribing to a topic twice does not duplicate delivery,
/// - unsubscribing an unknown id or topic is a no-op,
/// - after `unregister` nothing is delivered to that id.
#[derive(Default)]
pub struct EventHub {
    inner: Mutex<HubInner>,
}

impl EventHub {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inbox with no topics.
    pub fn register(&self) -> Subscription {
        let mut g = self.inner.lock();
        g.next_id += 1;
        let id = SubscriberId(g.next_id);
        let (tx, rx) = unbounded();
        g.subscribers.push(Subscriber { id, topics: 0, tx });
        log::trace!("hub: registered {id:?}");
        Subscription { id, inbox: rx }
    }

    /// Returns false if `id` is not registered.
    pub fn subscribe(&self, id: SubscriberId, topic: InputTopic) -> bool {
        let mut g = self.inner.lock();
        match g.subscribers.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                s.topics |= topic.bit();
                true
            }
            None => false,
        }
    }

    pub fn unsubscribe(&self, id: SubscriberId, topic: InputTopic) {
        let mut g = self.inner.lock();
        if let Some(s) = g.subscribers.iter_mut().find(|s| s.id == id) {
            s.topics &= !topic.bit();
        }
    }

    pub fn is_subscribed(&self, id: SubscriberId, topic: InputTopic) -> bool {
        let g = self.inner.lock();
        g.subscribers
            .iter()
            .any(|s| s.id == id && s.topics & topic.bit() != 0)
    }

    /// Drops the subscriber and its sender. Idempotent.
    pub fn unregister(&self, id: SubscriberId) {
        let mut g = self.inner.lock();
        let before = g.subscribers.len();
        g.subscribers.retain(|s| s.id != id);
        if g.subscribers.len() != before {
            log::trace!("hub: unregistered {id:?}");
        }
    }

    /// Delivers `ev` to every subscriber of its topic. Returns the number of deliveries.
    pub fn publish(&self, ev: InputHostEvent) -> usize {
        let bit = ev.topic().bit();
        let g = self.inner.lock();
        let mut n = 0usize;
        for s in g.subscribers.iter().filter(|s| s.topics & bit != 0) {
            if s.tx.send(ev).is_ok() {
                n += 1;
            }
        }
        n
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}
