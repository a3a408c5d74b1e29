//! Synchronous publish/subscribe hub for desktop lifecycle and request events.
//!
//! Dispatch runs on the caller's stack: `publish` returns only after every handler registered for
//! the channel has run. Handlers may subscribe, unsubscribe, or publish re-entrantly; the bus never
//! holds its internal borrow while a handler runs. Re-entrant publish loops are not guarded.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use leptos::logging;

use crate::{
    error::HandlerError,
    events::{DesktopEvent, EventKind},
};

/// Boxed subscriber callback.
pub type EventHandler = Rc<dyn Fn(&DesktopEvent) -> Result<(), HandlerError>>;

/// Handle returned by [`EventBus::subscribe`] for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Channel plus id, enough to tear a subscription down later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub kind: EventKind,
    pub id: SubscriptionId,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    handler: EventHandler,
    once: bool,
}

/// Event hub shared by the window manager and its projections.
#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    channels: RefCell<HashMap<EventKind, Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Registers `handler` on `kind`. Handlers run in registration order.
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&DesktopEvent) -> Result<(), HandlerError> + 'static,
    ) -> SubscriptionId {
        self.insert(kind, Rc::new(handler), false)
    }

    /// Registers `handler` for a single delivery. The subscription is removed before the handler
    /// runs, so a re-entrant publish from inside the handler cannot deliver to it twice.
    pub fn once(
        &self,
        kind: EventKind,
        handler: impl Fn(&DesktopEvent) -> Result<(), HandlerError> + 'static,
    ) -> SubscriptionId {
        self.insert(kind, Rc::new(handler), true)
    }

    /// Removes a subscription. Returns `false` when it was not registered.
    pub fn unsubscribe(&self, kind: EventKind, id: SubscriptionId) -> bool {
        let mut channels = self.channels.borrow_mut();
        let Some(subscribers) = channels.get_mut(&kind) else {
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|sub| sub.id != id);
        let removed = subscribers.len() != before;
        if subscribers.is_empty() {
            channels.remove(&kind);
        }
        removed
    }

    /// Delivers `event` to every handler currently registered for its channel.
    ///
    /// Handler errors are logged and do not stop delivery to later handlers. Publishing on a
    /// channel with no subscribers does nothing.
    pub fn publish(&self, event: DesktopEvent) {
        let kind = event.kind();
        let snapshot = match self.channels.borrow().get(&kind) {
            Some(subscribers) => subscribers.clone(),
            None => return,
        };

        for subscriber in snapshot {
            let live = if subscriber.once {
                self.unsubscribe(kind, subscriber.id)
            } else {
                self.is_subscribed(kind, subscriber.id)
            };
            if !live {
                continue;
            }
            if let Err(err) = (subscriber.handler)(&event) {
                logging::warn!("event bus: `{kind}` handler {:?} failed: {err}", subscriber.id);
            }
        }
    }

    /// Removes every listed subscription. Already removed entries are skipped.
    pub fn release(&self, subscriptions: &[Subscription]) {
        for sub in subscriptions {
            self.unsubscribe(sub.kind, sub.id);
        }
    }

    pub fn is_subscribed(&self, kind: EventKind, id: SubscriptionId) -> bool {
        self.channels
            .borrow()
            .get(&kind)
            .is_some_and(|subs| subs.iter().any(|sub| sub.id == id))
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.channels.borrow().get(&kind).map_or(0, Vec::len)
    }

    /// Drops every subscription on every channel.
    pub fn clear(&self) {
        self.channels.borrow_mut().clear();
    }

    fn insert(&self, kind: EventKind, handler: EventHandler, once: bool) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.channels
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(Subscriber { id, handler, once });
        id
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowId;

    fn focused(id: &str) -> DesktopEvent {
        DesktopEvent::WindowFocused { id: id.into() }
    }

    fn recorder() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let bus = EventBus::new();
        let log = recorder();
        for name in ["first", "second", "third"] {
            let log = log.clone();
            bus.subscribe(EventKind::WindowFocused, move |_| {
                log.borrow_mut().push(name.to_string());
                Ok(())
            });
        }

        bus.publish(focused("w1"));

        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::new();
        bus.publish(focused("w1"));
        assert_eq!(bus.subscriber_count(EventKind::WindowFocused), 0);
    }

    #[test]
    fn failing_handler_does_not_stop_dispatch() {
        let bus = EventBus::new();
        let log = recorder();
        bus.subscribe(EventKind::WindowClosed, |_| Err(HandlerError::new("boom")));
        let sink = log.clone();
        bus.subscribe(EventKind::WindowClosed, move |event| {
            let id = event.window_id().map(WindowId::to_string).unwrap_or_default();
            sink.borrow_mut().push(id);
            Ok(())
        });

        bus.publish(DesktopEvent::WindowClosed { id: "w9".into() });

        assert_eq!(*log.borrow(), vec!["w9"]);
    }

    #[test]
    fn unsubscribe_removes_only_the_target_handler() {
        let bus = EventBus::new();
        let log = recorder();
        let a_log = log.clone();
        let a = bus.subscribe(EventKind::WindowFocused, move |_| {
            a_log.borrow_mut().push("a".into());
            Ok(())
        });
        let b_log = log.clone();
        bus.subscribe(EventKind::WindowFocused, move |_| {
            b_log.borrow_mut().push("b".into());
            Ok(())
        });

        assert!(bus.unsubscribe(EventKind::WindowFocused, a));
        assert!(!bus.unsubscribe(EventKind::WindowFocused, a));
        assert!(!bus.unsubscribe(EventKind::WindowClosed, a));
        bus.publish(focused("w1"));

        assert_eq!(*log.borrow(), vec!["b"]);
    }

    #[test]
    fn once_delivers_exactly_once() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        bus.once(EventKind::WindowFocused, move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });

        bus.publish(focused("w1"));
        bus.publish(focused("w2"));

        assert_eq!(hits.get(), 1);
        assert_eq!(bus.subscriber_count(EventKind::WindowFocused), 0);
    }

    #[test]
    fn once_is_exactly_once_under_reentrant_publish() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let inner_bus = Rc::downgrade(&bus);
        bus.once(EventKind::WindowFocused, move |_| {
            counter.set(counter.get() + 1);
            if let Some(bus) = inner_bus.upgrade() {
                bus.publish(focused("nested"));
            }
            Ok(())
        });

        bus.publish(focused("outer"));

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn handler_unsubscribed_mid_dispatch_is_skipped() {
        let bus = EventBus::new();
        let log = recorder();
        let victim = Rc::new(Cell::new(None::<SubscriptionId>));

        let remover_bus = Rc::downgrade(&bus);
        let target = victim.clone();
        bus.subscribe(EventKind::WindowFocused, move |_| {
            if let (Some(bus), Some(id)) = (remover_bus.upgrade(), target.get()) {
                bus.unsubscribe(EventKind::WindowFocused, id);
            }
            Ok(())
        });
        let sink = log.clone();
        let id = bus.subscribe(EventKind::WindowFocused, move |_| {
            sink.borrow_mut().push("late".into());
            Ok(())
        });
        victim.set(Some(id));

        bus.publish(focused("w1"));

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn handler_may_subscribe_during_dispatch_without_receiving_current_event() {
        let bus = EventBus::new();
        let log = recorder();
        let weak = Rc::downgrade(&bus);
        let sink = log.clone();
        bus.once(EventKind::WindowFocused, move |_| {
            if let Some(bus) = weak.upgrade() {
                let sink = sink.clone();
                bus.subscribe(EventKind::WindowFocused, move |event| {
                    let id = event.window_id().map(WindowId::to_string).unwrap_or_default();
                    sink.borrow_mut().push(id);
                    Ok(())
                });
            }
            Ok(())
        });

        bus.publish(focused("first"));
        bus.publish(focused("second"));

        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn release_tears_down_listed_subscriptions() {
        let bus = EventBus::new();
        let keep = bus.subscribe(EventKind::WindowClosed, |_| Ok(()));
        let subs = [
            Subscription {
                kind: EventKind::WindowCreated,
                id: bus.subscribe(EventKind::WindowCreated, |_| Ok(())),
            },
            Subscription {
                kind: EventKind::WindowClosed,
                id: bus.subscribe(EventKind::WindowClosed, |_| Ok(())),
            },
        ];

        bus.release(&subs);
        bus.release(&subs);

        assert_eq!(bus.subscriber_count(EventKind::WindowCreated), 0);
        assert!(bus.is_subscribed(EventKind::WindowClosed, keep));
        assert_eq!(bus.subscriber_count(EventKind::WindowClosed), 1);
    }

    #[test]
    fn clear_drops_all_channels() {
        let bus = EventBus::new();
        bus.subscribe(EventKind::WindowCreated, |_| Ok(()));
        bus.subscribe(EventKind::RegisterApp, |_| Ok(()));
        bus.clear();
        assert_eq!(bus.subscriber_count(EventKind::WindowCreated), 0);
        assert_eq!(bus.subscriber_count(EventKind::RegisterApp), 0);
    }
}
