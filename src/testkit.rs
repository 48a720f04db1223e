//! Fake host capabilities shared by the unit and integration tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::action::{Action, Disposition};
use crate::host::{
    Clock, ComponentRegistry, EventBus, Host, MessageStore, Observer, ObserverId, Signature,
};
use crate::record::MessageRecord;
use crate::view::{MessageView, RenderFn};

/// A fresh record from "alice" with no augmentation yet.
pub fn record(channel_id: &str, id: &str, content: &str) -> MessageRecord {
    MessageRecord::new(
        channel_id.into(),
        id.into(),
        "alice".into(),
        content.into(),
        t0(),
    )
}

/// The fixed instant all fake clocks start at.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

#[derive(Default)]
pub struct MemoryStore {
    pub records: HashMap<(String, String), MessageRecord>,
}

impl MemoryStore {
    pub fn insert(&mut self, record: MessageRecord) {
        self.records
            .insert((record.channel_id.clone(), record.id.clone()), record);
    }

    pub fn remove(&mut self, channel_id: &str, message_id: &str) {
        self.records
            .remove(&(channel_id.to_string(), message_id.to_string()));
    }

    pub fn contains(&self, channel_id: &str, message_id: &str) -> bool {
        self.records
            .contains_key(&(channel_id.to_string(), message_id.to_string()))
    }
}

impl MessageStore for MemoryStore {
    fn get(&self, channel_id: &str, message_id: &str) -> Option<&MessageRecord> {
        self.records
            .get(&(channel_id.to_string(), message_id.to_string()))
    }

    fn get_mut(&mut self, channel_id: &str, message_id: &str) -> Option<&mut MessageRecord> {
        self.records
            .get_mut(&(channel_id.to_string(), message_id.to_string()))
    }
}

#[derive(Default)]
pub struct FakeBus {
    observers: Vec<(ObserverId, Observer)>,
    next_id: u64,
}

impl FakeBus {
    /// Run every observer; `Suppress` from any of them wins.
    pub fn run_observers(&mut self, action: &Action) -> Disposition {
        let mut disposition = Disposition::Proceed;
        for (_, observer) in &mut self.observers {
            if observer(action) == Disposition::Suppress {
                disposition = Disposition::Suppress;
            }
        }
        disposition
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl EventBus for FakeBus {
    fn observe_before(&mut self, observer: Observer) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    fn unobserve(&mut self, id: ObserverId) {
        self.observers.retain(|(observer_id, _)| *observer_id != id);
    }
}

#[derive(Default)]
pub struct FakeRegistry {
    components: HashMap<Signature, RenderFn>,
}

impl FakeRegistry {
    pub fn register(&mut self, signature: Signature, render: RenderFn) {
        self.components.insert(signature, render);
    }
}

impl ComponentRegistry for FakeRegistry {
    fn find(&self, signature: &Signature) -> Option<RenderFn> {
        self.components.get(signature).cloned()
    }

    fn install(&mut self, signature: &Signature, render: RenderFn) {
        self.components.insert(signature.clone(), render);
    }
}

pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + chrono::Duration::seconds(secs));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// A stand-in for the host application: store, bus, registry, clock, and
/// the "normal handling" that runs when no observer suppresses an action.
pub struct FakeHost {
    pub bus: Rc<RefCell<FakeBus>>,
    pub store: Rc<RefCell<MemoryStore>>,
    pub registry: Rc<RefCell<FakeRegistry>>,
    pub clock: Rc<FixedClock>,
    pub outbox_tx: Sender<Action>,
    pub outbox_rx: Receiver<Action>,
}

impl FakeHost {
    pub fn new() -> Self {
        let (outbox_tx, outbox_rx) = unbounded();
        Self {
            bus: Rc::new(RefCell::new(FakeBus::default())),
            store: Rc::new(RefCell::new(MemoryStore::default())),
            registry: Rc::new(RefCell::new(FakeRegistry::default())),
            clock: Rc::new(FixedClock::new(t0())),
            outbox_tx,
            outbox_rx,
        }
    }

    /// The capability bundle `plugin::start` expects.
    pub fn host(&self) -> Host {
        Host {
            bus: self.bus.clone(),
            store: self.store.clone(),
            registry: self.registry.clone(),
            clock: self.clock.clone(),
            outbox: self.outbox_tx.clone(),
        }
    }

    /// Dispatch like the host would: observers first, then normal handling
    /// unless suppressed. Normal deletion removes the record; normal update
    /// replaces its content.
    pub fn dispatch(&self, action: Action) {
        let disposition = self.bus.borrow_mut().run_observers(&action);
        if disposition == Disposition::Suppress {
            return;
        }
        match action {
            Action::MessageCreate { message } => {
                let record = MessageRecord::new(
                    message.channel_id,
                    message.id,
                    message.sender,
                    message.content,
                    self.clock.now(),
                );
                self.store.borrow_mut().insert(record);
            }
            Action::MessageDelete {
                channel_id,
                message_id,
            } => {
                self.store.borrow_mut().remove(&channel_id, &message_id);
            }
            Action::MessageUpdate { message } => {
                if let Some(record) = self
                    .store
                    .borrow_mut()
                    .get_mut(&message.channel_id, &message.id)
                {
                    record.content = message.content;
                }
            }
            Action::ChannelSelect { .. } => {}
        }
    }

    /// Dispatch everything the extension queued for re-dispatch.
    pub fn drain_outbox(&self) {
        while let Ok(action) = self.outbox_rx.try_recv() {
            self.dispatch(action);
        }
    }

    /// Render `record` through whatever is installed for `signature`.
    pub fn render(&self, signature: &Signature, record: &MessageRecord) -> Option<MessageView> {
        self.registry
            .borrow()
            .find(signature)
            .map(|render| render(record))
    }
}
