//! Capabilities the host application injects into the extension.
//!
//! The extension never owns the store, the bus, or the renderers. It
//! receives narrow handles to all of them in a `Host` bundle and can be
//! substituted against fakes in tests.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;

use crate::action::{Action, Disposition};
use crate::record::MessageRecord;
use crate::view::RenderFn;

/// Lookup into the host's in-memory message store.
///
/// A missing record means "nothing to augment", never an error.
pub trait MessageStore {
    fn get(&self, channel_id: &str, message_id: &str) -> Option<&MessageRecord>;
    fn get_mut(&mut self, channel_id: &str, message_id: &str) -> Option<&mut MessageRecord>;
}

/// Pre-dispatch observer: sees every action before the host's normal
/// handling and may tell the bus to drop it.
pub type Observer = Box<dyn FnMut(&Action) -> Disposition>;

/// Handle for removing a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// The host's dispatch bus with observe-before-dispatch/veto semantics.
pub trait EventBus {
    fn observe_before(&mut self, observer: Observer) -> ObserverId;
    fn unobserve(&mut self, id: ObserverId);
}

/// Structural signature used to locate a render component in the host.
///
/// Hosts match components by marker strings rather than by name, so a
/// component survives host-side renames as long as its structure keeps the
/// markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    markers: Vec<String>,
}

impl Signature {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

/// Render component lookup and replacement.
pub trait ComponentRegistry {
    /// Locate a component by structural signature. Absence is not an error;
    /// the caller degrades gracefully.
    fn find(&self, signature: &Signature) -> Option<RenderFn>;

    /// Install a render function for the signature, replacing the current
    /// one.
    fn install(&mut self, signature: &Signature, render: RenderFn);
}

/// Current-time capability.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used outside of tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Everything the host hands to `plugin::start`.
///
/// All handles are single-threaded (`Rc`); the host guarantees that dispatch
/// and rendering happen on its UI thread and that it never dispatches
/// re-entrantly while observers run. `outbox` carries synthetic actions the
/// host drains and dispatches after the current frame.
#[derive(Clone)]
pub struct Host {
    pub bus: Rc<RefCell<dyn EventBus>>,
    pub store: Rc<RefCell<dyn MessageStore>>,
    pub registry: Rc<RefCell<dyn ComponentRegistry>>,
    pub clock: Rc<dyn Clock>,
    pub outbox: Sender<Action>,
}
