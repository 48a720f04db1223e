//! Pre-dispatch interception of message delete/update actions.
//!
//! One observer handles both kinds: deletions are vetoed so the record stays
//! in the store (marked and banner-wrapped), updates have their outgoing
//! content captured as edit history before the host's normal path replaces
//! it. Every other action kind passes through untouched.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::action::{Action, Disposition, MessageSnapshot};
use crate::config::Settings;
use crate::host::{Clock, MessageStore, Observer};

/// Build the observer `plugin::start` registers on the host bus.
pub fn make_observer(
    store: Rc<RefCell<dyn MessageStore>>,
    clock: Rc<dyn Clock>,
    settings: Settings,
) -> Observer {
    Box::new(move |action| match action {
        Action::MessageDelete {
            channel_id,
            message_id,
        } if settings.keep_deleted => {
            on_message_delete(&mut *store.borrow_mut(), clock.now(), channel_id, message_id)
        }
        Action::MessageUpdate { message } if settings.track_edits => {
            on_message_update(&mut *store.borrow_mut(), clock.now(), message)
        }
        _ => Disposition::Proceed,
    })
}

/// Keep a deleted message around by marking its record and vetoing the
/// action, so the host's normal deletion (which removes the record) never
/// runs.
///
/// An already-marked record stays untouched and the action passes through;
/// a missing record means there is nothing to augment.
pub fn on_message_delete(
    store: &mut dyn MessageStore,
    now: DateTime<Utc>,
    channel_id: &str,
    message_id: &str,
) -> Disposition {
    let Some(record) = store.get_mut(channel_id, message_id) else {
        return Disposition::Proceed;
    };
    if record.mark_deleted(now) {
        debug!(channel_id, message_id, "suppressed delete, record kept");
        Disposition::Suppress
    } else {
        Disposition::Proceed
    }
}

/// Capture the outgoing content as an edit entry before the host replaces
/// it with the incoming one. The update itself always proceeds.
pub fn on_message_update(
    store: &mut dyn MessageStore,
    now: DateTime<Utc>,
    incoming: &MessageSnapshot,
) -> Disposition {
    if let Some(record) = store.get_mut(&incoming.channel_id, &incoming.id) {
        if record.record_edit(&incoming.content, now) {
            debug!(
                channel_id = incoming.channel_id.as_str(),
                message_id = incoming.id.as_str(),
                entries = record.edits.len(),
                "captured edit history entry"
            );
        }
    }
    Disposition::Proceed
}
