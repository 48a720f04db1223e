//! Decorators over the host's message render components.
//!
//! Each decorator takes the original render function and returns a new one
//! that calls the original first and only post-processes its output.
//! `plugin::start` installs the decorated functions into the registry and
//! `stop` reinstalls the originals it captured.

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::Sender;

use crate::action::Action;
use crate::host::{MessageStore, Signature};
use crate::record::{MessageRecord, Visibility};
use crate::view::{Control, MessageView, RenderFn, DELETED_TINT};

/// Signature of the host's message content renderer.
pub fn content_signature() -> Signature {
    Signature::new(["message-content", "markdown"])
}

/// Signature of the host's message wrapper (bubble) renderer.
pub fn wrapper_signature() -> Signature {
    Signature::new(["message-bubble", "compact"])
}

/// Append one note per edit entry, newest first, each previewing the prior
/// content truncated to `preview_len` characters.
pub fn decorate_content(original: RenderFn, preview_len: usize) -> RenderFn {
    Rc::new(move |record| {
        let mut view = original(record);
        for edit in &record.edits {
            view.notes
                .push(format!("(orig: {}...)", preview(&edit.content, preview_len)));
        }
        view
    })
}

/// Wrap the bubble renderer with the three visibility branches: untouched,
/// deleted-with-tint-and-Dismiss, and collapsed.
pub fn decorate_wrapper(
    original: RenderFn,
    store: Rc<RefCell<dyn MessageStore>>,
    outbox: Sender<Action>,
) -> RenderFn {
    Rc::new(move |record| match record.visibility() {
        Visibility::Normal => original(record),
        Visibility::Deleted => {
            let mut view = original(record);
            view.background = Some(DELETED_TINT);
            view.controls.push(dismiss_control(&store, &outbox, record));
            view
        }
        Visibility::Dismissed => MessageView::placeholder(),
    })
}

/// The Dismiss button: hides the record and forces a host re-render by
/// publishing a synthetic update carrying the record's snapshot.
fn dismiss_control(
    store: &Rc<RefCell<dyn MessageStore>>,
    outbox: &Sender<Action>,
    record: &MessageRecord,
) -> Control {
    let store = Rc::clone(store);
    let outbox = outbox.clone();
    let channel_id = record.channel_id.clone();
    let message_id = record.id.clone();
    Control::new(
        "Dismiss",
        Rc::new(move || {
            let snapshot = {
                let mut store = store.borrow_mut();
                store.get_mut(&channel_id, &message_id).map(|record| {
                    record.dismiss();
                    record.snapshot()
                })
            };
            if let Some(message) = snapshot {
                // The host drains the outbox and re-dispatches; a closed
                // channel just means the host is shutting down.
                let _ = outbox.send(Action::MessageUpdate { message });
            }
        }),
    )
}

/// First `len` characters of `content`, kept on char boundaries.
fn preview(content: &str, len: usize) -> String {
    content.chars().take(len).collect()
}
