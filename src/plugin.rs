//! Extension lifecycle: metadata, `start`, and the teardown handle.

use std::rc::Rc;

use tracing::debug;

use crate::config::Settings;
use crate::decor;
use crate::host::Host;
use crate::intercept;

/// Descriptive metadata for the host's extension listing UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub authors: &'static [&'static str],
}

/// Static metadata; the host shows it, nothing here reads it.
pub fn info() -> PluginInfo {
    PluginInfo {
        name: "msgkeep",
        description: "Keeps a temporary record of deleted messages and any edits until you reload the app.",
        authors: &["msgkeep developers"],
    }
}

/// Everything `start` installed, owned by the caller.
///
/// The host calls `stop` exactly once on unload; dropping the handle without
/// it leaves the host modified.
pub struct PluginHandle {
    reverts: Vec<Box<dyn FnOnce()>>,
}

impl PluginHandle {
    /// Revert every installed interception and decoration, most recent
    /// first, returning the host to unmodified behavior.
    pub fn stop(mut self) {
        while let Some(revert) = self.reverts.pop() {
            revert();
        }
    }
}

/// Install the pre-dispatch observer and both render decorations.
///
/// A decoration whose target component is missing from the registry is
/// skipped; interception works regardless, so the record augmentation
/// survives even on hosts we cannot restyle.
pub fn start(host: &Host, settings: Settings) -> PluginHandle {
    let mut reverts: Vec<Box<dyn FnOnce()>> = Vec::new();

    let observer = intercept::make_observer(
        Rc::clone(&host.store),
        Rc::clone(&host.clock),
        settings.clone(),
    );
    let id = host.bus.borrow_mut().observe_before(observer);
    let bus = Rc::clone(&host.bus);
    reverts.push(Box::new(move || bus.borrow_mut().unobserve(id)));

    // Content renderer: edit-history notes under the message body
    let signature = decor::content_signature();
    let original = host.registry.borrow().find(&signature);
    if let Some(original) = original {
        let decorated = decor::decorate_content(Rc::clone(&original), settings.edit_preview_len);
        host.registry.borrow_mut().install(&signature, decorated);
        let registry = Rc::clone(&host.registry);
        reverts.push(Box::new(move || {
            registry.borrow_mut().install(&signature, original);
        }));
    } else {
        debug!("content renderer not found, edit history display disabled");
    }

    // Wrapper renderer: deletion tint, Dismiss control, collapse
    let signature = decor::wrapper_signature();
    let original = host.registry.borrow().find(&signature);
    if let Some(original) = original {
        let decorated = decor::decorate_wrapper(
            Rc::clone(&original),
            Rc::clone(&host.store),
            host.outbox.clone(),
        );
        host.registry.borrow_mut().install(&signature, decorated);
        let registry = Rc::clone(&host.registry);
        reverts.push(Box::new(move || {
            registry.borrow_mut().install(&signature, original);
        }));
    } else {
        debug!("message wrapper not found, deletion styling disabled");
    }

    PluginHandle { reverts }
}
