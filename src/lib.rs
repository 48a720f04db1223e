//! msgkeep: keeps deleted chat messages visible until the app reloads.
//!
//! A client-side extension loaded by a chat client host. The host owns the
//! dispatch loop, the in-memory message store, and the message render
//! components; this library plugs into all three:
//!
//! - `intercept`: pre-dispatch observer that vetoes message deletions (the
//!   record stays in the store with a banner) and captures edit history
//! - `decor`: wraps the host's content and bubble renderers (edit-history
//!   notes, deletion tint, Dismiss control, collapsed placeholder)
//! - `plugin`: `start()` installs everything and returns a handle whose
//!   `stop()` reverts the host to unmodified behavior
//!
//! Synthetic actions (the Dismiss re-render) flow back to the host via a
//! crossbeam channel. All state lives in the host's store and is lost on
//! reload by design.

pub mod action;
pub mod config;
pub mod decor;
pub mod host;
pub mod intercept;
pub mod plugin;
pub mod record;
pub mod ui;
pub mod view;

#[cfg(test)]
mod testkit;
