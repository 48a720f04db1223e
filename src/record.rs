//! Message records and the transient fields this extension maintains on them.
//!
//! Records live in the host's store; the extension only mutates records it
//! looks up. Everything added here is ephemeral and gone after a reload.

use chrono::{DateTime, Utc};

use crate::action::MessageSnapshot;

/// Visibility of one message, derived from its deletion flags.
///
/// `Normal` never returns once left, and nothing leaves `Dismissed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Untouched by the extension
    Normal,
    /// Deleted upstream but kept on screen with the banner
    Deleted,
    /// Deleted and hidden by the user; collapses to zero height
    Dismissed,
}

/// One captured prior version of a message's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEntry {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// The host's in-memory representation of one chat message, plus the fields
/// this extension introduces (`is_deleted`, `deleted_at`, `dismissed`,
/// `edits`).
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub channel_id: String,
    pub id: String,
    pub sender: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,

    /// Set once by the first delete notification; never cleared
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    /// Meaningful only while `is_deleted` is set
    pub dismissed: bool,
    /// Prior contents, most recent first
    pub edits: Vec<EditEntry>,
}

impl MessageRecord {
    pub fn new(
        channel_id: String,
        id: String,
        sender: String,
        content: String,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            channel_id,
            id,
            sender,
            content,
            sent_at,
            is_deleted: false,
            deleted_at: None,
            dismissed: false,
            edits: Vec::new(),
        }
    }

    /// Derived visibility state for the wrapper renderer.
    pub fn visibility(&self) -> Visibility {
        match (self.is_deleted, self.dismissed) {
            (false, _) => Visibility::Normal,
            (true, false) => Visibility::Deleted,
            (true, true) => Visibility::Dismissed,
        }
    }

    /// Mark the record deleted and rewrite its content to the banner.
    ///
    /// Returns `true` when the record was newly marked. Repeat calls change
    /// nothing: `deleted_at` keeps the first timestamp and the content is
    /// not wrapped a second time.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_deleted {
            return false;
        }
        self.is_deleted = true;
        self.dismissed = false;
        self.deleted_at = Some(now);
        self.content = deletion_banner(&self.content);
        true
    }

    /// Capture the current content as an edit entry if `incoming` differs.
    ///
    /// The stored content itself is not touched; replacing it is the host's
    /// normal update path. Deleted records keep no further history. Returns
    /// `true` when an entry was added.
    pub fn record_edit(&mut self, incoming: &str, now: DateTime<Utc>) -> bool {
        if self.is_deleted || self.content == incoming {
            return false;
        }
        self.edits.insert(
            0,
            EditEntry {
                content: self.content.clone(),
                timestamp: now,
            },
        );
        true
    }

    /// Hide a deleted record's display. One-way; no-op on live records.
    pub fn dismiss(&mut self) {
        if self.is_deleted {
            self.dismissed = true;
        }
    }

    /// Shallow copy used as a message-update payload.
    pub fn snapshot(&self) -> MessageSnapshot {
        MessageSnapshot {
            channel_id: self.channel_id.clone(),
            id: self.id.clone(),
            sender: self.sender.clone(),
            content: self.content.clone(),
            is_deleted: self.is_deleted,
            dismissed: self.dismissed,
        }
    }
}

/// Banner shown in place of deleted content: bold notice, then the original
/// text in a diff block so markdown renderers style it as removed.
pub fn deletion_banner(original: &str) -> String {
    format!("**This message is deleted!**\n```diff\n- {}\n```", original)
}
