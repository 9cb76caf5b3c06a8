//! Registry of live rich-text editor sessions.
//!
//! Owned by the page controller and handed by reference to whatever needs
//! to read an editor. Page scoped: sessions are added, never removed.

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::platform::RichTextHost;

/// Editor sessions keyed by editor id.
pub struct SessionRegistry<H> {
    sessions: HashMap<SmolStr, H>,
}

impl<H> Default for SessionRegistry<H> {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }
}

impl<H: RichTextHost> SessionRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under `editor_id`.
    ///
    /// Returns `false` and keeps the existing session if one is already
    /// registered, so a repeated initialization never swaps the instance
    /// listeners were attached to.
    pub fn register(&mut self, editor_id: &str, host: H) -> bool {
        if self.sessions.contains_key(editor_id) {
            tracing::debug!(editor_id, "editor session already registered");
            return false;
        }
        tracing::debug!(editor_id, "registered editor session");
        self.sessions.insert(SmolStr::new(editor_id), host);
        true
    }

    pub fn get(&self, editor_id: &str) -> Option<&H> {
        self.sessions.get(editor_id)
    }

    pub fn contains(&self, editor_id: &str) -> bool {
        self.sessions.contains_key(editor_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(SmolStr::as_str)
    }
}
