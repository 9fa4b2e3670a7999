//! Deduplication for in-flight requests.
//!
//! Each key holds at most the newest req_id; responses carrying an older
//! id are dropped by the caller.

use std::collections::HashMap;
use std::hash::Hash;

/// Generic request tracker.
///
/// Works with any key type; one pending req_id per key. Issuing again
/// under the same key supersedes the previous request.
#[derive(Debug)]
pub struct RequestTracker<K> {
    pending: HashMap<K, u64>,
}

impl<K: Eq + Hash> Default for RequestTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> RequestTracker<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Register a new request under `key` and return its req_id.
    ///
    /// Any request already pending under the same key is superseded; its
    /// later `accept` will fail.
    pub fn issue(&mut self, key: K, next_id_fn: impl FnOnce() -> u64) -> u64 {
        let id = next_id_fn();
        self.pending.insert(key, id);
        id
    }

    /// Check a response against the pending id.
    ///
    /// Returns true and clears the pending entry only when `req_id`
    /// matches; false means the response is stale and must be dropped.
    pub fn accept(&mut self, key: &K, req_id: u64) -> bool {
        match self.pending.get(key) {
            Some(&pending_id) if pending_id == req_id => {
                self.pending.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Drop the pending entry for `key`, if any.
    #[allow(dead_code)]
    pub fn clear(&mut self, key: &K) {
        self.pending.remove(key);
    }

    /// Drop every pending entry (logout, session expiry).
    pub fn reset_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    #[allow(dead_code)]
    pub fn get_pending(&self, key: &K) -> Option<u64> {
        self.pending.get(key).copied()
    }
}

/// Request kinds tracked by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    /// Spotify authorization URL fetch
    AuthUrl,
    /// OAuth code exchange
    ExchangeCode,
    /// Library page fetch
    LibraryPage,
    /// Track removal
    DeleteTrack,
    /// Platform library sync
    Sync,
    /// Profile fetch
    Profile,
    /// Preference save
    Preferences,
    /// Platform connection list fetch
    Connections,
    /// Platform disconnect
    Disconnect,
    /// Playlist list fetch
    Playlists,
    /// Playlist export
    ExportPlaylist,
    /// Playlist import
    ImportPlaylist,
}
