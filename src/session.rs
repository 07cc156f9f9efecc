//! Staged symptom sessions.
//!
//! The symptoms screen submits input once and receives a session id;
//! the result screen later redeems that id for a classification. The
//! store holds the input in between.
//!
//! Key properties:
//! - Entries live only in memory, never on disk
//! - An entry is redeemed at most once (`take` removes it)
//! - The store is bounded; at capacity the oldest entry is evicted,
//!   so abandoned sessions cannot grow memory without limit

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::SymptomInput;

/// Upper bound on concurrently staged sessions.
pub const MAX_STAGED_SESSIONS: usize = 32;

// ═══════════════════════════════════════════════════════════
// StagedInput — one submission awaiting its result screen
// ═══════════════════════════════════════════════════════════

/// A staged submission plus the bookkeeping needed to evict it.
struct StagedInput {
    input: SymptomInput,
    staged_at: DateTime<Utc>,
    /// Monotonic insertion counter; lower means older.
    seq: u64,
}

// ═══════════════════════════════════════════════════════════
// SessionStore — all staged submissions
// ═══════════════════════════════════════════════════════════

/// In-memory store for symptom input handed off between screens.
pub struct SessionStore {
    staged: HashMap<Uuid, StagedInput>,
    next_seq: u64,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            staged: HashMap::new(),
            next_seq: 0,
        }
    }

    // ── Staging ──────────────────────────────────────────

    /// Stage input for a later result request, returning the session id.
    ///
    /// At capacity the oldest staged entry is evicted first.
    pub fn stage(&mut self, input: SymptomInput) -> Uuid {
        if self.staged.len() >= MAX_STAGED_SESSIONS {
            self.evict_oldest();
        }

        let id = Uuid::new_v4();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.staged.insert(
            id,
            StagedInput {
                input,
                staged_at: Utc::now(),
                seq,
            },
        );
        id
    }

    /// Redeem a session id for its staged input.
    ///
    /// Removes the entry, so a second call with the same id returns None.
    pub fn take(&mut self, id: &Uuid) -> Option<SymptomInput> {
        self.staged.remove(id).map(|staged| staged.input)
    }

    /// Whether a session id is currently staged.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.staged.contains_key(id)
    }

    // ── Maintenance ──────────────────────────────────────

    /// Drop ALL staged sessions.
    pub fn clear(&mut self) {
        self.staged.clear();
    }

    /// Number of staged sessions.
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .staged
            .iter()
            .min_by_key(|(_, staged)| staged.seq)
            .map(|(id, staged)| (*id, staged.staged_at));
        if let Some((id, staged_at)) = oldest {
            tracing::warn!(
                session_id = %id,
                staged_at = %staged_at,
                "Session store full, evicting oldest entry"
            );
            self.staged.remove(&id);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn make_input(description: &str) -> SymptomInput {
        SymptomInput::new(description)
    }

    #[test]
    fn new_store_is_empty() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn stage_returns_distinct_ids() {
        let mut store = SessionStore::new();

        let id1 = store.stage(make_input("fever since yesterday"));
        let id2 = store.stage(make_input("small cut on finger"));

        assert_ne!(id1, id2);
        assert_eq!(store.len(), 2);
        assert!(store.contains(&id1));
        assert!(store.contains(&id2));
    }

    #[test]
    fn take_returns_staged_input() {
        let mut store = SessionStore::new();
        let id = store.stage(make_input("mild headache since morning"));

        let input = store.take(&id).unwrap();
        assert_eq!(input.description, "mild headache since morning");
    }

    #[test]
    fn take_is_one_shot() {
        let mut store = SessionStore::new();
        let id = store.stage(make_input("fever"));

        assert!(store.take(&id).is_some());
        assert!(store.take(&id).is_none(), "Second take must miss");
        assert!(store.is_empty());
    }

    #[test]
    fn take_unknown_id_returns_none() {
        let mut store = SessionStore::new();
        store.stage(make_input("fever"));

        assert!(store.take(&Uuid::new_v4()).is_none());
        assert_eq!(store.len(), 1, "Miss must not disturb staged entries");
    }

    #[test]
    fn capacity_evicts_oldest_entry() {
        let mut store = SessionStore::new();

        let first = store.stage(make_input("symptom 0"));
        for n in 1..MAX_STAGED_SESSIONS {
            store.stage(make_input(&format!("symptom {n}")));
        }
        assert_eq!(store.len(), MAX_STAGED_SESSIONS);

        let newest = store.stage(make_input("one past capacity"));

        assert_eq!(store.len(), MAX_STAGED_SESSIONS);
        assert!(!store.contains(&first), "Oldest entry should be evicted");
        assert!(store.contains(&newest));
    }

    #[test]
    fn eviction_keeps_recent_entries_takeable() {
        let mut store = SessionStore::new();

        for n in 0..=MAX_STAGED_SESSIONS {
            store.stage(make_input(&format!("symptom {n}")));
        }
        let id = store.stage(make_input("latest complaint"));

        let input = store.take(&id).unwrap();
        assert_eq!(input.description, "latest complaint");
    }

    #[test]
    fn clear_removes_all_sessions() {
        let mut store = SessionStore::new();
        let id1 = store.stage(make_input("fever"));
        let id2 = store.stage(make_input("rash"));
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains(&id1));
        assert!(!store.contains(&id2));
    }
}
