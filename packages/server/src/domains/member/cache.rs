//! Process-local cache of member read projections.

use dashmap::DashMap;
use uuid::Uuid;

use crate::domains::member::data::MemberData;

/// Keyed by member id; holds the projection computed at last read.
///
/// No TTL and no size bound - entries live until a write to the same
/// member evicts them. `get`/`put`/`evict` are each atomic per key;
/// nothing spans a get-then-put, so concurrent first reads of a cold
/// key may each load from the store.
#[derive(Default)]
pub struct MemberCache {
    entries: DashMap<Uuid, MemberData>,
}

impl MemberCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Uuid) -> Option<MemberData> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    pub fn put(&self, id: Uuid, data: MemberData) {
        self.entries.insert(id, data);
    }

    pub fn evict(&self, id: Uuid) {
        self.entries.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
