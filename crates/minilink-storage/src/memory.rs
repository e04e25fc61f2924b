use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use minilink_core::{
    ClickEvent, ReadRepository, Repository, ShortCode, StoreError, StoreResult, UrlRecord,
};

/// In-memory implementation of the repository contract using DashMap.
///
/// DashMap's sharded locks make `record_click` an atomic per-record
/// read-modify-write: the entry stays locked while the click is
/// appended and the counter advanced, so concurrent recordings never
/// lose an entry or under-count.
///
/// Short codes are never reused: `insert` refuses an existing key even
/// when the stored record has expired, and nothing ever removes a
/// record (expiration is a computed state, not a stored deletion).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find(&self, code: &ShortCode) -> StoreResult<Option<UrlRecord>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> StoreResult<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: UrlRecord) -> StoreResult<()> {
        let key = record.short_code.as_str().to_owned();

        // Check-and-insert through the entry API: racing inserts on one
        // code resolve to exactly one winner.
        match self.storage.entry(key) {
            Entry::Occupied(_) => Err(StoreError::Conflict(record.short_code.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(record);
                Ok(())
            }
        }
    }

    async fn record_click(&self, code: &ShortCode, event: ClickEvent) -> StoreResult<UrlRecord> {
        match self.storage.get_mut(code.as_str()) {
            Some(mut entry) => {
                entry.push_click(event);
                Ok(entry.value().clone())
            }
            None => Err(StoreError::Missing(code.to_string())),
        }
    }
}
