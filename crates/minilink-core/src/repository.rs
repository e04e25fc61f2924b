use crate::error::StoreResult;
use crate::record::{ClickEvent, UrlRecord};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// A read-only view of the record store.
///
/// Services that only resolve codes (and the collision check of the
/// code generator) need nothing more than this.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn find(&self, code: &ShortCode) -> StoreResult<Option<UrlRecord>>;

    /// Checks whether a short code already exists in the store.
    async fn exists(&self, code: &ShortCode) -> StoreResult<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record. Returns `Err(Conflict)` if the code already
    /// exists; two racing inserts on one code resolve to exactly one
    /// winner.
    async fn insert(&self, record: UrlRecord) -> StoreResult<()>;

    /// Appends a click to the record's history and increments its
    /// counter by one, as a single atomic write per record.
    ///
    /// Returns the updated record, or `Err(Missing)` if the code is
    /// absent. Concurrent calls on the same record must not lose an
    /// entry or under-count.
    async fn record_click(&self, code: &ShortCode, event: ClickEvent) -> StoreResult<UrlRecord>;
}
