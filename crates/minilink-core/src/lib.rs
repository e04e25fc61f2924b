//! Core types and traits for the minilink URL shortener.
//!
//! This crate provides the shared vocabulary of the workflow: the
//! validated short code, the URL record and its click history, the
//! expiration policy, the repository contract, and the error taxonomy.

pub mod clock;
pub mod error;
pub mod expiry;
pub mod record;
pub mod repository;
pub mod shortcode;
pub mod stats;

pub use clock::{Clock, SystemClock};
pub use error::{Outcome, ServiceError, ServiceResult, StoreError, StoreResult};
pub use expiry::DEFAULT_VALIDITY_MINUTES;
pub use record::{validate_original_url, ClickEvent, Location, UrlRecord};
pub use repository::{ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use stats::{ClickView, UrlStats};
