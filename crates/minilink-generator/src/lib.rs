//! Candidate short-code sources.
//!
//! A [`CodeSource`] invents codes; it never talks to storage and never
//! judges caller-supplied codes. Collision checking against the record
//! store is layered on top by the workflow crate.

pub mod random;
pub mod seq;

pub use random::RandomCodeSource;
pub use seq::SeqCodeSource;

use minilink_core::ShortCode;

/// Trait for producing candidate short codes.
///
/// Implementations are pure candidate producers; uniqueness is not
/// guaranteed and is checked by the caller against the record store.
pub trait CodeSource: Send + Sync + 'static {
    /// Produces the next candidate short code.
    fn next_code(&self) -> ShortCode;
}
