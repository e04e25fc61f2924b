//! Record-store implementations for minilink.
//!
//! The repository contract lives in `minilink_core`; this crate ships
//! the in-memory reference implementation used by tests and
//! single-process deployments.

pub mod memory;

pub use memory::InMemoryRepository;
