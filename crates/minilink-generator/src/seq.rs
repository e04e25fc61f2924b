use crate::CodeSource;
use minilink_core::ShortCode;

/// A deterministic sequential code source.
///
/// Produces codes like "c00000", "c00001", etc. Useful in tests and in
/// single-node setups where predictable codes are acceptable.
#[derive(Debug)]
pub struct SeqCodeSource {
    counter: std::sync::atomic::AtomicU64,
    prefix: String,
}

impl Clone for SeqCodeSource {
    fn clone(&self) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(
                self.counter.load(std::sync::atomic::Ordering::SeqCst),
            ),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqCodeSource {
    /// Creates a sequential source with a custom prefix.
    ///
    /// The prefix plus five counter digits must stay within the 10
    /// character short-code limit.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }

    /// Creates a sequential source starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl CodeSource for SeqCodeSource {
    fn next_code(&self) -> ShortCode {
        let count = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:05}", self.prefix, count))
    }
}
