use crate::CodeSource;
use minilink_core::ShortCode;
use std::iter;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

const MIN_CODE_LENGTH: usize = 3;
const MAX_CODE_LENGTH: usize = 10;

/// Produces random alphanumeric codes of a fixed length.
#[derive(Debug, Clone)]
pub struct RandomCodeSource {
    length: usize,
}

impl RandomCodeSource {
    /// Creates a source emitting codes of the given length, clamped to
    /// the valid short-code range of 3-10 characters.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    /// The length of codes this source emits.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeSource {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeSource for RandomCodeSource {
    fn next_code(&self) -> ShortCode {
        let code: String =
            iter::repeat_with(|| ALPHANUMERIC[rand::random_range(0..ALPHANUMERIC.len())] as char)
                .take(self.length)
                .collect();
        ShortCode::new_unchecked(code)
    }
}
