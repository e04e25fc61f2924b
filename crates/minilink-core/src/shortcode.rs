use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated short code identifier for a shortened URL.
///
/// Short codes are 3-10 ASCII alphanumeric characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShortCode(String);

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 10;

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes are 3-10 characters and contain only `[A-Za-z0-9]`.
    pub fn new(code: impl Into<String>) -> Result<Self, ServiceError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. code generators configured to emit valid output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), ServiceError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(ServiceError::InvalidShortcode(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ServiceError::InvalidShortcode(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("abc").is_ok());
        assert!(ShortCode::new("Abc123xyz0").is_ok());
        assert!(ShortCode::new("a".repeat(10)).is_ok());
    }

    #[test]
    fn too_short() {
        assert!(ShortCode::new("ab").is_err());
        assert!(ShortCode::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(ShortCode::new("a".repeat(11)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc def").is_err());
        assert!(ShortCode::new("abc/def").is_err());
        assert!(ShortCode::new("abc!23").is_err());
        assert!(ShortCode::new("abc-def").is_err());
        assert!(ShortCode::new("abc_def").is_err());
    }

    #[test]
    fn rejection_is_typed() {
        let err = ShortCode::new("ab").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidShortcode(_)));
    }

    #[test]
    fn display_round_trips() {
        let code = ShortCode::new("myCode9").unwrap();
        assert_eq!(code.to_string(), "myCode9");
        assert_eq!(code.as_str(), "myCode9");
    }

    #[test]
    fn to_url_normalizes_trailing_slash() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(
            code.to_url("http://localhost:3001"),
            "http://localhost:3001/abc123"
        );
        assert_eq!(
            code.to_url("http://localhost:3001/"),
            "http://localhost:3001/abc123"
        );
    }
}
