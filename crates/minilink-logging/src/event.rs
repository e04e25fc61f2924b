use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Which half of the system an event originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStack {
    Backend,
    Frontend,
}

impl Display for LogStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogStack::Backend => f.write_str("backend"),
            LogStack::Frontend => f.write_str("frontend"),
        }
    }
}

/// Severity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => f.write_str("debug"),
            LogLevel::Info => f.write_str("info"),
            LogLevel::Warn => f.write_str("warn"),
            LogLevel::Error => f.write_str("error"),
            LogLevel::Fatal => f.write_str("fatal"),
        }
    }
}

/// Packages accepted only on the backend stack.
const BACKEND_PACKAGES: &[&str] = &[
    "cache",
    "controller",
    "cron_job",
    "db",
    "domain",
    "handler",
    "repository",
    "route",
    "service",
];

/// Packages accepted only on the frontend stack.
const FRONTEND_PACKAGES: &[&str] = &["api", "component", "hook", "page", "state", "style"];

/// Packages accepted on either stack.
const SHARED_PACKAGES: &[&str] = &["auth", "config", "middleware", "utils"];

/// Rejection reasons for a malformed event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogEventError {
    #[error("unknown log package: {0}")]
    UnknownPackage(String),
    #[error("package '{package}' is not allowed for stack '{stack}'")]
    PackageNotAllowed { stack: LogStack, package: String },
}

/// A validated structured log event.
///
/// The wire shape serializes the stack and level lowercase, matching
/// the remote evaluation endpoint's contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    pub stack: LogStack,
    pub level: LogLevel,
    pub package: String,
    pub message: String,
}

impl LogEvent {
    /// Builds an event, validating the package against the stack's
    /// allow-list.
    pub fn new(
        stack: LogStack,
        level: LogLevel,
        package: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, LogEventError> {
        let package = package.into();
        validate_package(stack, &package)?;
        Ok(Self {
            stack,
            level,
            package,
            message: message.into(),
        })
    }
}

fn validate_package(stack: LogStack, package: &str) -> Result<(), LogEventError> {
    if SHARED_PACKAGES.contains(&package) {
        return Ok(());
    }

    let (own, other) = match stack {
        LogStack::Backend => (BACKEND_PACKAGES, FRONTEND_PACKAGES),
        LogStack::Frontend => (FRONTEND_PACKAGES, BACKEND_PACKAGES),
    };

    if own.contains(&package) {
        return Ok(());
    }

    if other.contains(&package) {
        return Err(LogEventError::PackageNotAllowed {
            stack,
            package: package.to_owned(),
        });
    }

    Err(LogEventError::UnknownPackage(package.to_owned()))
}
