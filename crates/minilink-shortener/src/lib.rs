//! The minilink URL workflow.
//!
//! This crate composes the candidate-code sources, the expiration
//! policy, and the click recorder into [`UrlService`], the per-request
//! orchestrator behind `create_short_url`, `resolve_and_record`, and
//! `statistics`. Core types are re-exported from `minilink_core`.

pub mod generate;
pub mod recorder;
pub mod service;

pub use generate::{GeneratorSettings, ShortcodeGenerator};
pub use recorder::ClickRecorder;
pub use service::{CreateParams, CreatedUrl, ServiceConfig, UrlService, UrlWorkflow};
