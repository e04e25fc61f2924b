//! Validated structured-logging client.
//!
//! Events carry a stack, a level, a package name, and a message; the
//! package name is validated against a per-stack allow-list at
//! construction time. Sinks are fire-and-forget collaborators: an
//! implementation absorbs its own failures and must never affect the
//! workflow it reports on.

pub mod event;
pub mod shipper;
pub mod sink;

pub use event::{LogEvent, LogEventError, LogLevel, LogStack};
pub use shipper::{RemoteShipper, ShipperConfig};
pub use sink::{LogSink, NullSink, TracingSink};
