use jiff::Timestamp;

/// Source of "now" for the workflow.
///
/// The workflow never reads the system clock directly; it asks the
/// injected clock so expiration behavior stays testable.
pub trait Clock: Send + Sync {
    /// Returns the current time of the clock.
    fn now(&self) -> Timestamp;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
