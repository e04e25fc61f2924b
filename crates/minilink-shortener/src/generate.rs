use minilink_core::{ReadRepository, ServiceError, ServiceResult, ShortCode};
use minilink_generator::CodeSource;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Configures collision handling for shortcode generation.
///
/// The retry ceiling is configurable rather than a hard invariant; the
/// default matches the reference behavior.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct GeneratorSettings {
    /// Number of candidates to try before giving up.
    #[builder(default = 5)]
    pub max_attempts: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Collision-checked shortcode generation.
///
/// Wraps a pure [`CodeSource`] and probes each candidate against the
/// record store; exhausting the attempt ceiling yields
/// [`ServiceError::Unavailable`]. This component only invents codes;
/// it never judges caller-supplied ones and never writes a record.
#[derive(Debug, Clone)]
pub struct ShortcodeGenerator<S> {
    source: S,
    settings: GeneratorSettings,
}

impl<S: CodeSource> ShortcodeGenerator<S> {
    /// Creates a generator with the default settings.
    pub fn new(source: S) -> Self {
        Self::with_settings(source, GeneratorSettings::default())
    }

    /// Creates a generator with explicit settings.
    pub fn with_settings(source: S, settings: GeneratorSettings) -> Self {
        Self { source, settings }
    }

    /// Produces a code that is free in the given store at probe time.
    pub async fn next_free_code<R: ReadRepository>(
        &self,
        repository: &R,
    ) -> ServiceResult<ShortCode> {
        for attempt in 1..=self.settings.max_attempts {
            let candidate = self.source.next_code();

            if !repository.exists(&candidate).await? {
                trace!(code = %candidate, attempt, "allocated free short code");
                return Ok(candidate);
            }

            debug!(code = %candidate, attempt, "short code collision, retrying");
        }

        Err(ServiceError::Unavailable {
            attempts: self.settings.max_attempts,
        })
    }
}
