use crate::generate::{GeneratorSettings, ShortcodeGenerator};
use crate::recorder::ClickRecorder;
use async_trait::async_trait;
use jiff::Timestamp;
use minilink_core::{
    expiry, validate_original_url, Clock, ReadRepository, Repository, ServiceError, ServiceResult,
    ShortCode, SystemClock, UrlRecord, UrlStats,
};
use minilink_generator::CodeSource;
use minilink_geo::{DisabledGeo, GeoLookup};
use minilink_logging::{LogEvent, LogLevel, LogSink, LogStack, NullSink};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

/// Configuration for the URL workflow.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ServiceConfig {
    /// Base URL that short links are minted under.
    #[builder(setter(into))]
    pub base_url: String,
    /// Validity window applied when a request specifies none.
    #[builder(default = expiry::DEFAULT_VALIDITY_MINUTES)]
    pub default_validity_minutes: i64,
    /// Collision-handling settings for code generation.
    #[builder(default)]
    pub generator: GeneratorSettings,
}

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParams {
    /// The original URL to be shortened.
    pub url: String,
    /// Validity window in minutes; the configured default when `None`.
    pub validity_minutes: Option<i64>,
    /// Optional caller-supplied short code.
    pub custom_code: Option<String>,
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedUrl {
    /// Fully-qualified short link.
    pub short_link: String,
    /// When the link stops resolving.
    pub expiry: Timestamp,
}

/// The operations the workflow exposes to boundary layers.
#[async_trait]
pub trait UrlWorkflow: Send + Sync + 'static {
    /// Creates a shortened URL and returns the minted short link.
    async fn create_short_url(&self, params: CreateParams) -> ServiceResult<CreatedUrl>;

    /// Resolves a short code, records the click, and returns the
    /// original URL.
    async fn resolve_and_record(
        &self,
        code: &str,
        client_ip: &str,
        referrer: Option<String>,
    ) -> ServiceResult<String>;

    /// Projects a record into its read-only statistics view.
    async fn statistics(&self, code: &str) -> ServiceResult<UrlStats>;
}

/// A concrete implementation of the [`UrlWorkflow`].
///
/// Holds no request state of its own; every call is a fetch-mutate-
/// persist cycle against the injected record store. Geolocation and
/// log-sink failures are absorbed and never affect the outcome.
pub struct UrlService<R, S> {
    config: ServiceConfig,
    repository: Arc<R>,
    generator: ShortcodeGenerator<S>,
    recorder: ClickRecorder<R>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn LogSink>,
}

impl<R: Repository, S: CodeSource> UrlService<R, S> {
    /// Creates a service with default collaborators: system clock, no
    /// geolocation, no log sink.
    pub fn new(config: ServiceConfig, repository: R, source: S) -> Self {
        Self::with_collaborators(
            config,
            Arc::new(repository),
            source,
            Arc::new(DisabledGeo),
            Arc::new(NullSink),
            Arc::new(SystemClock),
        )
    }

    /// Creates a service with explicit collaborators.
    pub fn with_collaborators(
        config: ServiceConfig,
        repository: Arc<R>,
        source: S,
        geo: Arc<dyn GeoLookup>,
        sink: Arc<dyn LogSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let generator = ShortcodeGenerator::with_settings(source, config.generator);
        let recorder = ClickRecorder::new(Arc::clone(&repository), geo);

        Self {
            config,
            repository,
            generator,
            recorder,
            clock,
            sink,
        }
    }

    /// Forwards a structured event to the log sink, best-effort.
    async fn emit(&self, level: LogLevel, package: &str, message: String) {
        if let Ok(event) = LogEvent::new(LogStack::Backend, level, package, message) {
            self.sink.emit(event).await;
        }
    }

    /// Resolves the short code for a creation request: validates a
    /// caller-supplied one, or invents a free one.
    async fn resolve_code(&self, custom_code: Option<&str>) -> ServiceResult<ShortCode> {
        match custom_code {
            Some(raw) => {
                self.emit(
                    LogLevel::Debug,
                    "service",
                    "user provided custom shortcode".to_owned(),
                )
                .await;

                let code = match ShortCode::new(raw) {
                    Ok(code) => code,
                    Err(e) => {
                        self.emit(
                            LogLevel::Error,
                            "handler",
                            "custom shortcode contains invalid characters".to_owned(),
                        )
                        .await;
                        return Err(e);
                    }
                };

                if self.repository.exists(&code).await? {
                    warn!(code = %code, "requested short code already exists");
                    self.emit(
                        LogLevel::Warn,
                        "service",
                        "requested shortcode already exists".to_owned(),
                    )
                    .await;
                    return Err(ServiceError::ShortcodeExists(code.to_string()));
                }

                Ok(code)
            }
            None => {
                let code = self.generator.next_free_code(self.repository.as_ref()).await?;
                self.emit(
                    LogLevel::Debug,
                    "service",
                    "generated automatic shortcode".to_owned(),
                )
                .await;
                Ok(code)
            }
        }
    }
}

#[async_trait]
impl<R: Repository, S: CodeSource> UrlWorkflow for UrlService<R, S> {
    async fn create_short_url(&self, params: CreateParams) -> ServiceResult<CreatedUrl> {
        self.emit(
            LogLevel::Info,
            "service",
            "starting URL shortening process".to_owned(),
        )
        .await;

        if let Err(e) = validate_original_url(&params.url) {
            warn!(url = %params.url, "rejected malformed url");
            self.emit(
                LogLevel::Error,
                "handler",
                "invalid URL format provided by user".to_owned(),
            )
            .await;
            return Err(e);
        }

        let short_code = self.resolve_code(params.custom_code.as_deref()).await?;

        let now = self.clock.now();
        let validity_minutes = params
            .validity_minutes
            .unwrap_or(self.config.default_validity_minutes);
        let record = UrlRecord::new(short_code.clone(), params.url, now, validity_minutes)?;
        let expiry = record.expires_at;

        // A racing creation of the same code surfaces here as a
        // duplicate-key conflict; exactly one request wins.
        self.repository.insert(record).await?;

        info!(code = %short_code, expiry = %expiry, "short url created");
        self.emit(
            LogLevel::Info,
            "service",
            format!("short URL created successfully with code: {}", short_code),
        )
        .await;

        Ok(CreatedUrl {
            short_link: short_code.to_url(&self.config.base_url),
            expiry,
        })
    }

    async fn resolve_and_record(
        &self,
        code: &str,
        client_ip: &str,
        referrer: Option<String>,
    ) -> ServiceResult<String> {
        trace!(code, "resolving short code");
        self.emit(
            LogLevel::Debug,
            "service",
            format!("processing redirect request for: {}", code),
        )
        .await;

        let code = ShortCode::new_unchecked(code);
        let Some(record) = self.repository.find(&code).await? else {
            warn!(code = %code, "short code not found");
            self.emit(
                LogLevel::Warn,
                "service",
                format!("shortcode not found: {}", code),
            )
            .await;
            return Err(ServiceError::NotFound(code.to_string()));
        };

        let now = self.clock.now();
        if record.is_expired_at(now) {
            debug!(code = %code, "record has expired");
            self.emit(
                LogLevel::Warn,
                "service",
                format!("expired shortcode accessed: {}", code),
            )
            .await;
            return Err(ServiceError::Expired(code.to_string()));
        }

        let updated = self.recorder.record(&code, client_ip, referrer, now).await?;

        debug!(code = %code, url = %updated.original_url, "redirecting");
        self.emit(
            LogLevel::Info,
            "service",
            format!(
                "successful redirect for {} to {}",
                code, updated.original_url
            ),
        )
        .await;

        Ok(updated.original_url)
    }

    async fn statistics(&self, code: &str) -> ServiceResult<UrlStats> {
        self.emit(
            LogLevel::Debug,
            "service",
            format!("retrieving statistics for: {}", code),
        )
        .await;

        let code = ShortCode::new_unchecked(code);
        let Some(record) = self.repository.find(&code).await? else {
            self.emit(
                LogLevel::Warn,
                "service",
                format!("statistics requested for non-existent shortcode: {}", code),
            )
            .await;
            return Err(ServiceError::NotFound(code.to_string()));
        };

        let stats = UrlStats::project(&record, self.clock.now());

        self.emit(
            LogLevel::Info,
            "service",
            format!("statistics retrieved successfully for: {}", code),
        )
        .await;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;
    use minilink_generator::{RandomCodeSource, SeqCodeSource};
    use minilink_geo::GeoInfo;
    use minilink_storage::InMemoryRepository;
    use std::sync::Mutex;

    /// Clock whose "now" only moves when a test says so.
    struct ManualClock(Mutex<Timestamp>);

    impl ManualClock {
        fn starting_at(now: Timestamp) -> Arc<Self> {
            Arc::new(Self(Mutex::new(now)))
        }

        fn advance(&self, by: SignedDuration) {
            let mut now = self.0.lock().unwrap();
            *now = now.checked_add(by).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            *self.0.lock().unwrap()
        }
    }

    /// Sink capturing every emitted event.
    struct CaptureSink(Mutex<Vec<LogEvent>>);

    #[async_trait]
    impl LogSink for CaptureSink {
        async fn emit(&self, event: LogEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    struct StaticGeo;

    #[async_trait]
    impl GeoLookup for StaticGeo {
        async fn locate(&self, _ip: &str) -> Option<GeoInfo> {
            Some(GeoInfo {
                country: Some("DE".to_owned()),
                region: Some("BE".to_owned()),
                city: Some("Berlin".to_owned()),
            })
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    const BASE_URL: &str = "http://localhost:3001";

    fn at(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    fn config() -> ServiceConfig {
        ServiceConfig::builder().base_url(BASE_URL).build()
    }

    fn test_service() -> (
        UrlService<InMemoryRepository, SeqCodeSource>,
        Arc<ManualClock>,
    ) {
        let clock = ManualClock::starting_at(at(1_000));
        let service = UrlService::with_collaborators(
            config(),
            Arc::new(InMemoryRepository::new()),
            SeqCodeSource::with_prefix("c"),
            Arc::new(DisabledGeo),
            Arc::new(NullSink),
            clock.clone(),
        );
        (service, clock)
    }

    fn create(url: &str) -> CreateParams {
        CreateParams {
            url: url.to_owned(),
            validity_minutes: None,
            custom_code: None,
        }
    }

    fn create_with_code(url: &str, code: &str) -> CreateParams {
        CreateParams {
            url: url.to_owned(),
            validity_minutes: None,
            custom_code: Some(code.to_owned()),
        }
    }

    fn code_of(created: &CreatedUrl) -> String {
        created
            .short_link
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_owned()
    }

    #[tokio::test]
    async fn create_with_generated_code() {
        let clock = ManualClock::starting_at(at(1_000));
        let service = UrlService::with_collaborators(
            config(),
            Arc::new(InMemoryRepository::new()),
            RandomCodeSource::default(),
            Arc::new(DisabledGeo),
            Arc::new(NullSink),
            clock,
        );

        let created = service
            .create_short_url(create("https://example.com"))
            .await
            .unwrap();

        let code = code_of(&created);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(created.short_link.starts_with(BASE_URL));
    }

    #[tokio::test]
    async fn create_with_custom_code() {
        let (service, _clock) = test_service();

        let created = service
            .create_short_url(create_with_code("https://example.com", "abc"))
            .await
            .unwrap();

        assert_eq!(created.short_link, format!("{}/abc", BASE_URL));
    }

    #[tokio::test]
    async fn custom_code_validation() {
        let (service, _clock) = test_service();

        let err = service
            .create_short_url(create_with_code("https://example.com", "ab"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidShortcode(_)));

        let err = service
            .create_short_url(create_with_code("https://example.com", "abc!23"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidShortcode(_)));
    }

    #[tokio::test]
    async fn duplicate_custom_code_fails() {
        let (service, _clock) = test_service();

        service
            .create_short_url(create_with_code("https://example1.com", "myCode"))
            .await
            .unwrap();

        let err = service
            .create_short_url(create_with_code("https://example2.com", "myCode"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ShortcodeExists(_)));
    }

    #[tokio::test]
    async fn invalid_url_fails() {
        let (service, _clock) = test_service();

        for url in ["not-a-valid-url", "ftp://example.com", ""] {
            let err = service.create_short_url(create(url)).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidUrl(_)), "url: {url}");
        }
    }

    #[tokio::test]
    async fn default_validity_is_thirty_minutes() {
        let (service, clock) = test_service();

        let created = service
            .create_short_url(create("https://example.com"))
            .await
            .unwrap();

        assert_eq!(
            created.expiry,
            clock.now().checked_add(SignedDuration::from_mins(30)).unwrap()
        );
    }

    #[tokio::test]
    async fn explicit_validity_round_trips_through_statistics() {
        let (service, clock) = test_service();

        let created = service
            .create_short_url(CreateParams {
                url: "https://example.com".to_owned(),
                validity_minutes: Some(10),
                custom_code: None,
            })
            .await
            .unwrap();

        let stats = service.statistics(&code_of(&created)).await.unwrap();
        assert_eq!(stats.validity_minutes, 10);
        assert_eq!(stats.created_at, clock.now());
        assert_eq!(
            stats.expires_at,
            stats
                .created_at
                .checked_add(SignedDuration::from_mins(10))
                .unwrap()
        );
    }

    #[tokio::test]
    async fn non_positive_validity_is_rejected() {
        let (service, _clock) = test_service();

        for validity in [0, -1] {
            let err = service
                .create_short_url(CreateParams {
                    url: "https://example.com".to_owned(),
                    validity_minutes: Some(validity),
                    custom_code: None,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::InvalidValidity(v) if v == validity));
        }
    }

    #[tokio::test]
    async fn resolve_unknown_code_fails() {
        let (service, _clock) = test_service();

        let err = service
            .resolve_and_record("nope12", "203.0.113.7", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn resolve_returns_original_url_and_counts() {
        let (service, _clock) = test_service();

        let created = service
            .create_short_url(create("https://example.com/page"))
            .await
            .unwrap();
        let code = code_of(&created);

        for expected in 1..=3u64 {
            let url = service
                .resolve_and_record(&code, "203.0.113.7", None)
                .await
                .unwrap();
            assert_eq!(url, "https://example.com/page");

            let stats = service.statistics(&code).await.unwrap();
            assert_eq!(stats.total_clicks, expected);
            assert_eq!(stats.clicks.len(), expected as usize);
        }
    }

    #[tokio::test]
    async fn clicks_keep_call_order() {
        let (service, clock) = test_service();

        let created = service
            .create_short_url(create("https://example.com"))
            .await
            .unwrap();
        let code = code_of(&created);

        for referrer in ["first", "second", "third"] {
            clock.advance(SignedDuration::from_secs(1));
            service
                .resolve_and_record(&code, "203.0.113.7", Some(referrer.to_owned()))
                .await
                .unwrap();
        }

        let stats = service.statistics(&code).await.unwrap();
        let referrers: Vec<_> = stats.clicks.iter().map(|c| c.referrer.as_str()).collect();
        assert_eq!(referrers, ["first", "second", "third"]);
        assert!(stats.clicks.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    async fn expired_code_fails_and_records_nothing() {
        let (service, clock) = test_service();

        let created = service
            .create_short_url(CreateParams {
                url: "https://example.com".to_owned(),
                validity_minutes: Some(1),
                custom_code: None,
            })
            .await
            .unwrap();
        let code = code_of(&created);

        // One minute is the whole window; a second past it is expired.
        clock.advance(SignedDuration::from_secs(61));

        let err = service
            .resolve_and_record(&code, "203.0.113.7", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Expired(_)));

        let stats = service.statistics(&code).await.unwrap();
        assert_eq!(stats.total_clicks, 0);
        assert!(stats.clicks.is_empty());
        assert!(stats.is_expired);
    }

    #[tokio::test]
    async fn expiring_at_exactly_now_still_resolves() {
        let (service, clock) = test_service();

        let created = service
            .create_short_url(CreateParams {
                url: "https://example.com".to_owned(),
                validity_minutes: Some(1),
                custom_code: None,
            })
            .await
            .unwrap();
        let code = code_of(&created);

        clock.advance(SignedDuration::from_secs(60));

        let url = service
            .resolve_and_record(&code, "203.0.113.7", None)
            .await
            .unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn statistics_is_read_only() {
        let (service, _clock) = test_service();

        let created = service
            .create_short_url(create("https://example.com"))
            .await
            .unwrap();
        let code = code_of(&created);

        service
            .resolve_and_record(&code, "203.0.113.7", None)
            .await
            .unwrap();

        let first = service.statistics(&code).await.unwrap();
        let second = service.statistics(&code).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn statistics_unknown_code_fails() {
        let (service, _clock) = test_service();

        let err = service.statistics("nope12").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn statistics_expiration_is_computed_at_call_time() {
        let (service, clock) = test_service();

        let created = service
            .create_short_url(CreateParams {
                url: "https://example.com".to_owned(),
                validity_minutes: Some(1),
                custom_code: None,
            })
            .await
            .unwrap();
        let code = code_of(&created);

        assert!(!service.statistics(&code).await.unwrap().is_expired);

        clock.advance(SignedDuration::from_secs(61));

        assert!(service.statistics(&code).await.unwrap().is_expired);
    }

    #[tokio::test]
    async fn geo_data_flows_into_click_history() {
        let clock = ManualClock::starting_at(at(1_000));
        let service = UrlService::with_collaborators(
            config(),
            Arc::new(InMemoryRepository::new()),
            SeqCodeSource::with_prefix("c"),
            Arc::new(StaticGeo),
            Arc::new(NullSink),
            clock,
        );

        let created = service
            .create_short_url(create("https://example.com"))
            .await
            .unwrap();
        let code = code_of(&created);

        service
            .resolve_and_record(&code, "203.0.113.7", None)
            .await
            .unwrap();

        let stats = service.statistics(&code).await.unwrap();
        assert_eq!(stats.clicks[0].location.country, "DE");
        assert_eq!(stats.clicks[0].location.city, "Berlin");
    }

    #[tokio::test]
    async fn generation_exhaustion_surfaces_as_unavailable() {
        let clock = ManualClock::starting_at(at(1_000));
        let service = UrlService::with_collaborators(
            ServiceConfig::builder()
                .base_url(BASE_URL)
                .generator(GeneratorSettings::builder().max_attempts(3).build())
                .build(),
            Arc::new(InMemoryRepository::new()),
            SeqCodeSource::with_prefix("c"),
            Arc::new(DisabledGeo),
            Arc::new(NullSink),
            clock,
        );

        // Occupy the codes the sequential source will propose next.
        for code in ["c00000", "c00001", "c00002"] {
            service
                .create_short_url(create_with_code("https://taken.example", code))
                .await
                .unwrap();
        }

        let err = service
            .create_short_url(create("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable { attempts: 3 }));
    }

    #[tokio::test]
    async fn workflow_reports_to_the_log_sink() {
        let sink = Arc::new(CaptureSink(Mutex::new(Vec::new())));
        let clock = ManualClock::starting_at(at(1_000));
        let service = UrlService::with_collaborators(
            config(),
            Arc::new(InMemoryRepository::new()),
            SeqCodeSource::with_prefix("c"),
            Arc::new(DisabledGeo),
            sink.clone(),
            clock,
        );

        service
            .create_short_url(create("https://example.com"))
            .await
            .unwrap();

        let events = sink.0.lock().unwrap();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.stack == LogStack::Backend));
        assert!(events
            .iter()
            .any(|e| e.level == LogLevel::Info && e.message.contains("created successfully")));
    }
}
