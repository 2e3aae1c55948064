use chrono::FixedOffset;
use serde::Deserialize;

/// Main configuration structure for Portal-Import
///
/// Every field has a default describing the rea.ru source, so the importer
/// runs without a config file and a partial TOML file only overrides what
/// it names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub source: SourceConfig,
    pub import: ImportConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            source: SourceConfig::default(),
            import: ImportConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept header sent with every request
    pub accept: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    pub retry: RetryConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/124.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml".to_string(),
            timeout_secs: 60,
            retry: RetryConfig::default(),
        }
    }
}

/// Retry/backoff policy for transient fetch failures
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per URL, including the first one
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Backoff factor: the n-th retry waits factor * 2^(n-1) seconds
    #[serde(rename = "backoff-factor")]
    pub backoff_factor: f64,

    /// Status codes that trigger a retry
    #[serde(rename = "retry-statuses")]
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_factor: 1.5,
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

/// The remote site the importer scrapes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL all listing paths and relative hrefs are joined against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Substring identifying previously imported records (used by --clear)
    pub marker: String,

    /// UTC offset the source publishes dates in, in hours
    #[serde(rename = "timezone-offset-hours")]
    pub timezone_offset_hours: i32,

    /// Boilerplate rejection rules: a fragment is dropped when every token
    /// of any one group appears in its lowercased text
    #[serde(rename = "trash-phrases")]
    pub trash_phrases: Vec<Vec<String>>,

    pub news: SectionConfig,
    pub events: SectionConfig,
}

impl SourceConfig {
    /// The configured timezone as a fixed offset, if the hour value is sane
    pub fn timezone(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.timezone_offset_hours * 3600)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.rea.ru".to_string(),
            marker: "rea.ru".to_string(),
            // Moscow time
            timezone_offset_hours: 3,
            trash_phrases: vec![
                vec!["задать".to_string(), "вопрос".to_string()],
                vec!["заполнив поля".to_string()],
            ],
            news: SectionConfig::rea_news(),
            events: SectionConfig::rea_events(),
        }
    }
}

/// One scraped listing section (news or events)
#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    /// Path of the listing page, relative to the base URL
    #[serde(rename = "listing-path")]
    pub listing_path: String,

    /// Href prefixes that identify detail-page links on the listing
    #[serde(rename = "link-prefixes")]
    pub link_prefixes: Vec<String>,

    /// Candidate content-container selectors, tried in order
    #[serde(rename = "body-selectors")]
    pub body_selectors: Vec<String>,

    /// Candidate date-node selectors, tried in order
    #[serde(rename = "date-selectors")]
    pub date_selectors: Vec<String>,

    /// Text of the trailing source link appended to every body
    #[serde(rename = "read-more-label")]
    pub read_more_label: String,

    /// Reuse the item title as date text when no date node is found
    #[serde(rename = "title-date-fallback", default)]
    pub title_date_fallback: bool,

    /// Pause after each successfully emitted record, in milliseconds
    #[serde(rename = "politeness-delay-ms", default)]
    pub politeness_delay_ms: u64,
}

impl SectionConfig {
    /// Section parameters for the rea.ru news listing
    pub fn rea_news() -> Self {
        Self {
            listing_path: "/news".to_string(),
            link_prefixes: vec!["/news/".to_string()],
            body_selectors: vec![
                "div.article__body".to_string(),
                "div.news-detail__text".to_string(),
                "article".to_string(),
            ],
            date_selectors: vec![
                ".article__date".to_string(),
                ".news-detail__date".to_string(),
            ],
            read_more_label: "Читать на rea.ru".to_string(),
            title_date_fallback: false,
            politeness_delay_ms: 0,
        }
    }

    /// Section parameters for the rea.ru events listing
    pub fn rea_events() -> Self {
        Self {
            listing_path: "/events".to_string(),
            link_prefixes: vec!["/event/".to_string(), "/events/".to_string()],
            body_selectors: vec![
                "div.event-detail__text".to_string(),
                "div.article__body".to_string(),
                "article".to_string(),
            ],
            date_selectors: vec![
                ".event-detail__date".to_string(),
                ".article__date".to_string(),
            ],
            read_more_label: "Смотреть на rea.ru".to_string(),
            title_date_fallback: true,
            politeness_delay_ms: 700,
        }
    }
}

/// Import limits and extraction bounds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// News records to import when the CLI does not say otherwise
    #[serde(rename = "default-news-limit")]
    pub default_news_limit: usize,

    /// Event records to import when the CLI does not say otherwise
    #[serde(rename = "default-events-limit")]
    pub default_events_limit: usize,

    /// Content fragments kept per detail page
    #[serde(rename = "max-fragments")]
    pub max_fragments: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_news_limit: 10,
            default_events_limit: 10,
            max_fragments: 3,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the portal's SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "./portal.db".to_string(),
        }
    }
}
