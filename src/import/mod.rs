//! Import orchestrator
//!
//! Drives one import run end to end: liveness probe against the source,
//! optional purge of previously imported records, extraction of each
//! entity kind up to its limit, and natural-key upsert into the store.

use crate::config::Config;
use crate::extract::SectionExtractor;
use crate::fetch::PageFetcher;
use crate::storage::PortalStore;
use crate::Result;
use url::Url;

/// Options for one import run
#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Maximum news records to import
    pub news_limit: usize,

    /// Maximum event records to import
    pub events_limit: usize,

    /// Purge previously imported records before importing
    pub clear: bool,
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportSummary {
    /// News records the extractor emitted
    pub news_extracted: usize,

    /// News rows actually created (absent titles only)
    pub news_created: usize,

    /// Event records the extractor emitted
    pub events_extracted: usize,

    /// Event rows actually created
    pub events_created: usize,
}

/// One-shot importer tying the fetcher, extractor, and store together
pub struct Importer<'a, S: PortalStore> {
    config: &'a Config,
    fetcher: &'a PageFetcher,
    store: &'a mut S,
}

impl<'a, S: PortalStore> Importer<'a, S> {
    pub fn new(config: &'a Config, fetcher: &'a PageFetcher, store: &'a mut S) -> Self {
        Self {
            config,
            fetcher,
            store,
        }
    }

    /// Runs one import. The initial probe is deliberately unretried and
    /// unguarded: if the source is unreachable the whole run aborts.
    pub async fn run(&mut self, opts: &ImportOptions) -> Result<ImportSummary> {
        let news_url = Url::parse(&self.config.source.base_url)?
            .join(&self.config.source.news.listing_path)?
            .to_string();

        tracing::info!("checking availability of {}", news_url);
        let report = self.fetcher.probe(&news_url).await?;
        tracing::info!(
            "source responded: status={}, len={}",
            report.status,
            report.length
        );

        if opts.clear {
            let marker = &self.config.source.marker;
            tracing::info!("removing previously imported records (marker: {})", marker);
            let news_deleted = self.store.delete_news_containing(marker)?;
            let events_deleted = self.store.delete_events_containing(marker)?;
            tracing::info!(
                "removed {} news and {} events",
                news_deleted,
                events_deleted
            );
        }

        let mut summary = ImportSummary::default();

        let news_extractor =
            SectionExtractor::new(self.fetcher, self.config, &self.config.source.news)?;
        let news = news_extractor.extract_news(opts.news_limit).await;
        summary.news_extracted = news.len();
        for item in &news {
            if self.store.create_news_if_absent(item)? {
                summary.news_created += 1;
            }
        }

        let events_extractor =
            SectionExtractor::new(self.fetcher, self.config, &self.config.source.events)?;
        let events = events_extractor.extract_events(opts.events_limit).await;
        summary.events_extracted = events.len();
        for item in &events {
            if self.store.create_event_if_absent(item)? {
                summary.events_created += 1;
            }
        }

        tracing::info!(
            "import finished: {} news added ({} extracted), {} events added ({} extracted)",
            summary.news_created,
            summary.news_extracted,
            summary.events_created,
            summary.events_extracted
        );

        Ok(summary)
    }
}
