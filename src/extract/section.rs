//! Listing-section extraction pipeline
//!
//! One `SectionExtractor` handles one listing page (news or events). The
//! shape is the same for both kinds: collect candidate detail links from
//! the listing, dedup by title, fetch each detail page, pull out content
//! fragments and a date. Only the date policy differs: news substitutes
//! "now" for an unparseable date, events drop the record.

use crate::config::{Config, SectionConfig};
use crate::extract::content::{
    collapse_text, collect_fragments, find_date_text, select_container, TrashFilter,
};
use crate::extract::dates::{now_in, parse_ru_date, RuDate};
use crate::extract::records::{EventItem, NewsItem};
use crate::fetch::PageFetcher;
use crate::{ConfigError, ImportError};
use chrono::FixedOffset;
use scraper::Selector;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// A detail-page link discovered on the listing, already deduplicated
#[derive(Debug, Clone)]
struct Candidate {
    title: String,
    url: String,
}

/// Content and date pulled from one detail page
struct DetailPage {
    html: String,
    date: RuDate,
}

/// Extractor for one listing section
pub struct SectionExtractor<'a> {
    fetcher: &'a PageFetcher,
    section: &'a SectionConfig,
    base_url: Url,
    listing_url: String,
    trash: TrashFilter,
    offset: FixedOffset,
    max_fragments: usize,
}

impl<'a> SectionExtractor<'a> {
    pub fn new(
        fetcher: &'a PageFetcher,
        config: &'a Config,
        section: &'a SectionConfig,
    ) -> crate::Result<Self> {
        let base_url = Url::parse(&config.source.base_url)?;
        let listing_url = base_url.join(&section.listing_path)?.to_string();
        let offset = config.source.timezone().ok_or_else(|| {
            ImportError::Config(ConfigError::Validation(format!(
                "invalid timezone offset {}",
                config.source.timezone_offset_hours
            )))
        })?;

        Ok(Self {
            fetcher,
            section,
            base_url,
            listing_url,
            trash: TrashFilter::new(&config.source.trash_phrases),
            offset,
            max_fragments: config.import.max_fragments,
        })
    }

    /// Extracts up to `limit` news records from this section
    pub async fn extract_news(&self, limit: usize) -> Vec<NewsItem> {
        let candidates = self.candidates().await;
        let mut items = Vec::new();

        for candidate in candidates {
            if items.len() >= limit {
                break;
            }

            let page = self.detail(&candidate).await;
            // News is never dropped for date reasons
            let published = match page.date {
                RuDate::Parsed(ts) => ts,
                RuDate::NoMatch | RuDate::InvalidCalendar => now_in(self.offset),
            };

            tracing::info!("news: {}", candidate.title);
            items.push(NewsItem {
                title: candidate.title,
                body: page.html,
                published,
            });
        }

        items
    }

    /// Extracts up to `limit` event records from this section. Records
    /// without a parseable date are dropped and do not count against the
    /// limit.
    pub async fn extract_events(&self, limit: usize) -> Vec<EventItem> {
        let candidates = self.candidates().await;
        tracing::debug!("found {} event links", candidates.len());
        let mut items = Vec::new();

        for candidate in candidates {
            if items.len() >= limit {
                break;
            }

            let page = self.detail(&candidate).await;
            let start_time = match page.date {
                RuDate::Parsed(ts) => ts,
                RuDate::NoMatch => {
                    tracing::warn!("skipping event without a date: {}", candidate.url);
                    continue;
                }
                RuDate::InvalidCalendar => {
                    tracing::warn!("skipping event with an invalid date: {}", candidate.url);
                    continue;
                }
            };

            tracing::info!("event: {}", candidate.title);
            items.push(EventItem {
                title: candidate.title,
                description: page.html,
                start_time,
                end_time: None,
            });

            if items.len() >= limit {
                break;
            }

            // Politeness pause toward the remote server, only after a
            // successful emission
            if self.section.politeness_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.section.politeness_delay_ms)).await;
            }
        }

        items
    }

    /// Collects detail links from the listing page in document order,
    /// skipping anchors with empty or already-seen titles. Dedup is by
    /// title, not URL: two hrefs sharing a title collapse to one.
    async fn candidates(&self) -> Vec<Candidate> {
        let listing = self.fetcher.fetch(&self.listing_url).await;

        let selector_source = self
            .section
            .link_prefixes
            .iter()
            .map(|prefix| format!("a[href^='{}']", prefix))
            .collect::<Vec<_>>()
            .join(", ");

        let Ok(selector) = Selector::parse(&selector_source) else {
            tracing::warn!("bad link selector built from prefixes: {}", selector_source);
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for anchor in listing.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            let title = collapse_text(&anchor);
            if title.is_empty() || !seen.insert(title.clone()) {
                continue;
            }

            let Ok(url) = self.base_url.join(href) else {
                tracing::warn!("unresolvable href on listing: {}", href);
                continue;
            };

            candidates.push(Candidate {
                title,
                url: url.to_string(),
            });
        }

        candidates
    }

    /// Fetches one detail page and extracts its content blob and date text
    async fn detail(&self, candidate: &Candidate) -> DetailPage {
        let document = self.fetcher.fetch(&candidate.url).await;

        let container = select_container(&document, &self.section.body_selectors);
        let fragments = collect_fragments(container, &self.trash, self.max_fragments);

        let mut html = fragments.concat();
        html.push_str(&format!(
            "<p><a href='{}' target='_blank'>{}</a></p>",
            candidate.url, self.section.read_more_label
        ));

        let date_text = find_date_text(&document, &self.section.date_selectors).or_else(|| {
            self.section
                .title_date_fallback
                .then(|| candidate.title.clone())
        });

        let date = match date_text {
            Some(text) => parse_ru_date(&text, self.offset),
            None => RuDate::NoMatch,
        };

        DetailPage { html, date }
    }
}
