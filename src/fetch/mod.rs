//! HTTP fetching for the importer
//!
//! This module handles all outbound HTTP:
//! - Building the HTTP client with browser-like headers
//! - Degraded-success GETs with retry/backoff for scraping
//! - The unretried liveness probe used by the orchestrator

mod client;
mod retry;

pub use client::{build_http_client, PageFetcher, ProbeReport};
pub use retry::RetryPolicy;
