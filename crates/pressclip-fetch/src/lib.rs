//! Multi-source fetch-dedupe-enrich pipeline.
//!
//! For each client, builds a boolean query from its keyword profile,
//! fans out to four independently unreliable sources (NewsData API,
//! Google News RSS, a curated feed catalog, and targeted HTML scraping),
//! deduplicates candidates against a per-run seen-set, enriches each
//! with an extractive summary and a topic label, and persists them
//! through the store's create-if-absent contract. One source's failure
//! never sinks the run: adapter outcomes are collected as tagged
//! reports and aggregated by the orchestrator.

pub mod cache;
pub mod classify;
pub mod error;
pub mod expand;
pub mod persist;
pub mod pipeline;
mod sources;
pub mod summarize;
pub mod types;

pub use error::FetchError;
pub use expand::{HttpExpander, QueryExpander};
pub use pipeline::Pipeline;
pub use sources::{NewsdataClient, ScrapeSite};
pub use types::{
    Candidate, ClientReport, FetchConfig, FetchWindow, RunReport, SeenSet, SourceReport,
};
