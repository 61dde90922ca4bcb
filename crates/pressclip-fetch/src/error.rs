use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("feed parse error: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),

    #[error("store error: {0}")]
    Store(#[from] pressclip_store::StoreError),

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// A malformed CSS selector in a site descriptor. Programming error,
    /// surfaces loudly instead of being swallowed like remote failures.
    #[error("invalid CSS selector: {0}")]
    Selector(String),
}
