//! Direct HTML scraping of listing pages without feeds.
//!
//! Each site is a URL plus three CSS selectors (title, link, date).
//! Sites are visited sequentially with a politeness delay; a failing
//! site is logged and skipped. Malformed selectors are a configuration
//! bug and fail the whole adapter instead.

use std::time::Duration;

use pressclip_store::SaveOutcome;
use scraper::{ElementRef, Html, Selector};

use crate::error::FetchError;
use crate::persist::save_candidate;
use crate::types::Candidate;

use super::{matches_any_keyword, AdapterCtx};

/// One scrape target: a listing page and the selectors that locate
/// headline, link, and date within it.
#[derive(Debug, Clone)]
pub struct ScrapeSite {
    pub url: String,
    pub title_selector: String,
    pub link_selector: String,
    pub date_selector: String,
}

pub(super) fn default_sites() -> Vec<ScrapeSite> {
    vec![
        ScrapeSite {
            url: "https://www.camara.leg.br/noticias/".to_string(),
            title_selector: "h3.g-chamada__titulo".to_string(),
            link_selector: "h3.g-chamada__titulo a".to_string(),
            date_selector: "span.g-chamada__data".to_string(),
        },
        ScrapeSite {
            url: "https://www12.senado.leg.br/noticias/ultimas".to_string(),
            title_selector: "h3.title".to_string(),
            link_selector: "h3.title a".to_string(),
            date_selector: "span.date".to_string(),
        },
    ]
}

pub(super) async fn fetch_scrape(ctx: &AdapterCtx<'_>) -> Result<usize, FetchError> {
    let mut created = 0;

    for (i, site) in ctx.cfg.scrape_sites.iter().enumerate() {
        if i > 0 && ctx.cfg.scrape_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(ctx.cfg.scrape_delay_ms)).await;
        }

        let html = match fetch_page(ctx, &site.url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(
                    client = ctx.client_slug,
                    site = site.url.as_str(),
                    error = %e,
                    "scrape fetch failed"
                );
                continue;
            }
        };

        // Extraction is synchronous: the parsed document is not Send
        // and must not be held across an await point.
        let candidates = extract_candidates(&html, site, ctx.keywords)?;

        for candidate in candidates {
            if !ctx.seen.insert(&candidate.url) {
                continue;
            }
            if save_candidate(ctx.store, ctx.client_slug, candidate).await?
                == SaveOutcome::Created
            {
                created += 1;
            }
        }
    }

    Ok(created)
}

async fn fetch_page(ctx: &AdapterCtx<'_>, url: &str) -> Result<String, FetchError> {
    let response = ctx
        .http
        .get(url)
        .timeout(Duration::from_secs(ctx.cfg.scrape_timeout_secs))
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

fn parse_selector(raw: &str) -> Result<Selector, FetchError> {
    Selector::parse(raw).map_err(|e| FetchError::Selector(format!("{raw}: {e}")))
}

/// Pull keyword-matching candidates out of a listing page. The link is
/// resolved among the title block's own descendants and the date within
/// the block or its nearest following sibling, so one anchor-less block
/// never steals a neighbor's URL.
fn extract_candidates(
    html: &str,
    site: &ScrapeSite,
    keywords: &[String],
) -> Result<Vec<Candidate>, FetchError> {
    let title_sel = parse_selector(&site.title_selector)?;
    let link_sel = parse_selector(&site.link_selector)?;
    let date_sel = parse_selector(&site.date_selector)?;

    let document = Html::parse_document(html);

    let mut candidates = Vec::new();
    for block in document.select(&title_sel) {
        let title = block.text().collect::<String>().trim().to_string();
        if title.is_empty() || !matches_any_keyword(&title, keywords) {
            continue;
        }
        let Some(link) = block
            .select(&link_sel)
            .find_map(|el| el.value().attr("href"))
            .map(str::to_string)
        else {
            continue;
        };
        let raw_date = block
            .select(&date_sel)
            .map(element_text)
            .find(|d| !d.is_empty())
            .or_else(|| {
                // The listing markup the default descriptors target puts
                // the date right next to the headline element.
                block
                    .next_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|el| date_sel.matches(el))
                    .map(element_text)
                    .filter(|d| !d.is_empty())
            });
        candidates.push(Candidate {
            title,
            url: link,
            raw_date,
            source: site.url.clone(),
        });
    }

    Ok(candidates)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
