use async_trait::async_trait;
use std::{fmt::Debug, time::Instant};
use tracing::{info, warn};

use super::{search_failed, EMPTY_QUERY, NO_SEARCH_RESULTS, SEARCH_UNAVAILABLE};
use crate::{error::Result, logging::truncate_chars};

/// Most hits embedded into a prompt
pub const MAX_HITS: usize = 3;

/// One web search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }
}

/// Web search service returning ranked hits
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Render up to [`MAX_HITS`] hits as a numbered list
pub fn render_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .take(MAX_HITS)
        .enumerate()
        .map(|(idx, hit)| {
            format!(
                "{}. {} - {} (link: {})",
                idx + 1,
                hit.title,
                hit.description,
                hit.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run one search and turn the outcome into prompt text.
///
/// Never fails: a missing provider, an empty query, no hits or a provider
/// error all come back as a sentinel line.
pub async fn search_digest(
    provider: Option<&dyn SearchProvider>,
    search_type: &str,
    query: &str,
) -> String {
    if query.trim().is_empty() {
        return EMPTY_QUERY.to_string();
    }
    let Some(provider) = provider else {
        return SEARCH_UNAVAILABLE.to_string();
    };

    let started = Instant::now();
    let digest = match provider.search(query).await {
        Ok(hits) if hits.is_empty() => NO_SEARCH_RESULTS.to_string(),
        Ok(hits) => render_hits(&hits),
        Err(err) => {
            warn!(search_type, query, "search failed: {}", err);
            search_failed(&err)
        }
    };

    info!(
        search_type,
        query,
        elapsed_secs = started.elapsed().as_secs_f64(),
        results = %truncate_chars(&digest, 100),
        "search completed"
    );
    digest
}
