//! List data fetcher.
//!
//! Fetches one page of articles for a listing context. Every call takes a
//! generation ticket and only the most recent call may publish its result,
//! so a slow response for an earlier page never overwrites a later one.

use super::filter::ListingContext;
use super::pagination::PER_PAGE;
use super::NewsSource;
use crate::api::ArticleSummary;
use log::*;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Result of a fetch call.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FetchOutcome {
    /// The page was published with this many items.
    Loaded(usize),
    /// The request failed; the list was emptied.
    Failed,
    /// A newer request started before this one finished; nothing changed.
    Stale,
}

/// Inputs of a fetch, kept for `refetch`.
///
#[derive(Debug, PartialEq, Eq, Clone)]
struct FetchRequest {
    page: u32,
    context: ListingContext,
}

#[derive(Debug, Default)]
struct FetchState {
    items: Vec<ArticleSummary>,
    loading: bool,
    last_error: Option<String>,
    last_request: Option<FetchRequest>,
}

/// Holds the items of the current page and the loading flag.
///
#[derive(Debug, Default)]
pub struct ListFetcher {
    generation: AtomicU64,
    state: Mutex<FetchState>,
}

impl ListFetcher {
    pub fn new() -> Self {
        ListFetcher::default()
    }

    /// Fetch `page` of the listing described by `context` and publish it
    /// unless a newer fetch has started meanwhile.
    ///
    pub async fn fetch_page<S: NewsSource>(
        &self,
        source: &S,
        page: u32,
        context: &ListingContext,
    ) -> FetchOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.last_request = Some(FetchRequest {
                page,
                context: context.clone(),
            });
        }

        let result = source
            .list(
                page,
                PER_PAGE,
                context.get_filter_type(),
                context.get_filter_id(),
            )
            .await;

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Discarding stale result for page {}", page);
            return FetchOutcome::Stale;
        }
        state.loading = false;
        match result {
            Ok(items) => {
                let count = items.len();
                state.items = items;
                state.last_error = None;
                FetchOutcome::Loaded(count)
            }
            Err(e) => {
                error!("Failed to fetch page {}: {}", page, e);
                state.items.clear();
                state.last_error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Repeat the most recent fetch. Returns `None` when nothing was fetched
    /// yet.
    ///
    pub async fn refetch<S: NewsSource>(&self, source: &S) -> Option<FetchOutcome> {
        let request = self.state.lock().await.last_request.clone()?;
        info!("Retrying page {}...", request.page);
        Some(self.fetch_page(source, request.page, &request.context).await)
    }

    pub async fn get_items(&self) -> Vec<ArticleSummary> {
        self.state.lock().await.items.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    pub async fn get_last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }
}
