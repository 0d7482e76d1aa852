//! News listing module.
//!
//! This module contains the listing core:
//! - `filter`: filter types, routes and the resolved `ListingContext`
//! - `location`: the navigable URL model
//! - `resolver`: location → context, with redirect on invalid filter targets
//! - `pagination`: page count, URL page reconciliation, links, page window
//! - `fetcher`: page fetching with last-request-wins ordering
//!
//! `Listing` ties them together for one navigation.

mod fetcher;
mod filter;
mod location;
mod pagination;
mod resolver;

pub use fetcher::{FetchOutcome, ListFetcher};
pub use filter::{FilterType, ListingContext, Route, LISTING_PATH};
pub use location::Location;
pub use pagination::{paginate_link, total_pages, PageWindow, Pagination, PAGE_PARAM, PER_PAGE};
pub use resolver::{resolve, Resolution, DEFAULT_TITLE};

use crate::api::{ApiError, ArticleSummary, FilterRecord};
use log::*;

/// Backend operations the listing core needs.
///
#[allow(async_fn_in_trait)]
pub trait NewsSource {
    /// Number of articles matching the filter.
    async fn count(&self, filter_type: FilterType, filter_id: Option<&str>) -> Result<u64, ApiError>;

    /// One page of article summaries matching the filter.
    async fn list(
        &self,
        page: u32,
        per_page: u32,
        filter_type: FilterType,
        filter_id: Option<&str>,
    ) -> Result<Vec<ArticleSummary>, ApiError>;

    /// Category or region records whose slug equals `key`.
    async fn lookup(&self, filter_type: FilterType, key: &str) -> Result<Vec<FilterRecord>, ApiError>;
}

/// State of a news listing screen.
///
#[derive(Debug)]
pub struct Listing {
    location: Location,
    context: ListingContext,
    title: String,
    pagination: Pagination,
    fetcher: ListFetcher,
}

impl Default for Listing {
    fn default() -> Self {
        Listing::new()
    }
}

impl Listing {
    /// Return an unfiltered listing on page one, before any navigation.
    ///
    pub fn new() -> Self {
        Listing {
            location: Location::new(LISTING_PATH),
            context: ListingContext::all(),
            title: DEFAULT_TITLE.to_owned(),
            pagination: Pagination::default(),
            fetcher: ListFetcher::new(),
        }
    }

    /// Navigate to `location`: resolve the filter, count matching articles,
    /// reconcile the requested page and fetch it. The stored location
    /// reflects any redirect and page canonicalization.
    ///
    pub async fn navigate<S: NewsSource>(&mut self, source: &S, location: Location) -> FetchOutcome {
        let mut location = location;
        let (context, title) = match resolve(source, &location).await {
            Resolution::Resolved { context, title } => (context, title),
            Resolution::Redirect(target) => {
                info!("Redirecting from '{}' to '{}'", location, target);
                location = target;
                (ListingContext::all(), DEFAULT_TITLE.to_owned())
            }
        };

        if context != self.context {
            self.pagination = Pagination::default();
        }

        let count = source
            .count(context.get_filter_type(), context.get_filter_id())
            .await;
        let (page, total_items) = match count {
            Ok(total_items) => {
                self.pagination.set_total_items(total_items);
                (self.pagination.reconcile(&mut location), total_items)
            }
            Err(e) => {
                // Without a count the requested page cannot be checked; keep it.
                error!("Failed to count articles: {}", e);
                (self.pagination.adopt(&location), self.pagination.get_total_items())
            }
        };

        self.context = context;
        self.title = title;
        self.location = location;
        debug!(
            "Listing '{}' page {} of {} ({} articles)",
            self.title,
            page,
            self.pagination.get_total_pages(),
            total_items
        );
        self.fetcher.fetch_page(source, page, &self.context).await
    }

    /// Canonical location of `page` under the current filter.
    ///
    pub fn link(&self, page: u32) -> Location {
        paginate_link(
            page,
            self.context.get_filter_type(),
            self.context.get_filter_key(),
        )
    }

    pub fn get_location(&self) -> &Location {
        &self.location
    }

    pub fn get_context(&self) -> &ListingContext {
        &self.context
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn get_fetcher(&self) -> &ListFetcher {
        &self.fetcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory portal: articles grouped by filter id, categories and
    /// regions by slug.
    #[derive(Default)]
    struct Portal {
        totals: HashMap<Option<String>, u64>,
        records: HashMap<String, Vec<FilterRecord>>,
        listed: Mutex<Vec<(u32, Option<String>)>>,
        count_fails: bool,
    }

    impl NewsSource for Portal {
        async fn count(&self, _: FilterType, filter_id: Option<&str>) -> Result<u64, ApiError> {
            if self.count_fails {
                return Err(ApiError::Other("count unavailable".to_string()));
            }
            Ok(*self
                .totals
                .get(&filter_id.map(str::to_owned))
                .unwrap_or(&0))
        }

        async fn list(
            &self,
            page: u32,
            per_page: u32,
            _: FilterType,
            filter_id: Option<&str>,
        ) -> Result<Vec<ArticleSummary>, ApiError> {
            self.listed
                .lock()
                .unwrap()
                .push((page, filter_id.map(str::to_owned)));
            let total = *self.totals.get(&filter_id.map(str::to_owned)).unwrap_or(&0);
            let start = u64::from((page - 1) * per_page);
            let on_page = total.saturating_sub(start).min(u64::from(per_page));
            Ok((0..on_page).map(|_| Faker.fake::<ArticleSummary>()).collect())
        }

        async fn lookup(&self, _: FilterType, key: &str) -> Result<Vec<FilterRecord>, ApiError> {
            Ok(self.records.get(key).cloned().unwrap_or_default())
        }
    }

    fn portal() -> Portal {
        let mut portal = Portal::default();
        portal.totals.insert(None, 25);
        portal.totals.insert(Some("c-sport".to_string()), 4);
        portal.totals.insert(Some("избори".to_string()), 12);
        portal.records.insert(
            "football".to_string(),
            vec![FilterRecord {
                id: "c-sport".to_string(),
                name: "Спорт".to_string(),
                slug: "football".to_string(),
            }],
        );
        portal
    }

    #[tokio::test]
    async fn page_past_end_is_clamped_and_fetched() {
        let source = portal();
        let mut listing = Listing::new();
        let outcome = listing.navigate(&source, Location::parse("/news?page=7")).await;

        assert_eq!(outcome, FetchOutcome::Loaded(5));
        assert_eq!(listing.get_pagination().get_total_pages(), 3);
        assert_eq!(listing.get_pagination().get_current_page(), 3);
        assert_eq!(listing.get_location().to_string(), "/news?page=3");
        assert_eq!(listing.get_title(), "Новини");
        assert_eq!(source.listed.lock().unwrap()[0], (3, None));
    }

    #[tokio::test]
    async fn category_listing_uses_resolved_id() {
        let source = portal();
        let mut listing = Listing::new();
        let outcome = listing
            .navigate(&source, Location::parse("/news/category/football?page=1"))
            .await;

        assert_eq!(outcome, FetchOutcome::Loaded(4));
        assert_eq!(listing.get_title(), "Спорт");
        assert_eq!(listing.get_context().get_filter_id(), Some("c-sport"));
        assert_eq!(listing.get_location().to_string(), "/news/category/football");
        assert_eq!(listing.link(2).to_string(), "/news/category/football?page=2");
        assert_eq!(
            source.listed.lock().unwrap()[0],
            (1, Some("c-sport".to_string()))
        );
    }

    #[tokio::test]
    async fn unknown_category_redirects_to_all() {
        let source = portal();
        let mut listing = Listing::new();
        listing
            .navigate(&source, Location::parse("/news/category/sport?page=2"))
            .await;

        assert_eq!(listing.get_context(), &ListingContext::all());
        assert_eq!(listing.get_title(), "Новини");
        assert_eq!(listing.get_location().to_string(), "/news");
        assert_eq!(listing.get_pagination().get_total_pages(), 3);
    }

    #[tokio::test]
    async fn search_listing_passes_raw_term() {
        let source = portal();
        let mut listing = Listing::new();
        let location = paginate_link(2, FilterType::Search, Some("избори"));
        let outcome = listing.navigate(&source, location).await;

        assert_eq!(outcome, FetchOutcome::Loaded(2));
        assert_eq!(listing.get_title(), "избори");
        assert_eq!(
            source.listed.lock().unwrap()[0],
            (2, Some("избори".to_string()))
        );
    }

    #[tokio::test]
    async fn changing_filter_starts_from_first_page() {
        let source = portal();
        let mut listing = Listing::new();
        listing.navigate(&source, Location::parse("/news?page=2")).await;
        assert_eq!(listing.get_pagination().get_current_page(), 2);

        listing
            .navigate(&source, Location::parse("/news/category/football"))
            .await;
        assert_eq!(listing.get_pagination().get_current_page(), 1);
        assert_eq!(listing.get_pagination().get_total_pages(), 1);
    }

    #[tokio::test]
    async fn failed_count_keeps_requested_page() {
        let mut source = portal();
        source.count_fails = true;
        let mut listing = Listing::new();
        let outcome = listing
            .navigate(&source, Location::parse("/news?page=2"))
            .await;

        assert_eq!(outcome, FetchOutcome::Loaded(10));
        assert_eq!(listing.get_location().to_string(), "/news?page=2");
        assert_eq!(listing.get_pagination().get_current_page(), 2);
        assert_eq!(source.listed.lock().unwrap()[0], (2, None));
    }
}
