//! Pagination controller.
//!
//! Derives the page count from the item count, keeps the current page inside
//! `[1, total_pages]` and writes the canonical page back into the location:
//! page 1 never carries a `page` parameter, and pages past the end are
//! clamped to the last page.

use super::filter::{FilterType, Route};
use super::location::Location;
use log::*;
use std::num::IntErrorKind;

/// Number of articles per listing page.
pub const PER_PAGE: u32 = 10;

/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

/// Page numbers shown on each side of the current page.
const WINDOW_RADIUS: i64 = 2;

/// Number of pages needed for `total_items`, never less than one.
///
pub fn total_pages(total_items: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    if total_items <= per_page {
        1
    } else {
        u32::try_from((total_items + per_page - 1) / per_page).unwrap_or(u32::MAX)
    }
}

/// Canonical location of `page` for the given filter.
///
pub fn paginate_link(page: u32, filter_type: FilterType, filter_key: Option<&str>) -> Location {
    let mut location = Location::new(&Route::path(filter_type, filter_key));
    if page > 1 {
        location.set_query_param(PAGE_PARAM, &page.to_string());
    }
    location
}

/// Pagination state of a listing.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Pagination {
    total_items: u64,
    per_page: u32,
    total_pages: u32,
    current_page: u32,
}

/// Page links to render around the current page.
///
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct PageWindow {
    pub first: Option<u32>,
    pub previous: Option<u32>,
    pub pages: Vec<u32>,
    pub next: Option<u32>,
    pub last: Option<u32>,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(0)
    }
}

impl Pagination {
    /// Return a new instance on page one.
    ///
    pub fn new(total_items: u64) -> Self {
        Pagination {
            total_items,
            per_page: PER_PAGE,
            total_pages: total_pages(total_items, PER_PAGE),
            current_page: 1,
        }
    }

    pub fn get_total_items(&self) -> u64 {
        self.total_items
    }

    pub fn get_per_page(&self) -> u32 {
        self.per_page
    }

    pub fn get_total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn get_current_page(&self) -> u32 {
        self.current_page
    }

    /// Recompute the page count. The current page is pulled back inside the
    /// new bounds; call `reconcile` to reflect it into the location.
    ///
    pub fn set_total_items(&mut self, total_items: u64) -> &mut Self {
        self.total_items = total_items;
        self.total_pages = total_pages(total_items, self.per_page);
        self.current_page = self.current_page.clamp(1, self.total_pages);
        self
    }

    /// Adopt the page requested by `location`, rewriting its `page`
    /// parameter when the request is not canonical. Returns the current page.
    ///
    pub fn reconcile(&mut self, location: &mut Location) -> u32 {
        let requested = requested_page(location);

        if requested <= 1 {
            if location.query_param(PAGE_PARAM).is_some() {
                debug!("Canonicalizing page {} to page 1", requested);
            }
            location.remove_query_param(PAGE_PARAM);
            self.current_page = 1;
        } else if requested <= i64::from(self.total_pages) {
            self.current_page = requested as u32;
            let canonical = self.current_page.to_string();
            if location.query_param(PAGE_PARAM) != Some(canonical.as_str()) {
                location.set_query_param(PAGE_PARAM, &canonical);
            }
        } else {
            warn!(
                "Requested page {} is past the last page {}, clamping.",
                requested, self.total_pages
            );
            self.current_page = self.total_pages;
            if self.total_pages == 1 {
                location.remove_query_param(PAGE_PARAM);
            } else {
                location.set_query_param(PAGE_PARAM, &self.total_pages.to_string());
            }
        }

        self.current_page
    }

    /// Adopt the page requested by `location` without knowing the item count.
    /// The location is left untouched so the request survives until the count
    /// is known again.
    ///
    pub fn adopt(&mut self, location: &Location) -> u32 {
        self.current_page = u32::try_from(requested_page(location).max(1)).unwrap_or(u32::MAX);
        self.current_page
    }

    /// Zero-based index of the first item on the current page.
    ///
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.per_page)
    }

    /// Page numbers around the current page, plus jump links.
    ///
    /// Up to two pages are shown on each side. When the window would start
    /// before page one it is extended to the right instead, and its end never
    /// passes the last page.
    ///
    pub fn window(&self) -> PageWindow {
        let current = i64::from(self.current_page);
        let total = i64::from(self.total_pages);

        let mut start = current - WINDOW_RADIUS;
        let mut end = current + WINDOW_RADIUS;
        if start < 1 {
            end += 1 - start;
            start = 1;
        }
        if end > total {
            end = total;
        }

        PageWindow {
            first: (start > 1).then_some(1),
            previous: (current > 1).then(|| self.current_page - 1),
            pages: (start..=end).map(|page| page as u32).collect(),
            next: (current < total).then(|| self.current_page + 1),
            last: (end < total).then_some(self.total_pages),
        }
    }
}

/// Page requested by the location; absent or unparsable means page one.
/// Numbers too large to represent still count as past the last page.
///
fn requested_page(location: &Location) -> i64 {
    let raw = match location.query_param(PAGE_PARAM) {
        Some(raw) => raw.trim(),
        None => return 1,
    };
    match raw.parse::<i64>() {
        Ok(page) => page,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
        Err(_) => 1,
    }
}
