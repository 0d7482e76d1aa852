//! Listing filter types.
//!
//! The filter of a news listing is chosen by the shape of the navigation path,
//! never by a user-driven transition.

use super::location::Location;

/// Path of the unfiltered listing.
pub const LISTING_PATH: &str = "/news";

/// Specifying the listing filter.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FilterType {
    All,
    Category,
    Region,
    Search,
}

impl FilterType {
    /// Path segment (and API query key) naming the filter, absent for `All`.
    ///
    pub fn segment(&self) -> Option<&'static str> {
        match self {
            FilterType::All => None,
            FilterType::Category => Some("category"),
            FilterType::Region => Some("region"),
            FilterType::Search => Some("search"),
        }
    }

    fn from_segment(segment: &str) -> Option<FilterType> {
        match segment {
            "category" => Some(FilterType::Category),
            "region" => Some(FilterType::Region),
            "search" => Some(FilterType::Search),
            _ => None,
        }
    }

    /// Whether the filter key must be resolved to a backend record.
    ///
    pub fn needs_lookup(&self) -> bool {
        matches!(self, FilterType::Category | FilterType::Region)
    }
}

/// Resolved filter of a listing.
///
/// `filter_key` is absent exactly when the filter is `All`. For category and
/// region `resolved_filter_id` is the id found by the lookup; for search it is
/// the raw term.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ListingContext {
    filter_type: FilterType,
    filter_key: Option<String>,
    resolved_filter_id: Option<String>,
}

impl ListingContext {
    /// The unfiltered listing.
    ///
    pub fn all() -> Self {
        ListingContext {
            filter_type: FilterType::All,
            filter_key: None,
            resolved_filter_id: None,
        }
    }

    /// A search listing for the raw term.
    ///
    pub fn search(term: &str) -> Self {
        ListingContext {
            filter_type: FilterType::Search,
            filter_key: Some(term.to_owned()),
            resolved_filter_id: Some(term.to_owned()),
        }
    }

    /// A category or region listing whose slug resolved to `id`.
    ///
    pub(crate) fn resolved(filter_type: FilterType, key: &str, id: &str) -> Self {
        ListingContext {
            filter_type,
            filter_key: Some(key.to_owned()),
            resolved_filter_id: Some(id.to_owned()),
        }
    }

    pub fn get_filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn get_filter_key(&self) -> Option<&str> {
        self.filter_key.as_deref()
    }

    pub fn get_filter_id(&self) -> Option<&str> {
        self.resolved_filter_id.as_deref()
    }
}

/// Filter requested by a location, before any lookup.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Route {
    pub filter_type: FilterType,
    pub filter_key: Option<String>,
}

impl Route {
    /// Parse the path shape: `/news`, `/news/{category|region|search}/{key}`.
    /// The site root counts as the unfiltered listing. Returns `None` for any
    /// other shape, including a filter segment with an empty key.
    ///
    pub fn from_location(location: &Location) -> Option<Route> {
        let segments = location.segments();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        match segments.as_slice() {
            [] | ["news"] => Some(Route {
                filter_type: FilterType::All,
                filter_key: None,
            }),
            ["news", kind, key] if !key.trim().is_empty() => {
                FilterType::from_segment(kind).map(|filter_type| Route {
                    filter_type,
                    filter_key: Some((*key).to_owned()),
                })
            }
            _ => None,
        }
    }

    /// Path of the listing for this route, without query.
    ///
    pub fn path(filter_type: FilterType, filter_key: Option<&str>) -> String {
        match (filter_type.segment(), filter_key) {
            (Some(segment), Some(key)) => format!(
                "{}/{}/{}",
                LISTING_PATH,
                segment,
                urlencoding::encode(key)
            ),
            _ => LISTING_PATH.to_owned(),
        }
    }
}
