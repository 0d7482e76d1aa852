//! Listing query resolver.
//!
//! Turns a location into a `ListingContext`. Category and region slugs are
//! looked up once; anything but exactly one match sends the reader back to the
//! unfiltered listing.

use super::filter::{FilterType, ListingContext, Route, LISTING_PATH};
use super::location::Location;
use super::NewsSource;
use log::*;

/// Title of the unfiltered listing.
pub const DEFAULT_TITLE: &str = "Новини";

/// Result of resolving a location.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Resolution {
    /// The filter target exists.
    Resolved {
        context: ListingContext,
        title: String,
    },
    /// The filter target is invalid; navigate to the given location instead.
    Redirect(Location),
}

/// Resolve the filter of `location`, looking up category and region slugs
/// through `source`.
///
pub async fn resolve<S: NewsSource>(source: &S, location: &Location) -> Resolution {
    let route = match Route::from_location(location) {
        Some(route) => route,
        None => {
            warn!("Unknown listing path '{}', redirecting.", location.path());
            return redirect_to_all();
        }
    };

    match (route.filter_type, route.filter_key) {
        (FilterType::Search, Some(term)) => Resolution::Resolved {
            title: term.clone(),
            context: ListingContext::search(&term),
        },
        (filter_type, Some(key)) if filter_type.needs_lookup() => {
            match source.lookup(filter_type, &key).await {
                Ok(records) if records.len() == 1 => {
                    let record = &records[0];
                    debug!(
                        "Resolved {:?} '{}' to id {}",
                        filter_type, key, record.id
                    );
                    Resolution::Resolved {
                        context: ListingContext::resolved(filter_type, &key, &record.id),
                        title: record.name.clone(),
                    }
                }
                Ok(records) => {
                    warn!(
                        "{:?} '{}' matched {} records, redirecting.",
                        filter_type,
                        key,
                        records.len()
                    );
                    redirect_to_all()
                }
                Err(e) => {
                    error!("Failed to look up {:?} '{}': {}", filter_type, key, e);
                    redirect_to_all()
                }
            }
        }
        _ => Resolution::Resolved {
            context: ListingContext::all(),
            title: DEFAULT_TITLE.to_owned(),
        },
    }
}

fn redirect_to_all() -> Resolution {
    Resolution::Redirect(Location::new(LISTING_PATH))
}
