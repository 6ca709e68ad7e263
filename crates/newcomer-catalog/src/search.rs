//! Category, place, and free-text filtering over a location list.

use newcomer_core::{Location, Service};

use crate::category::CategoryFilter;

/// Everything the list and map views filter on.
///
/// Empty `province`/`city` strings are treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub category: CategoryFilter,
    pub province: Option<String>,
    pub city: Option<String>,
    pub query: String,
}

/// Applies `criteria` to `locations`, keeping input order.
///
/// Stages, each skipped when its criterion is empty:
/// 1. category: keep locations of that service. A service id missing from
///    `services`, or an unmatched key, yields an empty result.
/// 2. province: exact match.
/// 3. city: exact match.
/// 4. query: case-insensitive substring of the name, city, address, or
///    embedded service name. Absent fields just don't match.
#[must_use]
pub fn filter<'a, I>(services: &[Service], locations: I, criteria: &Criteria) -> Vec<&'a Location>
where
    I: IntoIterator<Item = &'a Location>,
{
    let service_id = match &criteria.category {
        CategoryFilter::All => None,
        CategoryFilter::Service(id) if services.iter().any(|s| &s.id == id) => Some(id.as_str()),
        CategoryFilter::Service(_) | CategoryFilter::Unmatched(_) => return Vec::new(),
    };
    let province = criteria.province.as_deref().filter(|p| !p.is_empty());
    let city = criteria.city.as_deref().filter(|c| !c.is_empty());
    let needle = criteria.query.to_lowercase();

    locations
        .into_iter()
        .filter(|l| service_id.is_none_or(|id| l.service_id == id))
        .filter(|l| province.is_none_or(|p| l.province == p))
        .filter(|l| city.is_none_or(|c| l.city == c))
        .filter(|l| needle.is_empty() || matches_query(l, &needle))
        .collect()
}

/// `needle` must already be lowercased.
fn matches_query(location: &Location, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&location.name)
        || contains(&location.city)
        || location.address.as_deref().is_some_and(contains)
        || location
            .service
            .as_ref()
            .is_some_and(|s| contains(&s.name))
}

/// Map footer text, e.g. `"Showing 1 location"`.
#[must_use]
pub fn showing_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Showing {count} location{plural}")
}

/// Search feedback under the search bar; `None` when there is no query.
#[must_use]
pub fn found_label(count: usize, query: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    Some(format!("Found {count} results for \"{query}\""))
}
