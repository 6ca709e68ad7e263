//! Dependent option lists for the service → province → city selectors.
//!
//! Options are derived from the locations already in memory, which gives the
//! same answer as the backend's `/locations/provinces` and `/locations/cities`
//! endpoints without a round trip. Values keep first-seen order.

use std::collections::HashSet;

use newcomer_core::Location;

/// Distinct provinces that have at least one location of `service_id`.
///
/// Empty when `service_id` is empty or has no locations.
#[must_use]
pub fn provinces_for(locations: &[Location], service_id: &str) -> Vec<String> {
    if service_id.is_empty() {
        return Vec::new();
    }
    distinct(
        locations
            .iter()
            .filter(|l| l.service_id == service_id)
            .map(|l| l.province.as_str()),
    )
}

/// Distinct cities in `province` that have at least one location of
/// `service_id`.
///
/// Empty when either selection is empty.
#[must_use]
pub fn cities_for(locations: &[Location], service_id: &str, province: &str) -> Vec<String> {
    if service_id.is_empty() || province.is_empty() {
        return Vec::new();
    }
    distinct(
        locations
            .iter()
            .filter(|l| l.service_id == service_id && l.province == province)
            .map(|l| l.city.as_str()),
    )
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_owned)
        .collect()
}
