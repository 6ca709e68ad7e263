//! Category selection for the directory list.
//!
//! Categories are joined to locations by service id. Free-form keys (the
//! `"all"` sentinel, a service id, or a service display name) are resolved once
//! into a [`CategoryFilter`] so that the filter itself never compares names.

use newcomer_core::Service;

/// Sentinel key meaning "no category filter".
pub const ALL_KEY: &str = "all";

/// Fixed labels for the well-known category keys.
const CATEGORY_LABELS: &[(&str, &str)] = &[
    (ALL_KEY, "All Services"),
    ("Government Agency", "Government Agencies"),
    ("Bank", "Banks & Money Transfer"),
    ("shopping", "Shopping Malls"),
    ("groceries", "Grocery Stores"),
    ("transport", "Transport"),
    ("telecom", "Telecom"),
    ("drivetest", "Drive Test Centers"),
    ("Hospital", "Hospitals in the area"),
    ("other", "Other Services"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// A service known to the catalog, by id.
    Service(String),
    /// A key that matched no service, or matched more than one by name.
    /// Filters with this category always yield nothing.
    Unmatched(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn service_id(&self) -> Option<&str> {
        match self {
            CategoryFilter::Service(id) => Some(id),
            CategoryFilter::All | CategoryFilter::Unmatched(_) => None,
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

/// Resolves a user-supplied category key against the known services.
///
/// `""` and `"all"` mean no filter. Otherwise an exact id match wins; failing
/// that, a display-name match is accepted only when exactly one service has
/// that name.
#[must_use]
pub fn resolve_category(services: &[Service], key: &str) -> CategoryFilter {
    if key.is_empty() || key == ALL_KEY {
        return CategoryFilter::All;
    }

    if let Some(service) = services.iter().find(|s| s.id == key) {
        return CategoryFilter::Service(service.id.clone());
    }

    let mut by_name = services.iter().filter(|s| s.name == key);
    match (by_name.next(), by_name.next()) {
        (Some(service), None) => CategoryFilter::Service(service.id.clone()),
        (Some(_), Some(_)) => {
            tracing::debug!(key, "category name matches several services");
            CategoryFilter::Unmatched(key.to_string())
        }
        _ => CategoryFilter::Unmatched(key.to_string()),
    }
}

/// Human label for a category key, falling back to the key itself.
#[must_use]
pub fn category_label(key: &str) -> &str {
    CATEGORY_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(key, |(_, label)| *label)
}

/// Heading for the location list, e.g. `"Banks & Money Transfer Locations"`.
#[must_use]
pub fn category_heading(services: &[Service], filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => "All Locations".to_string(),
        CategoryFilter::Service(id) => {
            let key = services
                .iter()
                .find(|s| &s.id == id)
                .map_or(id.as_str(), |s| s.name.as_str());
            format!("{} Locations", category_label(key))
        }
        CategoryFilter::Unmatched(key) => format!("{} Locations", category_label(key)),
    }
}
