//! Selection state for a screen: category, province, city, search text, and
//! the current page.
//!
//! Upstream changes clear everything downstream of them and send the page
//! back to 1. Province and city option lists may be filled either locally
//! ([`FilterState::resolve_options`]) or from the backend; backend results
//! carry an [`OptionsRequest`] ticket and are dropped if the selection that
//! asked for them has since changed.

use crate::category::CategoryFilter;
use crate::search::Criteria;
use crate::store::Catalog;

/// A pending option fetch, tagged with the selection generation that
/// triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsRequest {
    Provinces {
        generation: u64,
        service_id: String,
    },
    Cities {
        generation: u64,
        service_id: String,
        province: String,
    },
}

#[derive(Debug, Clone)]
pub struct FilterState {
    category: CategoryFilter,
    province: Option<String>,
    city: Option<String>,
    query: String,
    page: usize,
    provinces: Vec<String>,
    cities: Vec<String>,
    /// Bumped whenever the category changes.
    service_generation: u64,
    /// Bumped whenever the category or province changes.
    province_generation: u64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            province: None,
            city: None,
            query: String::new(),
            page: 1,
            provinces: Vec::new(),
            cities: Vec::new(),
            service_generation: 0,
            province_generation: 0,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    #[must_use]
    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn province_options(&self) -> &[String] {
        &self.provinces
    }

    #[must_use]
    pub fn city_options(&self) -> &[String] {
        &self.cities
    }

    /// Selects a category and clears province, city, their option lists, and
    /// the page.
    ///
    /// Returns the province fetch to issue when a concrete service was picked.
    pub fn select_category(&mut self, category: CategoryFilter) -> Option<OptionsRequest> {
        self.category = category;
        self.province = None;
        self.city = None;
        self.provinces.clear();
        self.cities.clear();
        self.page = 1;
        self.service_generation += 1;
        self.province_generation += 1;

        self.category
            .service_id()
            .map(|service_id| OptionsRequest::Provinces {
                generation: self.service_generation,
                service_id: service_id.to_string(),
            })
    }

    /// Selects a province and clears the city and its options.
    ///
    /// Ignored unless a concrete service is selected. Returns the city fetch
    /// to issue when a non-empty province was picked.
    pub fn select_province(&mut self, province: Option<String>) -> Option<OptionsRequest> {
        let service_id = self.category.service_id()?.to_string();
        let province = province.filter(|p| !p.is_empty());

        self.province.clone_from(&province);
        self.city = None;
        self.cities.clear();
        self.page = 1;
        self.province_generation += 1;

        province.map(|province| OptionsRequest::Cities {
            generation: self.province_generation,
            service_id,
            province,
        })
    }

    /// Selects a city. Ignored unless a province is selected.
    pub fn select_city(&mut self, city: Option<String>) {
        if self.province.is_none() {
            return;
        }
        self.city = city.filter(|c| !c.is_empty());
        self.page = 1;
    }

    /// Updates the search text and goes back to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Stores fetched options if `request` still matches the current
    /// selection. Returns `false` for a stale response, which is discarded.
    pub fn apply_options(&mut self, request: &OptionsRequest, values: Vec<String>) -> bool {
        match request {
            OptionsRequest::Provinces { generation, .. } => {
                if *generation != self.service_generation {
                    tracing::debug!(
                        generation,
                        current = self.service_generation,
                        "discarding stale province options"
                    );
                    return false;
                }
                self.provinces = values;
            }
            OptionsRequest::Cities { generation, .. } => {
                if *generation != self.province_generation {
                    tracing::debug!(
                        generation,
                        current = self.province_generation,
                        "discarding stale city options"
                    );
                    return false;
                }
                self.cities = values;
            }
        }
        true
    }

    /// Derives both option lists from the catalog instead of the backend.
    pub fn resolve_options(&mut self, catalog: &Catalog) {
        match self.category.service_id() {
            Some(service_id) => {
                self.provinces = catalog.provinces_for(service_id);
                self.cities = self
                    .province
                    .as_deref()
                    .map(|p| catalog.cities_for(service_id, p))
                    .unwrap_or_default();
            }
            None => {
                self.provinces.clear();
                self.cities.clear();
            }
        }
    }

    #[must_use]
    pub fn criteria(&self) -> Criteria {
        Criteria {
            category: self.category.clone(),
            province: self.province.clone(),
            city: self.city.clone(),
            query: self.query.clone(),
        }
    }

    /// Moves forward one page unless already on the last.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Moves back one page unless already on the first.
    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Jumps to `page`, clamped to `[1, max(1, total_pages)]`.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Pulls the page back into range after the result list shrank.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page, total_pages);
    }
}
