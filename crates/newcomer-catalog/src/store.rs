use newcomer_core::{Location, Service};

use crate::cascade;
use crate::category::{self, CategoryFilter};
use crate::search::{self, Criteria};

/// Snapshot of the services and locations fetched for one session.
///
/// Backend order is preserved and nothing is deduplicated. Each list is
/// replaced wholesale by the next fetch; a failed fetch simply leaves its list
/// empty.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: Vec<Service>,
    locations: Vec<Location>,
}

impl Catalog {
    #[must_use]
    pub fn new(services: Vec<Service>, locations: Vec<Location>) -> Self {
        Self {
            services,
            locations,
        }
    }

    pub fn replace_services(&mut self, services: Vec<Service>) {
        self.services = services;
    }

    pub fn replace_locations(&mut self, locations: Vec<Location>) {
        self.locations = locations;
    }

    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.locations.is_empty()
    }

    #[must_use]
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Service a location belongs to: the embedded copy if present, else the
    /// catalog entry. `None` for dangling references.
    #[must_use]
    pub fn service_of<'a>(&'a self, location: &'a Location) -> Option<&'a Service> {
        location
            .service
            .as_ref()
            .or_else(|| self.service(&location.service_id))
    }

    #[must_use]
    pub fn resolve_category(&self, key: &str) -> CategoryFilter {
        category::resolve_category(&self.services, key)
    }

    /// Number of locations shown on a category card.
    #[must_use]
    pub fn category_count(&self, filter: &CategoryFilter) -> usize {
        match filter {
            CategoryFilter::All => self.locations.len(),
            CategoryFilter::Service(id) if self.service(id).is_some() => self
                .locations
                .iter()
                .filter(|l| &l.service_id == id)
                .count(),
            CategoryFilter::Service(_) | CategoryFilter::Unmatched(_) => 0,
        }
    }

    #[must_use]
    pub fn provinces_for(&self, service_id: &str) -> Vec<String> {
        cascade::provinces_for(&self.locations, service_id)
    }

    #[must_use]
    pub fn cities_for(&self, service_id: &str, province: &str) -> Vec<String> {
        cascade::cities_for(&self.locations, service_id, province)
    }

    #[must_use]
    pub fn filter(&self, criteria: &Criteria) -> Vec<&Location> {
        search::filter(&self.services, &self.locations, criteria)
    }
}
