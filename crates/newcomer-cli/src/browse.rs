//! Read-only directory views for the CLI.
//!
//! Each handler loads what it needs through `newcomer-client` and runs the
//! filtering locally through `newcomer-catalog`, the same path a screen in the
//! mobile app takes.

use anyhow::Context;
use newcomer_catalog::{
    category_heading, fit_region, found_label, paginate, showing_label, total_pages, Catalog,
    CategoryFilter, FilterState, Region, ALL_KEY,
};
use newcomer_client::{load_catalog, refresh_options, ClientError, DirectoryClient};
use newcomer_core::{AppConfig, Location};

use crate::FilterArgs;

/// Padding around fitted markers, as a fraction of the span on each side.
const MAP_PADDING: f64 = 0.1;

const NAME_WIDTH: usize = 40;

/// Builds the filter state the given arguments describe.
///
/// Province and city are applied in cascade order, so a province without a
/// concrete category (or a city without a province) is dropped with a warning.
pub(crate) fn apply_filters(catalog: &Catalog, filters: &FilterArgs) -> FilterState {
    let mut state = FilterState::new();
    let category = catalog.resolve_category(filters.category.as_deref().unwrap_or(ALL_KEY));
    if let CategoryFilter::Unmatched(key) = &category {
        tracing::warn!(category = %key, "category does not match any service");
    }
    state.select_category(category);

    if filters.province.is_some() && state.category().service_id().is_none() {
        tracing::warn!("--province needs a concrete --category; ignoring it");
    }
    state.select_province(filters.province.clone());

    if filters.city.is_some() && state.province().is_none() {
        tracing::warn!("--city needs --province; ignoring it");
    }
    state.select_city(filters.city.clone());

    if let Some(query) = &filters.query {
        state.set_query(query.trim());
    }
    state.resolve_options(catalog);
    state
}

/// Shortens `text` to `width` characters, marking the cut with `...`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Lists every service with its location count.
///
/// # Errors
///
/// Returns an error if the services list cannot be fetched.
pub(crate) async fn run_services(client: &DirectoryClient) -> anyhow::Result<()> {
    let catalog = load_catalog(client).await;
    if catalog.services().is_empty() {
        anyhow::bail!("no services available from the directory API");
    }

    println!("{:<24}{:<10}{:<10}DESCRIPTION", "ID", "PINS", "COLOR");
    println!(
        "{:<24}{:<10}{:<10}All locations",
        ALL_KEY,
        catalog.category_count(&CategoryFilter::All),
        "",
    );
    for service in catalog.services() {
        let count = catalog.category_count(&CategoryFilter::Service(service.id.clone()));
        println!(
            "{:<24}{:<10}{:<10}{}",
            truncate(&service.id, 22),
            count,
            service.color.as_deref().unwrap_or("-"),
            service.display_text(),
        );
    }
    Ok(())
}

/// Prints one page of the filtered location list.
///
/// # Errors
///
/// Currently infallible; a failed fetch shows up as an empty list.
pub(crate) async fn run_locations(
    client: &DirectoryClient,
    config: &AppConfig,
    filters: &FilterArgs,
    page: usize,
) -> anyhow::Result<()> {
    let catalog = load_catalog(client).await;
    let mut state = apply_filters(&catalog, filters);
    let results = catalog.filter(&state.criteria());

    let pages = total_pages(results.len(), config.page_size);
    state.go_to_page(page, pages);
    if page != state.page() && !results.is_empty() {
        tracing::info!(requested = page, shown = state.page(), "page out of range");
    }
    let current = paginate(&results, config.page_size, state.page());

    println!("{}", category_heading(catalog.services(), state.category()));
    if let Some(label) = found_label(results.len(), state.query()) {
        println!("{label}");
    }
    println!();

    if current.items.is_empty() {
        println!("no locations found");
        return Ok(());
    }

    println!(
        "{:<10}{:<42}{:<20}{:<10}TYPE",
        "ID", "NAME", "CITY", "PROVINCE"
    );
    for location in current.items {
        println!(
            "{:<10}{:<42}{:<20}{:<10}{}",
            location.id,
            truncate(&location.name, NAME_WIDTH),
            location.city,
            location.province,
            location.type_label(),
        );
    }

    if current.shows_controls() {
        println!();
        println!("{}", current.label());
    }
    Ok(())
}

/// Resolves `category` to a concrete service or fails with a readable error.
fn require_service(catalog: &Catalog, category: &str) -> anyhow::Result<CategoryFilter> {
    let filter = catalog.resolve_category(category);
    if filter.service_id().is_none() {
        anyhow::bail!("'{category}' is not a known service; run `newcomer services` to list them");
    }
    Ok(filter)
}

/// Loads just the services when the option list comes from the backend.
async fn catalog_for_options(client: &DirectoryClient, remote: bool) -> anyhow::Result<Catalog> {
    if remote {
        let services = client
            .fetch_services()
            .await
            .context("failed to fetch services")?;
        Ok(Catalog::new(services, Vec::new()))
    } else {
        Ok(load_catalog(client).await)
    }
}

fn print_options(options: &[String], empty_message: &str) {
    if options.is_empty() {
        println!("{empty_message}");
    }
    for option in options {
        println!("{option}");
    }
}

/// Lists the provinces offered for `category`.
///
/// # Errors
///
/// Returns an error if `category` is not a known service, or if `remote` is
/// set and the services list cannot be fetched.
pub(crate) async fn run_provinces(
    client: &DirectoryClient,
    category: &str,
    remote: bool,
) -> anyhow::Result<()> {
    let catalog = catalog_for_options(client, remote).await?;
    let filter = require_service(&catalog, category)?;

    let mut state = FilterState::new();
    let request = state.select_category(filter);
    match request {
        Some(request) if remote => {
            refresh_options(client, &mut state, &request).await;
        }
        _ => state.resolve_options(&catalog),
    }

    print_options(state.province_options(), "no provinces for this category");
    Ok(())
}

/// Lists the cities offered for `category` within `province`.
///
/// # Errors
///
/// Same as [`run_provinces`].
pub(crate) async fn run_cities(
    client: &DirectoryClient,
    category: &str,
    province: &str,
    remote: bool,
) -> anyhow::Result<()> {
    let catalog = catalog_for_options(client, remote).await?;
    let filter = require_service(&catalog, category)?;

    let mut state = FilterState::new();
    state.select_category(filter);
    let request = state.select_province(Some(province.to_string()));
    match request {
        Some(request) if remote => {
            refresh_options(client, &mut state, &request).await;
        }
        _ => state.resolve_options(&catalog),
    }

    print_options(state.city_options(), "no cities for this category and province");
    Ok(())
}

fn print_location(location: &Location) {
    println!("{}", location.name);
    println!("Type: {}", location.type_label());
    if let Some(address) = &location.address {
        println!("Address: {address}");
    }
    println!("City: {}, {}", location.city, location.province);
    if let Some(phone) = &location.phone {
        println!("Phone: {phone}");
    }
    if let Some(hours) = &location.hours {
        println!("Hours: {hours}");
    }
    if let Some(url) = &location.url {
        println!("Website: {url}");
    }
    println!("Pin color: {}", location.pin_color());
    println!("Directions: {}", location.maps_url());
}

/// Shows the detail view for a single location.
///
/// # Errors
///
/// Returns an error if the id is unknown or the request fails.
pub(crate) async fn run_location(client: &DirectoryClient, id: &str) -> anyhow::Result<()> {
    match client.fetch_location(id).await {
        Ok(location) => {
            print_location(&location);
            Ok(())
        }
        Err(ClientError::NotFound { .. }) => anyhow::bail!("location '{id}' not found"),
        Err(e) => Err(e).with_context(|| format!("failed to fetch location '{id}'")),
    }
}

/// The region a map would zoom to for these locations, or the whole country
/// when nothing matches.
pub(crate) fn map_region(locations: &[&Location]) -> Region {
    fit_region(locations.iter().copied(), MAP_PADDING).unwrap_or(Region::CANADA)
}

/// Prints the fitted map viewport and the marker count footer.
///
/// # Errors
///
/// Currently infallible; a failed fetch shows up as an empty map.
pub(crate) async fn run_map(client: &DirectoryClient, filters: &FilterArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(client).await;
    let state = apply_filters(&catalog, filters);
    let results = catalog.filter(&state.criteria());
    let region = map_region(&results);

    println!(
        "center: {:.4}, {:.4}  span: {:.4} x {:.4}",
        region.latitude, region.longitude, region.latitude_delta, region.longitude_delta
    );
    println!("{}", showing_label(results.len()));
    Ok(())
}
