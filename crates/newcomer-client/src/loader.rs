//! Fail-soft glue between the API client and the in-memory engine.
//!
//! A failed fetch is logged and treated as an empty result so that screens
//! keep working on whatever data did arrive.

use newcomer_catalog::{Catalog, FilterState, OptionsRequest};
use newcomer_core::Session;

use crate::client::DirectoryClient;

/// Fetches services and locations concurrently into a fresh [`Catalog`].
///
/// Either list may come back empty if its request failed.
pub async fn load_catalog(client: &DirectoryClient) -> Catalog {
    let (services, locations) = tokio::join!(client.fetch_services(), client.fetch_locations());

    let services = services.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to fetch services; continuing without them");
        Vec::new()
    });
    let locations = locations.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to fetch locations; continuing without them");
        Vec::new()
    });

    tracing::info!(
        services = services.len(),
        locations = locations.len(),
        "catalog loaded"
    );
    Catalog::new(services, locations)
}

/// Fetches the options `request` asks for and hands them to `state`.
///
/// Returns `true` if the options were applied, `false` if the fetch failed or
/// `request` was already superseded when it was issued.
///
/// `state` stays mutably borrowed for the whole fetch, so the selection cannot
/// change while it is in flight. Callers that keep taking input during the
/// fetch should call [`DirectoryClient::fetch_options`] without holding the
/// state and hand the result to [`FilterState::apply_options`] afterwards;
/// that is where a stale response gets dropped.
pub async fn refresh_options(
    client: &DirectoryClient,
    state: &mut FilterState,
    request: &OptionsRequest,
) -> bool {
    match client.fetch_options(request).await {
        Ok(values) => state.apply_options(request, values),
        Err(e) => {
            tracing::warn!(error = %e, ?request, "failed to fetch filter options");
            false
        }
    }
}

/// Loads the signed-in user's saved locations into `session`.
///
/// Does nothing while signed out. An unavailable save list leaves the
/// session's list empty.
pub async fn load_saved_locations(client: &DirectoryClient, session: &mut Session) {
    if !session.is_signed_in() {
        return;
    }
    match client.fetch_saved_locations().await {
        Ok(saved) => session.set_saved(saved.into_iter().map(|s| s.location_id)),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch saved locations");
            session.set_saved(Vec::new());
        }
    }
}
