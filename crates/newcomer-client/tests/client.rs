//! Integration tests for `DirectoryClient` using wiremock HTTP mocks.

use newcomer_catalog::{CategoryFilter, FilterState};
use newcomer_client::{
    load_catalog, load_saved_locations, refresh_options, ClientError, DirectoryClient,
};
use newcomer_core::{SaveAction, Session, User};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DirectoryClient {
    DirectoryClient::with_base_url(base_url, 5, "newcomer-test/0.1", 0, 0)
        .expect("client construction should not fail")
}

fn services_json() -> serde_json::Value {
    json!({
        "services": [
            { "id": "gov", "name": "Government Agency", "type": "Government Agency", "color": "#DC2626" },
            { "id": "bank", "name": "Bank", "dewscription": "Banks & Money Transfer" }
        ]
    })
}

fn locations_json() -> serde_json::Value {
    json!({
        "locations": [
            {
                "id": "1",
                "name": "Service Canada Centre",
                "city": "Toronto",
                "province": "ON",
                "address": "25 St Clair Ave E",
                "serviceId": "gov",
                "lat": 43.688,
                "lng": -79.393
            },
            {
                "id": "2",
                "name": "RBC Royal Bank",
                "city": "Calgary",
                "province": "AB",
                "serviceId": "bank",
                "lat": 51.045,
                "lng": -114.063,
                "service": { "id": "bank", "name": "Bank" }
            }
        ]
    })
}

#[tokio::test]
async fn fetch_services_parses_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(services_json()))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/api", server.uri()));
    let services = client.fetch_services().await.expect("should parse services");

    assert_eq!(services.len(), 2);
    assert_eq!(services[0].service_type.as_deref(), Some("Government Agency"));
    assert_eq!(services[1].display_text(), "Banks & Money Transfer");
}

#[tokio::test]
async fn missing_envelope_key_reads_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let locations = client.fetch_locations().await.expect("should parse");
    assert!(locations.is_empty());
}

#[tokio::test]
async fn fetch_provinces_and_cities_send_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/provinces"))
        .and(query_param("serviceId", "gov"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["ON", "AB"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations/cities"))
        .and(query_param("serviceId", "gov"))
        .and(query_param("province", "ON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Toronto", "Ottawa"])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(client.fetch_provinces("gov").await.unwrap(), ["ON", "AB"]);
    assert_eq!(
        client.fetch_cities("gov", "ON").await.unwrap(),
        ["Toronto", "Ottawa"]
    );
}

#[tokio::test]
async fn fetch_location_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_location("missing").await;
    assert!(matches!(result, Err(ClientError::NotFound { .. })));
}

#[tokio::test]
async fn fetch_location_returns_detail_with_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "name": "Service Canada Centre",
            "city": "Toronto",
            "province": "ON",
            "address": "25 St Clair Ave E",
            "phone": "1-800-622-6232",
            "hours": "Mon-Fri 8:30-16:00",
            "url": "https://www.canada.ca",
            "serviceId": "gov",
            "lat": 43.688,
            "lng": -79.393,
            "service": { "id": "gov", "name": "Government Agency", "type": "Government Agency" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let location = client.fetch_location("1").await.expect("should parse detail");
    assert_eq!(location.hours.as_deref(), Some("Mon-Fri 8:30-16:00"));
    assert_eq!(location.type_label(), "Government Agency");
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_services().await;
    assert!(matches!(result, Err(ClientError::Deserialize { .. })));
}

#[tokio::test]
async fn server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(services_json()))
        .mount(&server)
        .await;

    let client = DirectoryClient::with_base_url(&server.uri(), 5, "newcomer-test/0.1", 2, 0)
        .expect("client construction should not fail");
    let services = client.fetch_services().await.expect("should succeed on retry");
    assert_eq!(services.len(), 2);
}

#[tokio::test]
async fn load_catalog_keeps_services_when_locations_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(services_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let catalog = load_catalog(&client).await;
    assert_eq!(catalog.services().len(), 2);
    assert!(catalog.locations().is_empty());
    assert_eq!(catalog.category_count(&CategoryFilter::All), 0);
}

#[tokio::test]
async fn load_catalog_fills_both_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(services_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(locations_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let catalog = load_catalog(&client).await;
    let bank = catalog.resolve_category("Bank");
    assert_eq!(bank, CategoryFilter::Service("bank".to_owned()));
    assert_eq!(catalog.category_count(&bank), 1);
}

#[tokio::test]
async fn refresh_options_drops_superseded_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Toronto"])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut state = FilterState::new();
    state.select_category(CategoryFilter::Service("gov".to_owned()));
    let stale = state
        .select_province(Some("ON".to_owned()))
        .expect("province selection issues a city request");
    state.select_province(Some("AB".to_owned()));

    assert!(!refresh_options(&client, &mut state, &stale).await);
    assert!(state.city_options().is_empty());
}

#[tokio::test]
async fn save_and_unsave_use_post_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/locations/save"))
        .and(body_json(json!({ "locationId": "1" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/locations/save"))
        .and(body_json(json!({ "locationId": "1" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client.save_location("1", SaveAction::Save).await.unwrap();
    client.save_location("1", SaveAction::Unsave).await.unwrap();
}

#[tokio::test]
async fn saved_locations_tolerate_unavailable_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/save"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut session = Session::new();
    session.sign_in(User {
        id: "u-1".to_owned(),
        name: None,
        email: None,
    });
    load_saved_locations(&client, &mut session).await;
    assert!(session.saved().is_empty());
}

#[tokio::test]
async fn saved_locations_load_into_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/save"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "locationId": "1" }, { "locationId": "2" }])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut session = Session::new();
    session.sign_in(User {
        id: "u-1".to_owned(),
        name: Some("Amara".to_owned()),
        email: None,
    });
    load_saved_locations(&client, &mut session).await;
    assert!(session.is_saved("2"));
    assert_eq!(session.toggle_action("2").unwrap(), SaveAction::Unsave);
}

#[tokio::test]
async fn malformed_location_is_skipped_without_dropping_the_rest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(services_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": [
                {
                    "id": "1",
                    "name": "Service Canada Centre",
                    "city": "Toronto",
                    "province": "ON",
                    "serviceId": "gov",
                    "lat": 43.688,
                    "lng": -79.393
                },
                {
                    "id": "2",
                    "name": "Pop-up Clinic",
                    "city": "Halifax",
                    "province": "NS",
                    "serviceId": "gov",
                    "lat": null,
                    "lng": null
                },
                {
                    "id": "3",
                    "name": "Partial Bank",
                    "province": "AB",
                    "serviceId": "bank",
                    "lat": 51.0,
                    "lng": -114.0,
                    "service": { "id": "bank" }
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let catalog = load_catalog(&client).await;
    let ids: Vec<&str> = catalog.locations().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["1"]);
    assert_eq!(catalog.services().len(), 2);
}

#[tokio::test]
async fn malformed_service_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "services": [
                { "id": "gov", "name": "Government Agency" },
                { "id": "broken" },
                "not an object"
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let services = client.fetch_services().await.expect("envelope should parse");
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id, "gov");
}

#[tokio::test]
async fn save_is_sent_once_even_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/locations/save"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = DirectoryClient::with_base_url(&server.uri(), 5, "newcomer-test/0.1", 3, 0)
        .expect("client construction should not fail");
    let result = client.save_location("1", SaveAction::Save).await;
    assert!(matches!(
        result,
        Err(ClientError::UnexpectedStatus { status: 503, .. })
    ));
}
