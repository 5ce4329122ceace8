//! Mock backend tests for the API client.
//!
//! These tests use wiremock to simulate the Smart Shamba backend and check
//! session handling, header attachment, 401 interception and error
//! normalization without network access.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shamba_core::error::FALLBACK_MESSAGE;
use shamba_core::{
    BaseUrl, ClientConfig, Credentials, Error, Host, MemoryTokenStore, Navigator, Registration,
    Role, SessionToken, TokenStore,
};
use shamba_file::FileTokenStore;
use shamba_http::{ApiClient, ApiRequest, ChatMessage, ListingQuery, NewListing};

#[derive(Default)]
struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visits.lock().unwrap().push(url.to_string());
    }
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(BaseUrl::new(server.uri()).unwrap())
}

/// Client over a shared in-memory store with a recording navigator.
fn client_for(server: &MockServer) -> (ApiClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let host = Host::headless()
        .with_store(Arc::new(MemoryTokenStore::new()))
        .with_navigator(navigator.clone());
    let client = ApiClient::new(config_for(server), host).unwrap();
    (client, navigator)
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "phone": "+254700000000",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "session_token": token,
            "data": {
                "id": 7,
                "name": "Wanjiru",
                "phone": "+254700000000",
                "user_type": "farmer",
                "is_admin": false,
                "county": "Nakuru"
            }
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn test_login_stores_session_and_authenticates_next_call() {
    let server = MockServer::start().await;
    mount_login(&server, "abc123").await;

    Mock::given(method("GET"))
        .and(path("/api/farmer/dashboard"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"farms": 2, "ndvi": 0.61}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let principal = client
        .login(&Credentials::new("+254700000000", "secret"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(client.session(), Some(SessionToken::new("abc123")));
    assert_eq!(principal.id, "7");
    assert_eq!(principal.user_type, Role::Farmer);
    assert_eq!(client.principal(), Some(principal));

    let dashboard = client.dashboard(Role::Farmer).await.unwrap();
    assert_eq!(dashboard["farms"], 2);
}

#[tokio::test]
async fn test_session_survives_fresh_client_on_same_store() {
    let server = MockServer::start().await;
    mount_login(&server, "abc123").await;

    let dir = TempDir::new().unwrap();
    let host = Host::headless().with_store(Arc::new(FileTokenStore::new(dir.path())));

    let first = ApiClient::new(config_for(&server), host.clone()).unwrap();
    first
        .login(&Credentials::new("+254700000000", "secret"))
        .await
        .unwrap();
    assert_eq!(first.session(), Some(SessionToken::new("abc123")));

    let fresh = ApiClient::new(config_for(&server), host).unwrap();
    assert_eq!(fresh.session(), Some(SessionToken::new("abc123")));
    // The profile is a per-instance display cache, not persisted.
    assert_eq!(fresh.principal(), None);
}

#[tokio::test]
async fn test_clear_session_is_idempotent() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::new());
    let host = Host::headless().with_store(store.clone());
    let client = ApiClient::new(config_for(&server), host).unwrap();

    client.set_session(SessionToken::new("abc123"));
    client.clear_session();
    assert_eq!(client.session(), None);
    client.clear_session();
    assert_eq!(client.session(), None);
    assert_eq!(store.load(shamba_core::SESSION_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_login_without_token_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {}})),
        )
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client
        .login(&Credentials::new("+254700000000", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Protocol(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_register_starts_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "name": "Kiprop",
            "phone": "+254722000000",
            "password": "pw",
            "user_type": "buyer",
            "county": "Uasin Gishu"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "session_token": "new-buyer-token",
            "data": {"id": "b-9", "name": "Kiprop", "user_type": "buyer"}
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let registration = Registration::new("Kiprop", "+254722000000", "pw", Role::Buyer)
        .with_county("Uasin Gishu");
    let principal = client.register(&registration).await.unwrap().unwrap();

    assert_eq!(principal.user_type, Role::Buyer);
    assert_eq!(client.session(), Some(SessionToken::new("new-buyer-token")));
}

#[tokio::test]
async fn test_logout_clears_even_when_backend_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, navigator) = client_for(&server);
    client.set_session(SessionToken::new("abc123"));

    let err = client.logout().await.unwrap_err();
    assert_eq!(err.message(), "boom");
    assert_eq!(client.session(), None);
    assert!(navigator.visits().is_empty());

    // Already signed out: no second backend call.
    client.logout().await.unwrap();
}

// ============================================================================
// Header attachment
// ============================================================================

#[tokio::test]
async fn test_no_session_omits_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/marketplace/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 1, "crop": "maize", "quantity": 40.0, "unit": "bag", "price_per_unit": 3500.0}]
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let listings = client.listings(&ListingQuery::default()).await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].id, "1");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_listing_filters_and_creation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/marketplace/listings"))
        .and(query_param("crop", "beans"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/marketplace/listings"))
        .and(header("authorization", "Bearer seller"))
        .and(body_json(json!({
            "crop": "beans",
            "quantity": 10.0,
            "unit": "kg",
            "price_per_unit": 120.0,
            "county": "Meru"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"id": "l-1", "crop": "beans", "quantity": 10.0, "unit": "kg", "price_per_unit": 120.0, "county": "Meru"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let query = ListingQuery {
        crop: Some("beans".to_string()),
        county: None,
        limit: Some(5),
    };
    assert!(client.listings(&query).await.unwrap().is_empty());

    client.set_session(SessionToken::new("seller"));
    let created = client
        .create_listing(&NewListing {
            crop: "beans".to_string(),
            quantity: 10.0,
            unit: "kg".to_string(),
            price_per_unit: 120.0,
            county: Some("Meru".to_string()),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, "l-1");
}

// ============================================================================
// 401 interception
// ============================================================================

#[tokio::test]
async fn test_forced_logout_on_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Session expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, navigator) = client_for(&server);
    client.set_session(SessionToken::new("abc123"));

    let err = client.alerts(None).await.unwrap_err();

    assert!(err.is_auth_rejected());
    assert_eq!(err.message(), "Session expired");
    assert_eq!(client.session(), None);
    assert_eq!(navigator.visits(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_401_on_chat_keeps_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Session expired"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let (client, navigator) = client_for(&server);
    client.set_session(SessionToken::new("abc123"));

    let err = client
        .send_chat(&ChatMessage::new("When should I plant maize?"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Session expired");

    let err = client.chat_history().await.unwrap_err();
    assert_eq!(err.message(), FALLBACK_MESSAGE);

    assert_eq!(client.session(), Some(SessionToken::new("abc123")));
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn test_chat_works_anonymously() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "Habari", "language": "sw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"response": "Nzuri! Nikusaidie vipi?", "conversation_id": "c-1"}
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let reply = client
        .send_chat(&ChatMessage::new("Habari").in_language("sw"))
        .await
        .unwrap();

    assert_eq!(reply.reply, "Nzuri! Nikusaidie vipi?");
    assert_eq!(reply.conversation_id.as_deref(), Some("c-1"));
}

#[tokio::test]
async fn test_custom_login_url_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::default());
    let host = Host::headless().with_navigator(navigator.clone());
    let config = config_for(&server).with_login_url("https://app.example.org/login");
    let client = ApiClient::new(config, host).unwrap();
    client.set_session(SessionToken::new("abc123"));

    assert!(client.current_user().await.is_err());
    assert_eq!(navigator.visits(), vec!["https://app.example.org/login".to_string()]);
}

// ============================================================================
// Error normalization
// ============================================================================

#[tokio::test]
async fn test_error_message_priority() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/both"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Invalid phone number",
            "error": "VALIDATION_ERROR"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/error-only"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Database unavailable"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/neither"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/envelope-failure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Farm not found"
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);

    let err = client.request(ApiRequest::get("/both")).await.unwrap_err();
    assert_eq!(err.message(), "Invalid phone number");
    assert_eq!(err.status(), Some(400));

    let err = client.request(ApiRequest::get("/error-only")).await.unwrap_err();
    assert_eq!(err.message(), "Database unavailable");

    let err = client.request(ApiRequest::get("/neither")).await.unwrap_err();
    assert_eq!(err.message(), FALLBACK_MESSAGE);

    let err = client
        .request(ApiRequest::get("/envelope-failure"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Farm not found");
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "Try later"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.alerts(Some(10)).await.unwrap_err();
    assert_eq!(err.message(), "Try later");
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_millis(200));
    let client = ApiClient::new(config, Host::headless()).unwrap();

    let err = client.alerts(None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.message().contains("timed out"), "{}", err.message());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Reserve a port, then free it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ClientConfig::new(BaseUrl::new(format!("http://127.0.0.1:{}", port)).unwrap());
    let client = ApiClient::new(config, Host::headless()).unwrap();
    client.set_session(SessionToken::new("abc123"));

    let err = client
        .request(ApiRequest::get("/api/auth/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(!err.message().is_empty());
    assert!(client.is_authenticated());
}
