use std::sync::Arc;

use gala_client::application::models::event::{NewEvent, RsvpStatus};
use gala_client::application::services::auth_service::{AuthService, AuthServiceImpl};
use gala_client::application::services::event_service::{EventService, EventServiceImpl};
use gala_client::config::Config;
use gala_client::session::credentials::CredentialPair;
use gala_client::storage::credential_store::{CredentialStore, MemoryCredentialStore};
use gala_client::transport::api_client::ApiClient;
use gala_client::utils::logger::setup_logger;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;

fn create_client(url: &str, store: Arc<dyn CredentialStore>) -> Arc<ApiClient> {
    let config = Arc::new(Config::with_base_url(url));
    Arc::new(ApiClient::new(config, store, None).unwrap())
}

#[tokio::test]
async fn test_login_installs_credentials_and_me_uses_them() {
    setup_logger();
    let mut server = Server::new_async().await;

    let login = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "dana@example.com",
            "password": "hunter2"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "user": {"id": "u-1", "name": "Dana", "email": "dana@example.com"},
                "accessCredential": "access-1",
                "refreshCredential": "refresh-1"
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    let me = server
        .mock("GET", "/auth/me")
        .match_header("authorization", "Bearer access-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "u-1", "name": "Dana", "email": "dana@example.com"}"#)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = create_client(&server.url(), Arc::clone(&store) as Arc<dyn CredentialStore>);
    let auth = AuthServiceImpl::new(Arc::clone(&client));

    let user = auth.login("dana@example.com", "hunter2").await.unwrap();
    assert_eq!(user.name, "Dana");
    assert_eq!(
        store.load().unwrap(),
        Some(CredentialPair::new("access-1", "refresh-1"))
    );

    let profile = auth.me().await.unwrap();
    assert_eq!(profile, user);

    login.assert_async().await;
    me.assert_async().await;
}

#[tokio::test]
async fn test_register_signs_the_new_user_in() {
    setup_logger();
    let mut server = Server::new_async().await;

    let register = server
        .mock("POST", "/auth/register")
        .match_body(Matcher::Json(json!({
            "name": "Sam",
            "email": "sam@example.com",
            "password": "hunter2"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "user": {"id": "u-2", "name": "Sam", "email": "sam@example.com"},
                "accessCredential": "access-2",
                "refreshCredential": "refresh-2"
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = create_client(&server.url(), Arc::clone(&store) as Arc<dyn CredentialStore>);
    let auth = AuthServiceImpl::new(client);

    let user = auth.register("Sam", "sam@example.com", "hunter2").await.unwrap();
    assert_eq!(user.id, "u-2");
    assert_eq!(
        store.load().unwrap(),
        Some(CredentialPair::new("access-2", "refresh-2"))
    );
    register.assert_async().await;
}

#[tokio::test]
async fn test_logout_clears_stored_credentials() {
    setup_logger();
    let server = Server::new_async().await;

    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        "access-1",
        "refresh-1",
    )));
    let client = create_client(&server.url(), Arc::clone(&store) as Arc<dyn CredentialStore>);
    let auth = AuthServiceImpl::new(client);

    auth.logout().await.unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_event_service_typed_round_trips() {
    setup_logger();
    let mut server = Server::new_async().await;

    let list = server
        .mock("GET", "/events")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"ev-1","name":"Launch party","date":"2026-09-12","venue":"Rooftop"}]"#,
        )
        .create_async()
        .await;

    let create = server
        .mock("POST", "/events")
        .match_body(Matcher::Json(json!({
            "name": "Retreat",
            "date": "2026-10-03",
            "venue": null
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"ev-2","name":"Retreat","date":"2026-10-03","venue":null}"#)
        .create_async()
        .await;

    let guests = server
        .mock("GET", "/events/ev-1/guests")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"g-1","name":"Sam","email":"sam@example.com","rsvpStatus":"MAYBE"}]"#,
        )
        .create_async()
        .await;

    let budget = server
        .mock("GET", "/events/ev-1/budget-summary")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"totalBudget":5000.0,"spent":1200.0,"remaining":3800.0}"#)
        .create_async()
        .await;

    let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::with_pair(
        CredentialPair::new("access-1", "refresh-1"),
    ));
    let client = create_client(&server.url(), store);
    let events = EventServiceImpl::new(client);

    let listed = events.list_events().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Launch party");

    let created = events
        .create_event(&NewEvent {
            name: "Retreat".to_string(),
            date: "2026-10-03".to_string(),
            venue: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, "ev-2");

    let guest_list = events.list_guests("ev-1").await.unwrap();
    assert_eq!(guest_list[0].rsvp_status, RsvpStatus::Maybe);

    let summary = events.budget_summary("ev-1").await.unwrap();
    assert_eq!(summary.remaining, 3800.0);

    list.assert_async().await;
    create.assert_async().await;
    guests.assert_async().await;
    budget.assert_async().await;
}
