//! RemoteBackend against a mocked hosted backend

use menu_client::{AuthEvent, AuthService, ClientConfig, ClientError, Credentials, MenuStore, RemoteBackend, Session};
use serde_json::json;
use shared::models::{CategoryCreate, MenuItemCreate};
use std::str::FromStr;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "anon-key";

fn backend(server: &MockServer) -> RemoteBackend {
    ClientConfig::new(server.uri(), ANON_KEY)
        .with_timeout(5)
        .build_remote()
        .unwrap()
}

fn session() -> Session {
    serde_json::from_value(json!({
        "access_token": "user-jwt",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 4102444800i64,
        "refresh_token": "r1",
        "user": { "id": "u1", "email": "admin@restoran.com" }
    }))
    .unwrap()
}

#[tokio::test]
async fn sign_in_posts_password_grant_and_emits_signed_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON_KEY))
        .and(body_json(json!({ "email": "admin@restoran.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 4102444800i64,
            "refresh_token": "r1",
            "user": { "id": "u1", "email": "admin@restoran.com", "aud": "authenticated" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let mut events = backend.subscribe();
    let session = backend
        .sign_in_with_password(&Credentials::new("admin@restoran.com", "secret"))
        .await
        .unwrap();

    assert_eq!(session.access_token, "user-jwt");
    assert_eq!(session.user.id, "u1");
    assert_eq!(events.recv().await, Some(AuthEvent::SignedIn(session.user.clone())));
}

#[tokio::test]
async fn bad_password_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "error_code": "invalid_credentials",
            "msg": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let err = backend(&server)
        .sign_in_with_password(&Credentials::new("admin@restoran.com", "wrong"))
        .await
        .unwrap_err();

    match err {
        ClientError::Unauthorized(msg) => assert_eq!(msg, "Invalid login credentials"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn get_user_returns_none_for_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "msg": "invalid JWT: token is expired"
        })))
        .mount(&server)
        .await;

    assert_eq!(backend(&server).get_user(&session()).await.unwrap(), None);
}

#[tokio::test]
async fn get_user_reads_current_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "admin@restoran.com",
            "role": "authenticated"
        })))
        .mount(&server)
        .await;

    let user = backend(&server).get_user(&session()).await.unwrap().unwrap();
    assert_eq!(user.email.as_deref(), Some("admin@restoran.com"));
}

#[tokio::test]
async fn sign_out_tolerates_stale_token_and_emits_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let mut events = backend.subscribe();
    backend.sign_out(&session()).await.unwrap();
    assert_eq!(events.recv().await, Some(AuthEvent::SignedOut(session().user)));
}

#[tokio::test]
async fn categories_are_read_in_display_order_with_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(query_param("select", "*"))
        .and(query_param("order", "display_order.asc"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Soups", "display_order": 0 },
            { "id": 2, "name": "Mains", "display_order": 1 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let categories = backend(&server).list_categories(&session()).await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, "1");
    assert_eq!(categories[1].name, "Mains");
}

#[tokio::test]
async fn category_insert_sends_only_the_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(json!({ "name": "Desserts" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    backend(&server)
        .insert_category(&session(), &CategoryCreate::named("Desserts"))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_filters_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/menu_items"))
        .and(query_param("id", "eq.abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    backend(&server).delete_menu_item(&session(), "abc").await.unwrap();
}

#[tokio::test]
async fn foreign_key_violation_keeps_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23503",
            "message": "update or delete on table \"categories\" violates foreign key constraint",
            "details": "Key is still referenced from table \"menu_items\".",
            "hint": null
        })))
        .mount(&server)
        .await;

    let err = backend(&server).delete_category(&session(), "c1").await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
    assert_eq!(
        err.to_string(),
        "update or delete on table \"categories\" violates foreign key constraint"
    );
}

#[tokio::test]
async fn availability_patch_sends_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/menu_items"))
        .and(query_param("id", "eq.i1"))
        .and(body_json(json!({ "is_available": false })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    backend(&server)
        .set_availability(&session(), "i1", false)
        .await
        .unwrap();
}

#[tokio::test]
async fn menu_item_insert_sends_null_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/menu_items"))
        .and(body_json(json!({
            "category_id": "c1",
            "name": "Baklava",
            "description": null,
            "price": 45.5,
            "is_available": true
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let item = MenuItemCreate {
        category_id: "c1".into(),
        name: "Baklava".into(),
        description: None,
        price: rust_decimal::Decimal::from_str("45.5").unwrap(),
        is_available: true,
    };
    backend(&server).insert_menu_item(&session(), &item).await.unwrap();
}

#[tokio::test]
async fn admin_items_are_joined_and_ordered_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/menu_items"))
        .and(query_param(
            "select",
            "id,name,description,price,is_available,category_id,categories(name)",
        ))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "i1", "name": "Lentil", "description": null, "price": 12.5,
                "is_available": true, "category_id": "c1", "categories": { "name": "Soups" }
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = backend(&server).list_menu_items(&session()).await.unwrap();
    assert_eq!(rows[0].category_name(), Some("Soups"));
}

#[tokio::test]
async fn public_menu_is_one_anonymous_joined_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(query_param(
            "select",
            "id,name,menu_items(id,name,description,price,is_available)",
        ))
        .and(query_param("order", "display_order.asc"))
        .and(query_param("menu_items.order", "name.asc"))
        .and(header("authorization", format!("Bearer {ANON_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "c1", "name": "Soups",
                "menu_items": [
                    { "id": "i1", "name": "Lentil", "description": "Red lentils", "price": 12.5, "is_available": true }
                ]
            },
            { "id": "c2", "name": "Empty", "menu_items": [] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let menu = backend(&server).fetch_public_menu().await.unwrap();
    assert_eq!(menu.len(), 2);
    assert_eq!(menu[0].menu_items[0].description.as_deref(), Some("Red lentils"));
}

#[tokio::test]
async fn server_errors_carry_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = backend(&server).fetch_public_menu().await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
