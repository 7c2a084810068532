mod common;

use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use reqwest::Url;
use serde_json::{json, Value};
use tempfile::TempDir;

use bankapp_core::api::TokenCell;
use bankapp_core::preferences::{PreferenceManager, Theme};
use bankapp_core::session::SessionManager;
use bankapp_core::storage::LocalStore;

use common::{client_for, spawn_server};

fn manager_over(dir: &Path, base_url: Url) -> (SessionManager, Arc<LocalStore>, TokenCell) {
    let store = Arc::new(LocalStore::open(dir).expect("open store"));
    let (client, token) = client_for(base_url);
    let manager = SessionManager::new(Arc::new(client), Arc::clone(&store));
    (manager, store, token)
}

fn login_stub() -> Router {
    Router::new().route(
        "/auth/login",
        post(|| async { Json(json!({"token": "tok-login"})) }),
    )
}

/// Base URL for flows that never reach the network.
fn offline_url() -> Url {
    Url::parse("http://localhost:8090").expect("offline url")
}

#[tokio::test]
async fn login_persists_session_token_and_identity() {
    let dir = TempDir::new().expect("temp dir");
    let base_url = spawn_server(login_stub()).await;
    let (manager, store, token) = manager_over(dir.path(), base_url);

    manager
        .login("maria@example.com", "segredo")
        .await
        .expect("login succeeds");

    let session = manager.current().expect("authenticated session");
    assert_eq!(session.token, "tok-login");
    assert_eq!(session.profile.id, 1);
    assert_eq!(session.profile.display_name, "maria");
    assert_eq!(session.profile.email, "maria@example.com");
    assert_eq!(token.get(), Some("tok-login".to_string()));

    assert_eq!(store.get("token"), Some("tok-login".to_string()));
    let identity: Value =
        serde_json::from_str(&store.get("user").expect("persisted identity")).expect("valid json");
    assert_eq!(identity["nome"], "maria");
    assert_eq!(identity["id"], 1);
}

#[tokio::test]
async fn failed_login_leaves_no_trace() {
    let router = Router::new().route(
        "/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Credenciais inválidas"})),
            )
        }),
    );
    let dir = TempDir::new().expect("temp dir");
    let base_url = spawn_server(router).await;
    let (manager, store, token) = manager_over(dir.path(), base_url);

    let err = manager
        .login("maria@example.com", "errada1")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Credenciais inválidas");
    assert!(!manager.is_authenticated());
    assert_eq!(token.get(), None);
    assert_eq!(store.get("token"), None);
}

#[tokio::test]
async fn success_without_usable_token_is_rejected() {
    let router = Router::new().route(
        "/auth/login",
        post(|Json(body): Json<Value>| async move {
            if body["email"] == "empty@example.com" {
                Json(json!({"token": ""}))
            } else {
                Json(json!({}))
            }
        }),
    );
    let dir = TempDir::new().expect("temp dir");
    let base_url = spawn_server(router).await;
    let (manager, store, _token) = manager_over(dir.path(), base_url);

    let err = manager
        .login("empty@example.com", "segredo")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Erro ao fazer login");

    let err = manager
        .login("absent@example.com", "segredo")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Erro ao fazer login");

    assert!(!manager.is_authenticated());
    assert_eq!(store.get("token"), None);
}

#[tokio::test]
async fn register_returns_profile_without_authenticating() {
    let router = Router::new().route(
        "/auth/register",
        post(|| async {
            (
                StatusCode::CREATED,
                Json(json!({"id": 5, "nome": "Maria", "email": "maria@example.com"})),
            )
        }),
    );
    let dir = TempDir::new().expect("temp dir");
    let base_url = spawn_server(router).await;
    let (manager, store, token) = manager_over(dir.path(), base_url);

    let profile = manager
        .register("Maria", "maria@example.com", "segredo")
        .await
        .expect("register succeeds");
    assert_eq!(profile.id, 5);
    assert_eq!(profile.display_name, "Maria");

    assert!(!manager.is_authenticated());
    assert_eq!(token.get(), None);
    assert_eq!(store.get("token"), None);
}

#[tokio::test]
async fn register_without_body_is_incomplete() {
    let router = Router::new().route(
        "/auth/register",
        post(|| async { StatusCode::NO_CONTENT }),
    );
    let dir = TempDir::new().expect("temp dir");
    let base_url = spawn_server(router).await;
    let (manager, _store, _token) = manager_over(dir.path(), base_url);

    let err = manager
        .register("Maria", "maria@example.com", "segredo")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Erro ao criar conta");
}

#[tokio::test]
async fn session_survives_restart_until_logout() {
    let dir = TempDir::new().expect("temp dir");
    let base_url = spawn_server(login_stub()).await;

    let (manager, _store, _token) = manager_over(dir.path(), base_url);
    manager
        .login("ana@example.com", "segredo")
        .await
        .expect("login succeeds");
    drop(manager);

    let (restarted, _store, token) = manager_over(dir.path(), offline_url());
    restarted.restore();
    let session = restarted.current().expect("restored session");
    assert_eq!(session.profile.display_name, "ana");
    assert_eq!(token.get(), Some("tok-login".to_string()));

    restarted.logout().expect("logout succeeds");
    drop(restarted);

    let (after_logout, _store, token) = manager_over(dir.path(), offline_url());
    after_logout.restore();
    assert!(!after_logout.is_authenticated());
    assert_eq!(token.get(), None);
}

#[tokio::test]
async fn logout_keeps_display_preferences() {
    let dir = TempDir::new().expect("temp dir");
    let base_url = spawn_server(login_stub()).await;
    let (manager, store, _token) = manager_over(dir.path(), base_url);

    let prefs = PreferenceManager::new(Arc::clone(&store));
    prefs.toggle_theme().expect("pick dark");
    prefs.set_accent_color("#10B981").expect("pick accent");

    manager
        .login("ana@example.com", "segredo")
        .await
        .expect("login succeeds");
    manager.logout().expect("logout succeeds");

    assert_eq!(store.get("theme"), Some("dark".to_string()));
    assert_eq!(store.get("accentColor"), Some("#10B981".to_string()));

    let reloaded = PreferenceManager::new(store);
    reloaded.restore();
    assert_eq!(reloaded.theme(), Theme::Dark);
    assert_eq!(reloaded.accent_color(), "#10B981");
}
