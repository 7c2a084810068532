use axum::Router;
use bankapp_core::api::{ApiClient, TokenCell};
use reqwest::Url;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    Url::parse(&format!("http://{addr}")).expect("stub base url")
}

/// API client pointed at `base_url`, plus the token cell it reads.
pub fn client_for(base_url: Url) -> (ApiClient, TokenCell) {
    let token = TokenCell::new();
    let client = ApiClient::new(base_url, token.clone()).expect("build client");
    (client, token)
}
