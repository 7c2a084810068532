use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    Account, AccountPatch, Category, CategoryPayload, LoginResponse, NewAccount, NewTransaction,
    Period, Transaction, TransactionPatch, UserProfile,
};
use crate::errors::ApiError;

use super::{ApiResult, TokenCell};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fallback message when an error body is absent or not JSON.
const UNKNOWN_ERROR: &str = "Erro desconhecido";
/// Fallback message when an error body parses but carries no message.
const REQUEST_ERROR: &str = "Erro na requisição";

/// Single choke point for every request the client sends.
///
/// Attaches the bearer token when one is present, always sends JSON, and
/// normalizes each response into an [`ApiResult`]. Requests are never
/// retried; failures surface immediately.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: TokenCell,
}

impl ApiClient {
    /// Builds a client with the default 30 second request timeout.
    pub fn new(base_url: Url, token: TokenCell) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    /// Builds a client with an explicit request timeout.
    pub fn with_timeout(
        base_url: Url,
        token: TokenCell,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(ApiClient {
            http,
            base_url,
            token,
        })
    }

    /// Handle to the cell requests read the bearer token from.
    pub fn token(&self) -> &TokenCell {
        &self.token
    }

    /// `POST /auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest {
            email,
            senha: password,
        };
        self.send_json(Method::POST, "/auth/login", &body).await
    }

    /// `POST /auth/register`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<UserProfile> {
        let body = RegisterRequest {
            nome: name,
            email,
            senha: password,
        };
        self.send_json(Method::POST, "/auth/register", &body).await
    }

    /// `GET /account`.
    pub async fn list_accounts(&self) -> ApiResult<Vec<Account>> {
        self.get("/account").await
    }

    /// `POST /account`.
    pub async fn create_account(&self, account: &NewAccount) -> ApiResult<Account> {
        self.send_json(Method::POST, "/account", account).await
    }

    /// `PUT /account/{id}`.
    pub async fn update_account(&self, id: i64, patch: &AccountPatch) -> ApiResult<Account> {
        self.send_json(Method::PUT, &format!("/account/{id}"), patch)
            .await
    }

    /// `DELETE /account/{id}`.
    pub async fn delete_account(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/account/{id}")).await
    }

    /// `GET /category`.
    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.get("/category").await
    }

    /// `POST /category`.
    pub async fn create_category(&self, name: &str) -> ApiResult<Category> {
        self.send_json(Method::POST, "/category", &CategoryPayload::new(name))
            .await
    }

    /// `PUT /category/{id}`.
    pub async fn update_category(&self, id: i64, name: &str) -> ApiResult<Category> {
        self.send_json(
            Method::PUT,
            &format!("/category/{id}"),
            &CategoryPayload::new(name),
        )
        .await
    }

    /// `DELETE /category/{id}`.
    pub async fn delete_category(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/category/{id}")).await
    }

    /// `GET /transaction`, optionally windowed by `filtro`.
    pub async fn list_transactions(&self, filter: Option<Period>) -> ApiResult<Vec<Transaction>> {
        self.get(&transaction_path(filter)).await
    }

    /// `POST /transaction`.
    pub async fn create_transaction(&self, transaction: &NewTransaction) -> ApiResult<Transaction> {
        self.send_json(Method::POST, "/transaction", transaction)
            .await
    }

    /// `PUT /transaction/{id}`.
    pub async fn update_transaction(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> ApiResult<Transaction> {
        self.send_json(Method::PUT, &format!("/transaction/{id}"), patch)
            .await
    }

    /// `DELETE /transaction/{id}`.
    pub async fn delete_transaction(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/transaction/{id}")).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        self.request(method, path, Some(body)).await
    }

    /// Issues one request and normalizes the outcome. Every failure comes
    /// back as an [`ApiError`]; transport specifics only reach the log.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%method, path, "api request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.token.get() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%method, path, error = %err, "transport failure");
                return Err(ApiError::connection(err.to_string()));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(%method, path, error = %err, "failed reading response body");
                return Err(ApiError::connection(err.to_string()));
            }
        };

        match decode_response(status, &body) {
            Ok(data) => Ok(data),
            Err(err) => {
                tracing::warn!(%method, path, status = status.as_u16(), error = %err, "request failed");
                Err(err)
            }
        }
    }

    /// Joins the base URL and `path` by concatenation, the same rule the
    /// web client applies, so a base with a path prefix keeps it.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|err| ApiError::connection(err.to_string()))
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    senha: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    nome: &'a str,
    email: &'a str,
    senha: &'a str,
}

fn transaction_path(filter: Option<Period>) -> String {
    match filter {
        Some(period) => format!("/transaction?filtro={period}"),
        None => "/transaction".to_string(),
    }
}

/// Maps one HTTP outcome onto the client contract: 204 yields no data,
/// other success statuses must carry a decodable body, and anything else
/// becomes an [`ApiError::Api`] with the server's message or a fallback.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> ApiResult<T> {
    if !status.is_success() {
        return Err(ApiError::api(status.as_u16(), error_message(body)));
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    match serde_json::from_slice(body) {
        Ok(data) => Ok(Some(data)),
        Err(err) => Err(ApiError::connection(format!(
            "undecodable success body: {err}"
        ))),
    }
}

/// Extracts the server's `message` from an error body. A body that is not
/// JSON reads as [`UNKNOWN_ERROR`]; JSON without a usable message reads as
/// [`REQUEST_ERROR`].
fn error_message(body: &[u8]) -> String {
    let Ok(parsed) = serde_json::from_slice::<serde_json::Value>(body) else {
        return UNKNOWN_ERROR.to_string();
    };
    match parsed.get("message").and_then(serde_json::Value::as_str) {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => REQUEST_ERROR.to_string(),
    }
}
