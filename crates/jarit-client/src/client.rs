//! HTTP client for the JarIt API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{extract_api_message, transport_message, JaritError, Result};
use crate::session::SessionStore;
use crate::types::*;

const CONNECT_TIMEOUT_SECS: u64 = 8;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// JarIt API client.
///
/// Every operation reads the session token at call time, attaches it as a
/// Bearer header when present, and normalizes failures into the session
/// store's error slot before returning them to the caller. A 401 from any
/// endpoint clears the token and forces the store into a logged-out state.
#[derive(Clone)]
pub struct JaritClient {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
}

impl JaritClient {
    /// Create a client configured from the environment.
    pub fn new(session: Arc<SessionStore>) -> Result<Self> {
        Self::with_config(ClientConfig::from_env(), session)
    }

    /// Create a client with an explicit configuration.
    pub fn with_config(config: ClientConfig, session: Arc<SessionStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(JaritError::Http)?;
        Ok(Self {
            base_url: config.base_url_str().to_string(),
            http,
            session,
        })
    }

    /// Session store this client reads the token from and reports errors to.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Shared request path for every operation except `login`.
    ///
    /// Attaches the current token, sends the request, and interprets the
    /// status. Any failure is written to the session error slot before it is
    /// returned.
    async fn execute<F>(&self, build: F) -> Result<reqwest::Response>
    where
        F: FnOnce(&Client) -> reqwest::RequestBuilder,
    {
        use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};

        let mut request = match build(&self.http).build() {
            Ok(request) => request,
            Err(err) => {
                self.session.set_error(Some(transport_message(&err)));
                return Err(err.into());
            }
        };
        let headers = request.headers_mut();
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("session token is not a valid header value; sending anonymously"),
            }
        }
        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                self.session.set_error(Some(transport_message(&err)));
                return Err(err.into());
            }
        };
        self.check_response(response).await
    }

    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("backend returned 401; clearing session token");
            self.session.set_token(None);
            let err = JaritError::Unauthorized;
            self.session.set_error(Some(err.to_string()));
            return Err(err);
        }
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default();
            let body = response.text().await.unwrap_or_default();
            let message = extract_api_message(&body, status_text);
            debug!(status = status.as_u16(), %message, "request failed");
            self.session.set_error(Some(message.clone()));
            return Err(JaritError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Parse a success body; a malformed body still lands in the error slot.
    async fn json_body<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        match response.json().await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.session.set_error(Some(transport_message(&err)));
                Err(err.into())
            }
        }
    }

    // ---------- Auth ----------

    /// Register a new account. No token is returned or stored.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<RegisterResponse> {
        let url = self.url("auth/register");
        let request = RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.execute(|http| http.post(&url).json(&request)).await?;
        self.json_body(response).await
    }

    /// Login with username and password.
    ///
    /// The backend requires a form-encoded body here, so this bypasses the
    /// shared JSON request path: no Bearer header, no 401 side effects, and
    /// any non-success status collapses to a fixed credentials message so
    /// backend detail never leaks. The caller decides whether to feed the
    /// returned token into the session store.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = self.url("auth/login");
        let form = [("username", username), ("password", password)];
        let response = match self.http.post(&url).form(&form).send().await {
            Ok(response) => response,
            Err(err) => {
                self.session.set_error(Some(transport_message(&err)));
                return Err(err.into());
            }
        };
        if !response.status().is_success() {
            let err = JaritError::InvalidCredentials;
            self.session.set_error(Some(err.to_string()));
            return Err(err);
        }
        self.json_body(response).await
    }

    // ---------- Users ----------

    /// Get the current user's profile.
    pub async fn current_user(&self) -> Result<User> {
        let url = self.url("users/me");
        let response = self.execute(|http| http.get(&url)).await?;
        self.json_body(response).await
    }

    /// List the current user's stored integration keys.
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>> {
        let url = self.url("users/me/api-keys");
        let response = self.execute(|http| http.get(&url)).await?;
        self.json_body(response).await
    }

    /// Create or update an integration key. An omitted `base_url` is sent as
    /// an explicit `null`.
    pub async fn create_api_key(
        &self,
        service_name: &str,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<()> {
        let url = self.url("users/me/api-keys");
        let request = CreateApiKeyRequest {
            service_name: service_name.to_string(),
            api_key: api_key.to_string(),
            base_url: base_url.map(str::to_string),
        };
        self.execute(|http| http.post(&url).json(&request)).await?;
        Ok(())
    }

    /// Delete an integration key by service name.
    pub async fn delete_api_key(&self, service_name: &str) -> Result<()> {
        let url = self.url(&format!("users/me/api-keys/{service_name}"));
        self.execute(|http| http.delete(&url)).await?;
        Ok(())
    }

    // ---------- Recipes ----------

    /// Extract a recipe from a video URL. Potentially long-running.
    ///
    /// The response's `recipe`, `suggested_version`, and `error_info` fields
    /// are independent; all three are surfaced even when a recipe is present,
    /// since diagnostics may accompany a partial success.
    pub async fn extract_recipe(
        &self,
        url: &str,
        target_language: Option<&str>,
    ) -> Result<ExtractRecipeResponse> {
        let endpoint = self.url("recipes/extract-recipe");
        let request = ExtractRecipeRequest {
            url: url.to_string(),
            target_language: target_language.unwrap_or("english").to_string(),
        };
        debug!(url, "requesting recipe extraction");
        let response = self
            .execute(|http| http.post(&endpoint).json(&request))
            .await?;
        self.json_body(response).await
    }

    // ---------- Integrations ----------

    /// Upload a recipe to the user's configured Mealie instance.
    pub async fn upload_to_mealie(&self, recipe: &Recipe) -> Result<()> {
        let url = self.url("integrations/upload-mealie");
        self.execute(|http| http.post(&url).json(recipe)).await?;
        Ok(())
    }

    /// Verify the stored Mealie credentials. The payload is backend-defined
    /// and only useful for checking that the key works.
    pub async fn verify_mealie_user(&self) -> Result<serde_json::Value> {
        let url = self.url("integrations/verify-mealie-user");
        let response = self.execute(|http| http.get(&url)).await?;
        self.json_body(response).await
    }
}
