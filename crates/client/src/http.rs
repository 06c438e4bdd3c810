//! HTTP transport with central fault classification.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use centralstore_core::ApiError;
use centralstore_session::{
    Authority, LoginCredentials, LoginOutcome, PasswordChange, ProfileUpdate, TokenSlot,
};

use crate::hooks::FaultHooks;

/// Remote API client.
///
/// Reads the shared [`TokenSlot`] on every request and attaches the bearer
/// credential once the slot is armed; the session store arms and disarms
/// the slot, the client never mutates it.
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: TokenSlot,
    hooks: Arc<dyn FaultHooks>,
}

impl ApiClient {
    /// `base_url` is the API prefix, e.g. `http://host/api`.
    pub fn new(
        base_url: impl Into<String>,
        tokens: TokenSlot,
        hooks: Arc<dyn FaultHooks>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            tokens,
            hooks,
        }
    }

    /// Generic request entry point for the thin resource wrappers the views
    /// use. Faults are classified and dispatched to the hooks before the
    /// error is returned.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        let bearer = self.tokens.bearer();
        let authenticated = bearer.is_some();
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if (200..300).contains(&status) {
            serde_json::from_str(&text).map_err(|err| ApiError::Decode(err.to_string()))
        } else {
            let err = classify(status, &text, authenticated);
            self.dispatch(&err);
            Err(err)
        }
    }

    fn dispatch(&self, err: &ApiError) {
        match err {
            ApiError::AuthorizationExpired => self.hooks.on_authorization_expired(),
            ApiError::InsufficientPrivilege => self.hooks.on_insufficient_privilege(),
            ApiError::ServiceUnavailable(message) => self.hooks.on_service_unavailable(message),
            _ => {}
        }
    }
}

#[async_trait]
impl Authority for ApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, ApiError> {
        let body =
            serde_json::to_value(credentials).map_err(|err| ApiError::Decode(err.to_string()))?;
        self.send(Method::POST, "/login", Some(&body)).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        let body =
            serde_json::to_value(update).map_err(|err| ApiError::Decode(err.to_string()))?;
        let _: Value = self.send(Method::PUT, "/profile", Some(&body)).await?;
        Ok(())
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let body =
            serde_json::to_value(change).map_err(|err| ApiError::Decode(err.to_string()))?;
        let _: Value = self
            .send(Method::POST, "/change-password", Some(&body))
            .await?;
        Ok(())
    }
}

/// Classify a non-success response.
///
/// A 401 only signals an expired session when a bearer credential was
/// attached: the same status on the login exchange itself is an ordinary
/// rejection carrying the server's message.
pub fn classify(status: u16, body: &str, authenticated: bool) -> ApiError {
    match status {
        401 if authenticated => ApiError::AuthorizationExpired,
        403 => ApiError::InsufficientPrivilege,
        500.. => ApiError::ServiceUnavailable(
            error_message(body).unwrap_or_else(|| "server error".to_string()),
        ),
        _ => ApiError::Rejected(error_message(body).unwrap_or_default()),
    }
}

/// Extract the server's `{"error": "..."}` message, if the body carries one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_owned)
}
