// src/fetch/auth.rs
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{ReportError, Result};

// Access tokens expire after five minutes; refreshing at four leaves a
// minute of padding.
const REFRESH_AFTER: Duration = Duration::from_secs(240);

const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug)]
struct TokenState {
    access: String,
    refresh: String,
    issued_at: Instant,
}

/// OAuth password-grant session against a Keycloak-style token endpoint.
/// Hands out bearer tokens, transparently refreshing them before expiry so
/// long-running fetches never authenticate with a stale token.
#[derive(Debug)]
pub struct AuthSession {
    client: Client,
    auth_url: String,
    client_id: String,
    state: Mutex<TokenState>,
}

impl AuthSession {
    /// Authenticates with the password grant and stores the token pair.
    ///
    /// # Errors
    /// `Auth` if the endpoint rejects the credentials or cannot be reached.
    pub fn login(
        client: Client,
        auth_url: &str,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let token = request_token(
            &client,
            auth_url,
            &[
                ("username", username),
                ("password", password),
                ("grant_type", "password"),
                ("client_id", client_id),
            ],
        )?;
        Ok(Self {
            client,
            auth_url: auth_url.to_string(),
            client_id: client_id.to_string(),
            state: Mutex::new(TokenState {
                access: token.access_token,
                refresh: token.refresh_token,
                issued_at: Instant::now(),
            }),
        })
    }

    /// Returns a bearer token, refreshing the pair first when the current
    /// one is close to expiry.
    ///
    /// # Errors
    /// `Auth` if the refresh grant fails.
    pub fn bearer(&self) -> Result<String> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.issued_at.elapsed() > REFRESH_AFTER {
            let token = request_token(
                &self.client,
                &self.auth_url,
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", &state.refresh),
                    ("client_id", &self.client_id),
                ],
            )?;
            state.access = token.access_token;
            state.refresh = token.refresh_token;
            state.issued_at = Instant::now();
        }
        Ok(state.access.clone())
    }
}

fn request_token(client: &Client, auth_url: &str, form: &[(&str, &str)]) -> Result<TokenResponse> {
    let response = client
        .post(auth_url)
        .form(form)
        .timeout(AUTH_TIMEOUT)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|_| {
            ReportError::Auth(
                "could not connect to authentication server; is the configuration correct?"
                    .to_string(),
            )
        })?;
    response
        .json()
        .map_err(|_| ReportError::Auth("unexpected response from authentication server".to_string()))
}
