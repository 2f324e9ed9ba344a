use std::error::Error;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::GLOBAL_CONFIG;
use crate::models::auth_models::{
    AuthApiResponse, AuthContext, AuthError, LoginPayload, SignupPayload,
};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const SIGNUP_PATH: &str = "/api/auth/signup";

/// Client for the external authentication collaborator. Failures surface as a
/// user-visible message; nothing is retried automatically.
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl AuthClient {
    pub fn from_config() -> Self {
        let auth = &GLOBAL_CONFIG.get().unwrap().auth;
        AuthClient {
            client: reqwest::Client::new(),
            base_url: auth.base_url.clone(),
            request_timeout: Duration::from_millis(auth.request_timeout_ms),
        }
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<AuthContext, AuthError> {
        self.post(LOGIN_PATH, payload, "Error logging in").await
    }

    pub async fn signup(&self, payload: &SignupPayload) -> Result<AuthContext, AuthError> {
        self.post(SIGNUP_PATH, payload, "Error creating account. Please try again.")
            .await
    }

    async fn post<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
        default_error: &str,
    ) -> Result<AuthContext, AuthError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                eprintln!("Network error: {}", e);
                AuthError::Network("Network error. Please check your connection".to_string())
            })?;

        let ok = response.status().is_success();
        let body = response
            .json::<AuthApiResponse>()
            .await
            .map_err(|e| AuthError::Network(format!("Malformed auth response: {}", e)))?;
        auth_outcome(ok, body, default_error)
    }
}

/// Maps the collaborator's response onto an identity or a user-visible message.
/// Login failures use `error`, signup failures use `message`; either way the
/// caller gets something to show.
fn auth_outcome(
    ok: bool,
    body: AuthApiResponse,
    default_error: &str,
) -> Result<AuthContext, AuthError> {
    if !ok {
        let message = body
            .error
            .or(body.message)
            .unwrap_or_else(|| default_error.to_string());
        return Err(AuthError::Rejected(message));
    }
    match body.user_id {
        Some(user_id) => Ok(AuthContext {
            user_id,
            token: body.token,
        }),
        None => Err(AuthError::Rejected(default_error.to_string())),
    }
}

impl AuthError {
    pub fn message(&self) -> String {
        match self {
            AuthError::Network(msg) => msg.clone(),
            AuthError::Rejected(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_wire_fields_parse() {
        let body: AuthApiResponse =
            serde_json::from_str(r#"{"userId": "u-7", "token": "tok-1"}"#).unwrap();
        assert_eq!(body.user_id.as_deref(), Some("u-7"));
        assert_eq!(body.token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn success_yields_a_context_with_the_identity() {
        let body: AuthApiResponse =
            serde_json::from_str(r#"{"userId": "u-7", "token": "tok-1"}"#).unwrap();
        let context = auth_outcome(true, body, "Error logging in").unwrap();
        assert_eq!(context.user_id, "u-7");
        assert_eq!(context.token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn login_failure_surfaces_the_error_field() {
        let body: AuthApiResponse =
            serde_json::from_str(r#"{"error": "Invalid credentials"}"#).unwrap();
        let error = auth_outcome(false, body, "Error logging in").unwrap_err();
        assert_eq!(error.message(), "Invalid credentials");
    }

    #[test]
    fn signup_failure_surfaces_the_message_field() {
        let body: AuthApiResponse =
            serde_json::from_str(r#"{"message": "Email already registered"}"#).unwrap();
        let error = auth_outcome(false, body, "Error creating account. Please try again.")
            .unwrap_err();
        assert_eq!(error.message(), "Email already registered");
    }

    #[test]
    fn a_bare_failure_falls_back_to_the_default_message() {
        let body: AuthApiResponse = serde_json::from_str("{}").unwrap();
        let error = auth_outcome(false, body, "Error logging in").unwrap_err();
        assert_eq!(error.message(), "Error logging in");
    }

    #[test]
    fn success_without_an_identity_is_still_a_failure() {
        let body: AuthApiResponse = serde_json::from_str(r#"{"token": "tok-1"}"#).unwrap();
        assert!(auth_outcome(true, body, "Error logging in").is_err());
    }
}
