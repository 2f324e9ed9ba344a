use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupPayload {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Wire shape shared by the auth collaborator's login and signup endpoints.
/// Login failures use `error`, signup failures use `message`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthApiResponse {
    pub user_id: Option<String>,
    pub token: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Identity handed back after a successful login/signup. Callers pass this to
/// whatever needs it; there is no process-wide logged-in flag.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub token: Option<String>,
}

#[derive(Debug)]
pub enum AuthError {
    Network(String),
    Rejected(String),
}
