//! Auth Endpoints

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::SessionUser;
use crate::session::Session;

#[derive(Serialize)]
struct LoginArgs<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionUser,
}

/// Exchange credentials for a session
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<Session, ApiError> {
    let response: LoginResponse = client.post("auth/login", &LoginArgs { username, password }).await?;
    Ok(Session {
        token: response.token,
        user: response.user,
    })
}

/// Current user for the client's token
pub async fn me(client: &ApiClient) -> Result<SessionUser, ApiError> {
    client.get("auth/me").await
}

/// Best-effort server-side logout
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.delete("auth/session").await
}
