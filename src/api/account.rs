//! Account endpoints: login, user info, logout.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::transport::{ApiError, Request, Transport, to_payload};

pub const LOGIN_PATH: &str = "/account/login";
pub const USER_INFO_PATH: &str = "/account/getUserInfo";
pub const LOGOUT_PATH: &str = "/account/logout";

/// Body of a login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of the token-scoped calls. A missing token is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRequest {
    pub token: Option<String>,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// `{ "data": { "loginInfo": { "token": ... } } }`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub login_info: LoginInfo,
}

#[derive(Debug, Deserialize)]
pub struct LoginInfo {
    pub token: String,
}

/// `{ "data": { "userInfo": { "role": ... } } }`
#[derive(Debug, Deserialize)]
pub struct UserInfoResponse {
    pub data: UserInfoData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoData {
    pub user_info: UserInfo,
}

#[derive(Debug, Deserialize)]
pub struct UserInfo {
    /// Some backends send numeric role ids; those are kept as their text form.
    #[serde(deserialize_with = "string_or_number")]
    pub role: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Exchange credentials for a session token via `POST /account/login`.
///
/// # Errors
///
/// Returns the transport's error unchanged.
pub async fn login<T>(transport: &T, request: LoginRequest) -> Result<Value, ApiError>
where
    T: Transport + ?Sized,
{
    transport.send(Request::post(LOGIN_PATH, to_payload(&request)?)).await
}

/// Fetch the profile behind a token via `POST /account/getUserInfo`.
///
/// # Errors
///
/// Returns the transport's error unchanged.
pub async fn get_user_info<T>(transport: &T, request: TokenRequest) -> Result<Value, ApiError>
where
    T: Transport + ?Sized,
{
    transport.send(Request::post(USER_INFO_PATH, to_payload(&request)?)).await
}

/// Invalidate a token via `POST /account/logout`.
///
/// # Errors
///
/// Returns the transport's error unchanged.
pub async fn logout<T>(transport: &T, request: TokenRequest) -> Result<Value, ApiError>
where
    T: Transport + ?Sized,
{
    transport.send(Request::post(LOGOUT_PATH, to_payload(&request)?)).await
}
