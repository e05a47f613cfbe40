use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::backend::{AuthSession, BackendUser};

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct EmailRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub user: BackendUser,
}

impl From<AuthSession> for LoginResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            user: session.user,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    /// Present when the account is usable straight away.
    pub session: Option<LoginResponse>,
    pub pending_confirmation: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: BackendUser,
    pub role: String,
}

/// Access-token claims issued by the auth provider.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub exp: usize,
    #[serde(default)]
    pub aud: Option<String>,
}

fn default_role() -> String {
    "authenticated".to_string()
}
