use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::Claims,
    error::{AppError, AppResult},
    session::{AuthEvent, SessionSnapshot},
    state::AppState,
};

/// Privileged function used to tell admins from everybody else.
pub const ADMIN_PROBE_FUNCTION: &str = "admin-products";

/// Audience the auth provider stamps on user access tokens.
pub const TOKEN_AUDIENCE: &str = "authenticated";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub role: String,
    /// Forwarded to the backend so calls run as this user.
    pub access_token: String,
}

/// An [`AuthUser`] that passed the admin probe, plus the probe's response
/// (the remote product listing).
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser, Value);

impl AdminUser {
    pub fn new(user: AuthUser, probe_body: Value) -> Self {
        Self(user, probe_body)
    }

    pub fn probe_body(&self) -> &Value {
        &self.1
    }
}

pub fn decode_access_token(token: &str, secret: &str) -> AppResult<AuthUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[TOKEN_AUDIENCE]);

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    Ok(AuthUser {
        user_id,
        email: decoded.claims.email,
        role: decoded.claims.role,
        access_token: token.to_string(),
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let secret = state
            .config
            .jwt_secret
            .as_deref()
            .ok_or(AppError::ConfigMissing)?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
        };

        decode_access_token(token.trim(), secret)
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let probe_body = ensure_admin(state, &user).await?;
        Ok(AdminUser::new(user, probe_body))
    }
}

/// Probes the privileged function as `user` and returns its body. A failed
/// probe signs the user out and rejects the request.
pub async fn ensure_admin(state: &AppState, user: &AuthUser) -> AppResult<Value> {
    let backend = state.backend()?;
    let probe = backend
        .invoke(ADMIN_PROBE_FUNCTION, Method::GET, None, Some(&user.access_token))
        .await;

    let err = match probe {
        Ok(body) => return Ok(body),
        Err(err) => err,
    };

    let message = match err.status() {
        Some(status) => format!("Admin check failed ({status}): {err}"),
        None => format!("Admin check request failed: {err}"),
    };

    if let Err(sign_out_err) = backend.sign_out(&user.access_token).await {
        tracing::warn!(error = %sign_out_err, user_id = %user.user_id, "sign-out after failed admin check failed");
    }
    state.sessions.publish(SessionSnapshot::new(
        AuthEvent::SignedOut,
        user.user_id,
        user.email.clone(),
    ));
    audit::record(
        Some(user.user_id),
        "admin_check_failed",
        Some("auth"),
        Some(serde_json::json!({ "reason": message })),
    );

    Err(AppError::Forbidden(message))
}
