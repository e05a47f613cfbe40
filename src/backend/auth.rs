use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{BackendClient, BackendError};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BackendUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl BackendUser {
    /// The provider reports "no phone" as an empty string.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: BackendUser,
}

#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// Email confirmation is off; the account is usable immediately.
    Session(AuthSession),
    /// The provider sent a confirmation email.
    PendingConfirmation,
}

impl BackendClient {
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/signup", None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: serde_json::Value = Self::parse_json(response).await?;

        if body.get("access_token").is_some() {
            let session = serde_json::from_value(body)
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            Ok(SignUpOutcome::Session(session))
        } else {
            Ok(SignUpOutcome::PendingConfirmation)
        }
    }

    /// One-time sign-in link sent by email.
    pub async fn sign_in_with_otp(&self, email: &str, redirect_to: &str) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/otp", None)
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email, "create_user": true }))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/recover", None)
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<BackendUser, BackendError> {
        let response = self
            .request(Method::PUT, "/auth/v1/user", Some(access_token))
            .json(&json!({ "password": password }))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn get_user(&self, access_token: &str) -> Result<BackendUser, BackendError> {
        let response = self
            .request(Method::GET, "/auth/v1/user", Some(access_token))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/logout", Some(access_token))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
