use uuid::Uuid;

use crate::{
    audit,
    backend::{BackendError, SignUpOutcome},
    dto::auth::{
        EmailRequest, LoginRequest, LoginResponse, SessionResponse, SignupRequest,
        SignupResponse, UpdatePasswordRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{Ack, ApiResponse, Meta},
    session::{AuthEvent, SessionSnapshot},
    state::AppState,
};

pub const MIN_PASSWORD_LEN: usize = 6;

/// The provider's own rejection text goes back to the caller unchanged.
fn provider_error(err: BackendError) -> AppError {
    match err {
        BackendError::Api { message, .. } => AppError::Unauthorized(message),
        other => AppError::Backend(other),
    }
}

fn require_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(AppError::Validation(
            "Email and password are required.".to_string(),
        ));
    }
    Ok(())
}

fn require_email(email: &str) -> AppResult<&str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("Email is required.".to_string()));
    }
    Ok(email)
}

fn publish(state: &AppState, event: AuthEvent, user_id: Uuid, email: Option<String>) {
    state
        .sessions
        .publish(SessionSnapshot::new(event, user_id, email));
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    require_credentials(&email, &password)?;

    let backend = state.backend()?;
    let session = backend
        .sign_in_with_password(email.trim(), password.trim())
        .await
        .map_err(provider_error)?;

    let user_id = session.user.id;
    publish(state, AuthEvent::SignedIn, user_id, session.user.email.clone());
    audit::record(Some(user_id), "user_login", Some("auth"), None);

    Ok(ApiResponse::success("Signed in.", session.into(), None))
}

pub async fn signup(
    state: &AppState,
    payload: SignupRequest,
) -> AppResult<ApiResponse<SignupResponse>> {
    let SignupRequest { email, password } = payload;
    require_credentials(&email, &password)?;

    let backend = state.backend()?;
    let outcome = backend
        .sign_up(email.trim(), password.trim())
        .await
        .map_err(provider_error)?;

    let resp = match outcome {
        SignUpOutcome::Session(session) => {
            let user_id = session.user.id;
            publish(state, AuthEvent::SignedIn, user_id, session.user.email.clone());
            audit::record(Some(user_id), "user_register", Some("auth"), None);
            ApiResponse::success(
                "Account created.",
                SignupResponse {
                    session: Some(session.into()),
                    pending_confirmation: false,
                },
                None,
            )
        }
        SignUpOutcome::PendingConfirmation => {
            audit::record(None, "user_register_pending", Some("auth"), None);
            ApiResponse::success(
                "If the details are valid, your account setup will continue. Check your email for next steps.",
                SignupResponse {
                    session: None,
                    pending_confirmation: true,
                },
                None,
            )
        }
    };
    Ok(resp)
}

pub async fn send_magic_link(state: &AppState, payload: EmailRequest) -> AppResult<ApiResponse<Ack>> {
    let email = require_email(&payload.email)?;
    let backend = state.backend()?;

    let redirect_to = format!("{}/account", state.config.site_url);
    backend
        .sign_in_with_otp(email, &redirect_to)
        .await
        .map_err(provider_error)?;

    Ok(ApiResponse::success(
        "Sign-in link sent to your email.",
        Ack::ok(),
        Some(Meta::empty()),
    ))
}

pub async fn send_password_reset(state: &AppState, payload: EmailRequest) -> AppResult<ApiResponse<Ack>> {
    let email = require_email(&payload.email)?;
    let backend = state.backend()?;

    let redirect_to = format!("{}/reset-password", state.config.site_url);
    backend
        .reset_password_for_email(email, &redirect_to)
        .await
        .map_err(provider_error)?;

    Ok(ApiResponse::success(
        "Password reset link sent to your email.",
        Ack::ok(),
        Some(Meta::empty()),
    ))
}

/// Sets a new password and ends the current session; the user signs in
/// again with the new password.
pub async fn update_password(
    state: &AppState,
    user: &AuthUser,
    payload: UpdatePasswordRequest,
) -> AppResult<ApiResponse<Ack>> {
    let UpdatePasswordRequest {
        password,
        confirm_password,
    } = payload;

    if password.trim().is_empty() {
        return Err(AppError::Validation("Please enter a new password.".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at least 6 characters.".to_string(),
        ));
    }
    if password != confirm_password {
        return Err(AppError::Validation("Passwords do not match.".to_string()));
    }

    let backend = state.backend()?;
    let updated = backend
        .update_password(&user.access_token, &password)
        .await
        .map_err(provider_error)?;
    publish(state, AuthEvent::UserUpdated, user.user_id, updated.email.clone());

    if let Err(err) = backend.sign_out(&user.access_token).await {
        tracing::warn!(error = %err, user_id = %user.user_id, "sign-out after password update failed");
    }
    publish(state, AuthEvent::SignedOut, user.user_id, updated.email);
    audit::record(Some(user.user_id), "password_update", Some("auth"), None);

    Ok(ApiResponse::success(
        "Password updated. Sign in again with your new password.",
        Ack::ok(),
        Some(Meta::empty()),
    ))
}

pub async fn logout(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Ack>> {
    let backend = state.backend()?;
    backend
        .sign_out(&user.access_token)
        .await
        .map_err(provider_error)?;

    publish(state, AuthEvent::SignedOut, user.user_id, user.email.clone());
    audit::record(Some(user.user_id), "user_logout", Some("auth"), None);

    Ok(ApiResponse::success("Signed out.", Ack::ok(), Some(Meta::empty())))
}

pub async fn current_session(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<SessionResponse>> {
    let backend = state.backend()?;
    let remote = backend
        .get_user(&user.access_token)
        .await
        .map_err(provider_error)?;

    Ok(ApiResponse::success(
        "OK",
        SessionResponse {
            user: remote,
            role: user.role.clone(),
        },
        None,
    ))
}
