use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::auth::{
        EmailRequest, LoginRequest, LoginResponse, SessionResponse, SignupRequest, SignupResponse,
        UpdatePasswordRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::{Ack, ApiResponse},
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/magic-link", post(magic_link))
        .route("/reset-password", post(reset_password))
        .route("/update-password", post(update_password))
        .route("/logout", post(logout))
        .route("/session", get(session))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Rejected by the auth provider"),
        (status = 422, description = "Email or password blank"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created or confirmation pending", body = ApiResponse<SignupResponse>),
        (status = 401, description = "Rejected by the auth provider"),
        (status = 422, description = "Email or password blank"),
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<ApiResponse<SignupResponse>>> {
    let resp = auth_service::signup(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/magic-link",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Sign-in link sent", body = ApiResponse<Ack>),
        (status = 422, description = "Email blank"),
    ),
    tag = "Auth"
)]
pub async fn magic_link(
    State(state): State<AppState>,
    Json(payload): Json<EmailRequest>,
) -> AppResult<Json<ApiResponse<Ack>>> {
    let resp = auth_service::send_magic_link(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Reset link sent", body = ApiResponse<Ack>),
        (status = 422, description = "Email blank"),
    ),
    tag = "Auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<EmailRequest>,
) -> AppResult<Json<ApiResponse<Ack>>> {
    let resp = auth_service::send_password_reset(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/update-password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed and session ended", body = ApiResponse<Ack>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Password too short or confirmation mismatch"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn update_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdatePasswordRequest>,
) -> AppResult<Json<ApiResponse<Ack>>> {
    let resp = auth_service::update_password(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out", body = ApiResponse<Ack>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Ack>>> {
    let resp = auth_service::logout(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn session(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SessionResponse>>> {
    let resp = auth_service::current_session(&state, &user).await?;
    Ok(Json(resp))
}
