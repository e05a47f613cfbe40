use std::time::Duration;

use serde_json::json;

use crate::{
    audit,
    config::Mode,
    domain::{
        cart,
        checkout::{self, CheckoutForm},
    },
    dto::checkout::{AddressList, CheckoutPrefill, CheckoutSummary},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    seed,
    state::AppState,
};

/// Simulated payment hand-off latency in mock mode.
pub const MOCK_CHECKOUT_DELAY: Duration = Duration::from_millis(600);

pub async fn list_addresses(user: &AuthUser) -> AppResult<ApiResponse<AddressList>> {
    let items = seed::saved_addresses();
    let default_id = items.iter().find(|a| a.is_default).map(|a| a.id.clone());
    tracing::debug!(user_id = %user.user_id, count = items.len(), "saved addresses listed");

    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("OK", AddressList { items, default_id }, Some(meta)))
}

/// Contact details for the form, read from the auth provider's user record.
pub async fn prefill(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CheckoutPrefill>> {
    let backend = state.backend()?;
    let remote = backend.get_user(&user.access_token).await?;

    let data = CheckoutPrefill {
        phone: remote.phone().map(str::to_string),
        email: remote
            .email()
            .map(str::to_string)
            .or_else(|| user.email.clone()),
    };
    Ok(ApiResponse::success("OK", data, None))
}

pub async fn submit(
    state: &AppState,
    user: &AuthUser,
    form: CheckoutForm,
) -> AppResult<ApiResponse<CheckoutSummary>> {
    if state.config.checkout_mode == Mode::Real {
        return Err(AppError::Unavailable(
            "Real checkout mode is not enabled yet.".to_string(),
        ));
    }

    checkout::validate(&form, &seed::saved_addresses())?;

    // Held for the whole delay; dropping it on any return releases the listener.
    let mut subscription = state.sessions.subscribe(user.user_id);
    let delay = tokio::time::sleep(MOCK_CHECKOUT_DELAY);
    tokio::pin!(delay);

    loop {
        tokio::select! {
            _ = &mut delay => break,
            snapshot = subscription.changed() => match snapshot {
                Some(snapshot) if !snapshot.is_signed_in() => {
                    tracing::info!(user_id = %user.user_id, "session ended during mock checkout");
                    return Err(AppError::Unauthorized(
                        "Session ended during checkout.".to_string(),
                    ));
                }
                Some(_) => continue,
                None => {
                    (&mut delay).await;
                    break;
                }
            },
        }
    }

    let items = seed::initial_cart();
    let totals = cart::totals(&items);

    audit::record(
        Some(user.user_id),
        "checkout_mock",
        Some("orders"),
        Some(json!({ "total": totals.total, "new_address": form.uses_new_address() })),
    );

    Ok(ApiResponse::success(
        "Mock checkout complete. Next step is Razorpay payment UI.",
        CheckoutSummary { items, totals },
        None,
    ))
}
