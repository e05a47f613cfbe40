mod common;

use storefront_api::{
    config::{AppConfig, Mode},
    domain::checkout::{CheckoutForm, is_likely_e164, is_valid_pincode, validate},
    error::AppError,
    seed,
    services::checkout_service,
    session::{AuthEvent, SessionSnapshot},
    state::AppState,
};
use uuid::Uuid;

fn filled_form() -> CheckoutForm {
    CheckoutForm {
        first_name: "Mohinder".to_string(),
        last_name: "Krishan".to_string(),
        phone: "+919876543210".to_string(),
        line1: "B-12, Green Park".to_string(),
        pincode: "110016".to_string(),
        city: "New Delhi".to_string(),
        state: "Delhi".to_string(),
        ..Default::default()
    }
}

fn message(form: &CheckoutForm) -> String {
    validate(form, &seed::saved_addresses())
        .expect_err("should fail")
        .0
}

#[test]
fn empty_form_reports_first_name_first() {
    assert_eq!(message(&CheckoutForm::default()), "First name is required.");
}

#[test]
fn rules_fire_in_display_order() {
    let mut form = filled_form();
    form.line1 = "   ".to_string();
    form.phone.clear();
    assert_eq!(message(&form), "Address line 1 is required.");

    let mut form = filled_form();
    form.pincode = "1234".to_string();
    form.city.clear();
    assert_eq!(message(&form), "PIN code looks invalid.");

    let mut form = filled_form();
    form.state.clear();
    assert_eq!(message(&form), "State is required.");

    let mut form = filled_form();
    form.phone = "9876543210".to_string();
    assert_eq!(
        message(&form),
        "Phone must be in international format, e.g. +919876543210."
    );

    let mut form = filled_form();
    form.email = "not-an-email".to_string();
    assert_eq!(message(&form), "Email looks invalid.");
}

#[test]
fn complete_new_address_passes() {
    let mut form = filled_form();
    form.email = " shopper@example.com ".to_string();
    assert!(validate(&form, &seed::saved_addresses()).is_ok());
}

#[test]
fn saved_address_skips_address_fields() {
    let form = CheckoutForm {
        address_id: "addr_default".to_string(),
        phone: "+919876543210".to_string(),
        ..Default::default()
    };
    assert!(validate(&form, &seed::saved_addresses()).is_ok());

    let form = CheckoutForm {
        address_id: "addr_gone".to_string(),
        phone: "+919876543210".to_string(),
        ..Default::default()
    };
    assert_eq!(message(&form), "Selected address was not found.");
}

#[test]
fn fill_from_copies_saved_address() {
    let saved = seed::saved_addresses();
    let mut form = CheckoutForm::default();
    form.fill_from(&saved[0]);

    assert!(!form.uses_new_address());
    assert_eq!(form.pincode, "110017");
    assert_eq!(form.first_name, "Mohinder");
}

#[test]
fn pincode_and_phone_patterns() {
    assert!(is_valid_pincode("110017"));
    assert!(is_valid_pincode("90210"));
    assert!(!is_valid_pincode("1100170"));
    assert!(!is_valid_pincode("11OO17"));

    assert!(is_likely_e164("+14155552671"));
    assert!(!is_likely_e164("+0123456789"));
    assert!(!is_likely_e164("+1234567"));
    assert!(!is_likely_e164("+1234567890123456"));
    assert!(!is_likely_e164("+9१९८७६५४३२१०"));
    assert!(!is_valid_pincode("११००१७"));
}

#[tokio::test(start_paused = true)]
async fn mock_checkout_completes_after_delay() {
    let state = common::local_state();
    let user = common::auth_user(Uuid::new_v4());

    let resp = checkout_service::submit(&state, &user, filled_form())
        .await
        .expect("checkout");

    assert_eq!(
        resp.message,
        "Mock checkout complete. Next step is Razorpay payment UI."
    );
    let summary = resp.data.expect("summary");
    assert_eq!(summary.totals.total, 3097);
    assert_eq!(state.sessions.listener_count(&user.user_id), 0);
}

#[tokio::test(start_paused = true)]
async fn invalid_form_is_rejected_before_delay() {
    let state = common::local_state();
    let user = common::auth_user(Uuid::new_v4());

    let err = checkout_service::submit(&state, &user, CheckoutForm::default())
        .await
        .expect_err("rejected");
    assert!(matches!(err, AppError::Validation(ref m) if m == "First name is required."));
}

#[tokio::test(start_paused = true)]
async fn sign_out_during_checkout_ends_it() {
    let state = common::local_state();
    let user = common::auth_user(Uuid::new_v4());
    let user_id = user.user_id;

    let task = {
        let state = state.clone();
        tokio::spawn(async move { checkout_service::submit(&state, &user, filled_form()).await })
    };

    while state.sessions.listener_count(&user_id) == 0 {
        tokio::task::yield_now().await;
    }
    state
        .sessions
        .publish(SessionSnapshot::new(AuthEvent::SignedOut, user_id, None));

    let err = task.await.expect("join").expect_err("signed out");
    assert!(matches!(err, AppError::Unauthorized(ref m) if m == "Session ended during checkout."));
    assert_eq!(state.sessions.listener_count(&user_id), 0);
}

#[tokio::test]
async fn real_checkout_mode_is_not_enabled() {
    let mut config = AppConfig::local();
    config.checkout_mode = Mode::Real;
    let state = AppState::new(config);
    let user = common::auth_user(Uuid::new_v4());

    let err = checkout_service::submit(&state, &user, filled_form())
        .await
        .expect_err("disabled");
    assert_eq!(err.to_string(), "Real checkout mode is not enabled yet.");
}

#[tokio::test]
async fn saved_addresses_expose_default() {
    let user = common::auth_user(Uuid::new_v4());
    let resp = checkout_service::list_addresses(&user).await.expect("addresses");
    let data = resp.data.expect("data");
    assert_eq!(data.default_id.as_deref(), Some("addr_default"));
}
