use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;

use super::ValidationError;
use crate::models::SavedAddress;

/// `address_id` value selecting the new-address fields.
pub const NEW_ADDRESS: &str = "new";

static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5,6}$").expect("valid regex"));

/// `+` then 8-15 digits, the first non-zero.
static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{7,14}$").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckoutForm {
    #[serde(default = "default_address_id")]
    pub address_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub landmark: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub is_business: bool,
}

fn default_address_id() -> String {
    NEW_ADDRESS.to_string()
}

fn default_country() -> String {
    "India".to_string()
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            address_id: default_address_id(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            line1: String::new(),
            line2: String::new(),
            landmark: String::new(),
            pincode: String::new(),
            city: String::new(),
            state: String::new(),
            country: default_country(),
            is_business: false,
        }
    }
}

impl CheckoutForm {
    pub fn uses_new_address(&self) -> bool {
        self.address_id.trim() == NEW_ADDRESS
    }

    /// Copies a saved address into the address fields, leaving contact
    /// details alone.
    pub fn fill_from(&mut self, address: &SavedAddress) {
        self.address_id = address.id.clone();
        self.first_name = address.first_name.clone();
        self.last_name = address.last_name.clone();
        self.line1 = address.line1.clone();
        self.line2 = address.line2.clone().unwrap_or_default();
        self.landmark = address.landmark.clone().unwrap_or_default();
        self.pincode = address.pincode.clone();
        self.city = address.city.clone();
        self.state = address.state.clone();
        self.country = address.country.clone();
    }
}

pub fn is_valid_pincode(pincode: &str) -> bool {
    PINCODE_RE.is_match(pincode.trim())
}

pub fn is_likely_e164(phone: &str) -> bool {
    E164_RE.is_match(phone.trim())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Checks the form in display order and reports the first problem only.
pub fn validate(form: &CheckoutForm, saved: &[SavedAddress]) -> Result<(), ValidationError> {
    let fail = |message: &str| Err(ValidationError::new(message));

    if form.uses_new_address() {
        if form.first_name.trim().is_empty() {
            return fail("First name is required.");
        }
        if form.last_name.trim().is_empty() {
            return fail("Last name is required.");
        }
        if form.line1.trim().is_empty() {
            return fail("Address line 1 is required.");
        }
        if form.pincode.trim().is_empty() {
            return fail("PIN code is required.");
        }
        if !is_valid_pincode(&form.pincode) {
            return fail("PIN code looks invalid.");
        }
        if form.city.trim().is_empty() {
            return fail("City is required.");
        }
        if form.state.trim().is_empty() {
            return fail("State is required.");
        }
    } else if !saved.iter().any(|a| a.id == form.address_id.trim()) {
        return fail("Selected address was not found.");
    }

    if form.phone.trim().is_empty() {
        return fail("Phone is required.");
    }
    if !is_likely_e164(&form.phone) {
        return fail("Phone must be in international format, e.g. +919876543210.");
    }
    if !form.email.trim().is_empty() && !is_valid_email(&form.email) {
        return fail("Email looks invalid.");
    }
    Ok(())
}
