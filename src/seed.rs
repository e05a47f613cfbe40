//! Sample data. Every function returns a fresh collection, so sessions
//! never share mutable seed state.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::{
    AdminCoupon, AdminOffer, AdminOrder, AdminProduct, CartLineItem, CouponType, OfferType,
    OrderStatus, PaymentStatus, SavedAddress,
};

pub fn initial_cart() -> Vec<CartLineItem> {
    vec![
        CartLineItem {
            id: "sku_duffle_001".into(),
            name: "Signature Duffle".into(),
            unit_price: 1299,
            quantity: 1,
            image_url: Some("/DuffleBag.jpg".into()),
        },
        CartLineItem {
            id: "sku_sling_001".into(),
            name: "City Sling".into(),
            unit_price: 899,
            quantity: 2,
            image_url: Some("/SlingBag.jpg".into()),
        },
    ]
}

pub fn initial_orders() -> Vec<AdminOrder> {
    vec![
        AdminOrder {
            id: 31021,
            customer_name: "Manav Kapur".into(),
            phone: "+91 98765 43210".into(),
            item_count: 2,
            total: 25900,
            payment_status: PaymentStatus::Paid,
            status: OrderStatus::Packed,
            created_at: utc(2026, 2, 13, 12, 30),
        },
        AdminOrder {
            id: 31020,
            customer_name: "Mohinder Krishan".into(),
            phone: "+91 98111 11193".into(),
            item_count: 1,
            total: 15800,
            payment_status: PaymentStatus::Paid,
            status: OrderStatus::Shipped,
            created_at: utc(2026, 2, 13, 10, 10),
        },
        AdminOrder {
            id: 31019,
            customer_name: "Ananya Sharma".into(),
            phone: "+91 98989 12212".into(),
            item_count: 3,
            total: 31200,
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Created,
            created_at: utc(2026, 2, 12, 18, 42),
        },
    ]
}

pub fn initial_products() -> Vec<AdminProduct> {
    vec![
        AdminProduct {
            id: 1001,
            name: "Sfane Polyester Grey Duffle / Shoulder / Gym Bag".into(),
            slug: "sfane-polyester-grey-duffle".into(),
            price: 414.0,
            category: "Gym Bags".into(),
            stock: 250.0,
            active: true,
            image_url: "/sfanelogo.jpg".into(),
            offer_id: Some(1),
        },
        AdminProduct {
            id: 1002,
            name: "City Sling".into(),
            slug: "city-sling".into(),
            price: 899.0,
            category: "Sling Bags".into(),
            stock: 120.0,
            active: true,
            image_url: "/SlingBag.jpg".into(),
            offer_id: None,
        },
    ]
}

pub fn initial_offers() -> Vec<AdminOffer> {
    vec![AdminOffer {
        id: 1,
        title: "Weekend Launch Offer".into(),
        offer_type: OfferType::Percent,
        value: 65.0,
        start_at: local(2026, 2, 13, 0, 0),
        end_at: local(2026, 2, 16, 23, 59),
        active: true,
        product_ids: BTreeSet::from([1001]),
    }]
}

pub fn initial_coupons() -> Vec<AdminCoupon> {
    vec![AdminCoupon {
        id: 1,
        code: "SFAFIRST10".into(),
        coupon_type: CouponType::Percent,
        value: 10.0,
        min_order: 999.0,
        usage_limit: 300.0,
        used_count: 54,
        start_at: Some(local(2026, 2, 10, 0, 0)),
        end_at: Some(local(2026, 3, 1, 23, 59)),
        active: true,
    }]
}

pub fn saved_addresses() -> Vec<SavedAddress> {
    vec![SavedAddress {
        id: "addr_default".into(),
        label: "Home".into(),
        is_default: true,
        first_name: "Mohinder".into(),
        last_name: "Krishan".into(),
        line1: "221B, Example Street".into(),
        line2: Some("Near Central Park".into()),
        landmark: Some("Gate 2".into()),
        pincode: "110017".into(),
        city: "South Delhi".into(),
        state: "Delhi".into(),
        country: "India".into(),
    }]
}

fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    local(year, month, day, hour, minute).and_utc()
}
