use storefront_api::{
    domain::dashboard::{CouponDraft, Dashboard, OfferDraft, ProductDraft},
    models::{CouponType, OfferType, OrderStatus},
};

fn product_draft(name: &str, price: &str, stock: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        price: price.to_string(),
        stock: stock.to_string(),
        ..Default::default()
    }
}

#[test]
fn seeded_summary_counts_paid_revenue_only() {
    let dashboard = Dashboard::seeded();
    let summary = dashboard.summary();

    assert_eq!(summary.orders, 3);
    assert_eq!(summary.revenue, 41_700);
    assert_eq!(summary.revenue_label, "₹41,700");
    assert_eq!(summary.products, 2);
    assert_eq!(summary.coupons_live, 1);
}

#[test]
fn create_product_assigns_next_id_and_defaults() {
    let mut dashboard = Dashboard::seeded();
    let product = dashboard
        .create_product(product_draft("Travel Tote", "1499", "20"))
        .expect("created");

    assert_eq!(product.id, 1003);
    assert_eq!(product.category, "Uncategorized");
    assert_eq!(product.image_url, "/sfanelogo.jpg");
    assert!(product.active);
    assert_eq!(product.offer_id, None);
    assert_eq!(dashboard.products[0].id, 1003);
}

#[test]
fn first_product_in_empty_console_starts_above_floor() {
    let mut dashboard = Dashboard::empty();
    let product = dashboard
        .create_product(product_draft("Mini", "10", "1"))
        .expect("created");
    assert_eq!(product.id, 1001);
}

#[test]
fn invalid_product_draft_leaves_console_untouched() {
    let mut dashboard = Dashboard::seeded();
    let before = dashboard.clone();

    for draft in [
        product_draft("", "100", "1"),
        product_draft("Tote", "", "1"),
        product_draft("Tote", "abc", "1"),
        product_draft("Tote", "inf", "1"),
        product_draft("Tote", "100", "NaN"),
    ] {
        let err = dashboard.create_product(draft).expect_err("rejected");
        assert_eq!(err.0, "Product name, slug, price, and stock are required.");
    }
    assert_eq!(dashboard, before);
}

#[test]
fn fractional_amounts_are_accepted() {
    let mut dashboard = Dashboard::seeded();
    let product = dashboard
        .create_product(product_draft("Tote", "1299.50", "3"))
        .expect("created");
    assert_eq!(product.price, 1299.5);
    assert_eq!(product.stock, 3.0);

    let coupon = dashboard
        .create_coupon(CouponDraft {
            code: "half".to_string(),
            value: "7.5".to_string(),
            min_order: "499.99".to_string(),
            usage_limit: "10".to_string(),
            ..Default::default()
        })
        .expect("coupon");
    assert_eq!(coupon.min_order, 499.99);
}

#[test]
fn offers_and_coupons_get_sequential_ids() {
    let mut dashboard = Dashboard::seeded();

    let offer = dashboard
        .create_offer(OfferDraft {
            title: "Festive".to_string(),
            offer_type: OfferType::Fixed,
            value: "250".to_string(),
            start_at: "2026-03-01T00:00".to_string(),
            end_at: "2026-03-05T23:59".to_string(),
            product_ids: vec![1002, 1002],
        })
        .expect("offer");
    assert_eq!(offer.id, 2);
    assert_eq!(offer.product_ids.len(), 1);

    let coupon = dashboard
        .create_coupon(CouponDraft {
            code: "welcome5".to_string(),
            coupon_type: CouponType::Fixed,
            value: "5".to_string(),
            min_order: "500".to_string(),
            usage_limit: "100".to_string(),
            ..Default::default()
        })
        .expect("coupon");
    assert_eq!(coupon.id, 2);
    assert_eq!(coupon.code, "WELCOME5");
    assert_eq!(coupon.used_count, 0);
    assert_eq!(coupon.start_at, None);
}

#[test]
fn offer_dates_must_parse() {
    let mut dashboard = Dashboard::seeded();
    let err = dashboard
        .create_offer(OfferDraft {
            title: "Bad".to_string(),
            value: "10".to_string(),
            start_at: "tomorrow".to_string(),
            end_at: "2026-03-05T23:59".to_string(),
            ..Default::default()
        })
        .expect_err("rejected");
    assert_eq!(err.0, "Invalid date \"tomorrow\", expected YYYY-MM-DDTHH:MM.");

    let err = dashboard.create_offer(OfferDraft::default()).expect_err("rejected");
    assert_eq!(err.0, "Offer title, value, start and end date are required.");
    assert_eq!(dashboard.offers.len(), 1);
}

#[test]
fn coupon_requires_numeric_fields() {
    let mut dashboard = Dashboard::seeded();
    let err = dashboard
        .create_coupon(CouponDraft {
            code: "X".to_string(),
            value: "10".to_string(),
            min_order: "".to_string(),
            usage_limit: "5".to_string(),
            ..Default::default()
        })
        .expect_err("rejected");
    assert_eq!(err.0, "Coupon code, value, min order, and usage limit are required.");
}

#[test]
fn removing_product_unlinks_it_from_offers() {
    let mut dashboard = Dashboard::seeded();
    assert!(dashboard.offers[0].product_ids.contains(&1001));

    dashboard.remove_product(1001).expect("removed");
    assert!(dashboard.offers.iter().all(|o| !o.product_ids.contains(&1001)));
    assert!(dashboard.remove_product(1001).is_none());
}

#[test]
fn removing_offer_clears_product_references() {
    let mut dashboard = Dashboard::seeded();
    assert_eq!(dashboard.products.iter().find(|p| p.id == 1001).and_then(|p| p.offer_id), Some(1));

    dashboard.remove_offer(1).expect("removed");
    assert!(dashboard.products.iter().all(|p| p.offer_id.is_none()));
}

#[test]
fn assign_offer_replaces_single_reference() {
    let mut dashboard = Dashboard::seeded();
    let product = dashboard.assign_offer(1002, Some(1)).expect("product");
    assert_eq!(product.offer_id, Some(1));

    let product = dashboard.assign_offer(1002, None).expect("product");
    assert_eq!(product.offer_id, None);
    assert!(dashboard.assign_offer(4242, Some(1)).is_none());
}

#[test]
fn toggles_flip_active_flags() {
    let mut dashboard = Dashboard::seeded();
    assert!(!dashboard.toggle_product_active(1001).expect("product").active);
    assert!(!dashboard.toggle_offer_active(1).expect("offer").active);
    assert!(!dashboard.toggle_coupon_active(1).expect("coupon").active);
    assert_eq!(dashboard.summary().coupons_live, 0);
    assert!(dashboard.toggle_coupon_active(1).expect("coupon").active);
}

#[test]
fn order_filters_combine_status_and_search() {
    let dashboard = Dashboard::seeded();

    let packed = dashboard.filter_orders(Some(OrderStatus::Packed), None);
    assert_eq!(packed.iter().map(|o| o.id).collect::<Vec<_>>(), vec![31021]);

    let by_phone = dashboard.filter_orders(None, Some("98111"));
    assert_eq!(by_phone[0].id, 31020);

    let by_name = dashboard.filter_orders(None, Some("  ANANYA "));
    assert_eq!(by_name[0].id, 31019);

    assert!(dashboard.filter_orders(Some(OrderStatus::Shipped), Some("ananya")).is_empty());
    assert_eq!(dashboard.filter_orders(None, Some("")).len(), 3);

    let by_id = dashboard.filter_orders(None, Some("31020"));
    assert_eq!(by_id.iter().map(|o| o.id).collect::<Vec<_>>(), vec![31020]);
}

#[test]
fn order_status_changes_are_unconstrained() {
    let mut dashboard = Dashboard::seeded();
    let order = dashboard
        .update_order_status(31020, OrderStatus::Created)
        .expect("order");
    assert_eq!(order.status, OrderStatus::Created);
    assert!(dashboard.update_order_status(1, OrderStatus::Paid).is_none());
}
