use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    backend::BackendUser,
    domain::{
        cart::{CartState, CartTotals},
        catalog::CatalogCard,
        checkout::CheckoutForm,
        dashboard::{CouponDraft, DashboardSummary, OfferDraft, ProductDraft},
    },
    dto::{
        admin::{
            AssignOfferRequest, CouponList, ManagedProductDraft, ManagedProductList, OfferList,
            OrderList, ProductList, UpdateOrderStatusRequest,
        },
        auth::{
            EmailRequest, LoginRequest, LoginResponse, SessionResponse, SignupRequest,
            SignupResponse, UpdatePasswordRequest,
        },
        cart::{CartView, MergeCartRequest, SetQuantityRequest},
        catalog::{CatalogList, CategoryList, CustomerOrderList, ProductDetail},
        checkout::{AddressList, CheckoutPrefill, CheckoutSummary},
    },
    models::{
        AdminCoupon, AdminOffer, AdminOrder, AdminProduct, CartLineItem, CatalogCategory,
        CatalogProduct, CategoryRef, CouponType, CustomerOrder, CustomerOrderItem, ManagedProduct,
        OfferType, OrderStatus, PaymentStatus, SavedAddress,
    },
    response::{Ack, ApiResponse, Meta},
    routes::{admin, auth, cart, catalog, checkout, health, orders, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::signup,
        auth::magic_link,
        auth::reset_password,
        auth::update_password,
        auth::logout,
        auth::session,
        cart::create_cart,
        cart::get_cart,
        cart::delete_cart,
        cart::set_quantity,
        cart::remove_item,
        cart::save_for_later,
        cart::restore_saved,
        cart::remove_saved,
        cart::merge_cart,
        checkout::list_addresses,
        checkout::prefill,
        checkout::submit_checkout,
        catalog::list_products,
        catalog::get_product,
        catalog::list_categories,
        orders::list_orders,
        admin::summary,
        admin::list_orders,
        admin::update_order_status,
        admin::list_products,
        admin::create_product,
        admin::toggle_product,
        admin::assign_offer,
        admin::remove_product,
        admin::list_offers,
        admin::create_offer,
        admin::toggle_offer,
        admin::remove_offer,
        admin::list_coupons,
        admin::create_coupon,
        admin::toggle_coupon,
        admin::remove_coupon,
        admin::list_catalog_products,
        admin::create_catalog_product,
        admin::archive_catalog_product
    ),
    components(
        schemas(
            BackendUser,
            CartLineItem,
            CartState,
            CartTotals,
            CartView,
            SetQuantityRequest,
            MergeCartRequest,
            CheckoutForm,
            AddressList,
            CheckoutPrefill,
            CheckoutSummary,
            SavedAddress,
            CatalogCard,
            CatalogList,
            CatalogProduct,
            CatalogCategory,
            CategoryRef,
            CategoryList,
            ProductDetail,
            CustomerOrder,
            CustomerOrderItem,
            CustomerOrderList,
            AdminOrder,
            AdminProduct,
            AdminOffer,
            AdminCoupon,
            ManagedProduct,
            OrderStatus,
            PaymentStatus,
            OfferType,
            CouponType,
            ProductDraft,
            OfferDraft,
            CouponDraft,
            ManagedProductDraft,
            DashboardSummary,
            UpdateOrderStatusRequest,
            AssignOfferRequest,
            OrderList,
            ProductList,
            OfferList,
            CouponList,
            ManagedProductList,
            LoginRequest,
            SignupRequest,
            EmailRequest,
            UpdatePasswordRequest,
            LoginResponse,
            SignupResponse,
            SessionResponse,
            params::OrderListQuery,
            params::CatalogQuery,
            params::CatalogSort,
            health::HealthData,
            Ack,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<CatalogList>,
            ApiResponse<DashboardSummary>,
            ApiResponse<LoginResponse>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Cart", description = "Cart session endpoints"),
        (name = "Checkout", description = "Checkout form endpoints"),
        (name = "Catalog", description = "Storefront catalog endpoints"),
        (name = "Orders", description = "Customer order endpoints"),
        (name = "Admin", description = "Admin console endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
