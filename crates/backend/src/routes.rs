use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Brand handlers
        .route(
            "/api/brand",
            get(handlers::a001_brand::list_all).post(handlers::a001_brand::upsert),
        )
        .route("/api/brand/list", get(handlers::a001_brand::list_paginated))
        .route(
            "/api/brand/:id",
            get(handlers::a001_brand::get_by_id).delete(handlers::a001_brand::delete),
        )
        .route("/api/brand/:id/restore", post(handlers::a001_brand::restore))
        // A002 Category handlers
        .route(
            "/api/category",
            get(handlers::a002_category::list_all).post(handlers::a002_category::upsert),
        )
        .route(
            "/api/category/:id",
            get(handlers::a002_category::get_by_id).delete(handlers::a002_category::delete),
        )
        .route(
            "/api/category/:id/restore",
            post(handlers::a002_category::restore),
        )
        .route(
            "/api/category/:id/products",
            get(handlers::a002_category::products_of),
        )
        .route(
            "/api/category/:id/products/:product_id",
            post(handlers::a002_category::attach_product)
                .delete(handlers::a002_category::detach_product),
        )
        // A003 Customer handlers
        .route(
            "/api/customer",
            get(handlers::a003_customer::list_all).post(handlers::a003_customer::upsert),
        )
        .route(
            "/api/customer/list",
            get(handlers::a003_customer::list_paginated),
        )
        .route(
            "/api/customer/:id",
            get(handlers::a003_customer::get_by_id).delete(handlers::a003_customer::delete),
        )
        .route(
            "/api/customer/:id/restore",
            post(handlers::a003_customer::restore),
        )
        // A004 Product handlers
        .route(
            "/api/product",
            get(handlers::a004_product::list_all).post(handlers::a004_product::upsert),
        )
        .route(
            "/api/product/list",
            get(handlers::a004_product::list_paginated),
        )
        .route(
            "/api/product/:id",
            get(handlers::a004_product::get_by_id).delete(handlers::a004_product::delete),
        )
        .route(
            "/api/product/:id/restore",
            post(handlers::a004_product::restore),
        )
        // A005 Order handlers
        .route(
            "/api/order",
            get(handlers::a005_order::list_all).post(handlers::a005_order::upsert),
        )
        .route("/api/order/list", get(handlers::a005_order::list_paginated))
        .route(
            "/api/order/pending-badge",
            get(handlers::a005_order::pending_badge),
        )
        .route(
            "/api/order/:id",
            get(handlers::a005_order::get_by_id).delete(handlers::a005_order::delete),
        )
        .route("/api/order/:id/restore", post(handlers::a005_order::restore))
}
