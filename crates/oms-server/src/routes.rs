//! URL table for every page and API endpoint.

use std::time::Duration;

use axum::Router;
use axum::http::{Method, header};
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::pages::{
    dashboard, expenses, inventory, ledgers, onboarding, purchase, shorting, stitching, users,
    vouchers, weaver,
};
use crate::state::AppState;

const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(CORS_MAX_AGE)
}

fn production_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::production))
        .route("/weaver-challans", get(weaver::list).post(weaver::create))
        .route(
            "/weaver-challans/{id}",
            get(weaver::detail).post(weaver::update),
        )
        .route(
            "/isteaching-challans",
            get(stitching::list).post(stitching::create),
        )
        .route(
            "/isteaching-challans/{id}",
            get(stitching::detail).post(stitching::update),
        )
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::detail).post(expenses::update),
        )
        .route(
            "/payment-vouchers",
            get(vouchers::list).post(vouchers::create),
        )
        .route(
            "/payment-vouchers/{id}",
            get(vouchers::detail).post(vouchers::update),
        )
        .route("/payment-vouchers/{id}/logs", get(vouchers::logs))
        .route(
            "/shorting-entries",
            get(shorting::list).post(shorting::create),
        )
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::home))
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", get(users::detail).post(users::update))
        .route("/ledgers", get(ledgers::list).post(ledgers::create))
        .route(
            "/ledgers/{ledger_id}",
            get(ledgers::detail).post(ledgers::update),
        )
        .route("/ledgers/{ledger_id}/logs", get(ledgers::logs))
        .route("/purchase", get(purchase::list).post(purchase::create))
        .route(
            "/purchase/{id}",
            get(purchase::detail).post(purchase::update),
        )
        .route("/inventory/convert", get(inventory::convert))
        .route(
            "/inventory/products",
            get(inventory::products).post(inventory::create_product),
        )
        .route("/inventory/{classification}", get(inventory::classified))
        .nest("/production", production_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory/classify", post(inventory::classify))
        .route("/products/{id}", get(inventory::product_api))
        .route(
            "/barcode/isteaching-challan/{id}",
            get(stitching::barcodes),
        )
}

/// Build the application router with tracing and CORS layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route(
            "/onboarding",
            get(onboarding::show).post(onboarding::submit),
        )
        .route("/print/ledgers/{ledger_id}", get(ledgers::print))
        .nest("/dashboard", dashboard_routes())
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}
