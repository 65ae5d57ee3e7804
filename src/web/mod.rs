//! HTTP surface over the immutable dataset snapshot.
//!
//! Thin by design: handlers ask the resolver for an outcome and render it.
//! Every miss becomes a navigable 404 page; unmatched routes fall back to a
//! generic 404. Nothing here mutates the snapshot.

pub mod pages;

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Path as RoutePath, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::dataset::{AgeLookup, CategoryLookup, Dataset};

/// Build the application router around a loaded snapshot.
pub fn router(dataset: Arc<Dataset>, image_root: &Path) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/age", get(age_root))
        .route("/age/:age", get(age_page))
        .route("/drug_type", get(category_root))
        .route("/drug_type/:name", get(category_page))
        .route("/drug_frequency", get(frequency_root))
        .route("/drug_frequency/:name", get(frequency_page))
        .nest_service("/static/img", ServeDir::new(image_root))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(dataset)
}

async fn home(State(dataset): State<Arc<Dataset>>) -> Html<String> {
    let first_age = dataset
        .ages()
        .min()
        .map(|n| n.to_string())
        .unwrap_or_default();
    let first_category = dataset.categories().first().cloned().unwrap_or_default();
    Html(pages::home(&first_age, &first_category))
}

async fn age_root(State(dataset): State<Arc<Dataset>>) -> Response {
    match dataset.ages().min() {
        Some(first) => Redirect::to(&format!("/age/{first}")).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "No age data found").into_response(),
    }
}

async fn age_page(
    State(dataset): State<Arc<Dataset>>,
    RoutePath(raw): RoutePath<String>,
) -> Response {
    match dataset.resolve_age(&raw) {
        AgeLookup::Resolved(hit) => {
            let usage = dataset.positive_use_by_category(hit.record);
            let image = dataset.age_image(&hit.key);
            Html(pages::age(&hit.key, &usage, image, &hit.neighbors)).into_response()
        }
        AgeLookup::NotFound(miss) => (
            StatusCode::NOT_FOUND,
            Html(pages::error(
                &format!("Age {}", miss.key),
                &miss.message,
                "age",
                &miss.neighbors,
            )),
        )
            .into_response(),
    }
}

async fn category_root(State(dataset): State<Arc<Dataset>>) -> Response {
    match dataset.categories().first() {
        Some(first) => Redirect::to(&format!("/drug_type/{first}")).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "No drug type data found").into_response(),
    }
}

async fn category_page(
    State(dataset): State<Arc<Dataset>>,
    RoutePath(raw): RoutePath<String>,
) -> Response {
    match dataset.resolve_category(&raw) {
        CategoryLookup::Resolved(hit) => {
            let usage = dataset.positive_use_by_age(&hit.key);
            let image = dataset.category_image(&hit.key);
            Html(pages::category(&hit.key, &usage, image, &hit.neighbors)).into_response()
        }
        CategoryLookup::NotFound(miss) => (
            StatusCode::NOT_FOUND,
            Html(pages::error(
                &format!("Drug Type \"{}\"", miss.key),
                &miss.message,
                "drug_type",
                &miss.neighbors,
            )),
        )
            .into_response(),
    }
}

async fn frequency_root(State(dataset): State<Arc<Dataset>>) -> Response {
    match dataset.categories().first() {
        Some(first) => Redirect::to(&format!("/drug_frequency/{first}")).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "No frequency data found").into_response(),
    }
}

async fn frequency_page(
    State(dataset): State<Arc<Dataset>>,
    RoutePath(raw): RoutePath<String>,
) -> Response {
    match dataset.resolve_category(&raw) {
        CategoryLookup::Resolved(hit) => {
            let frequencies = dataset.frequency_by_age(&hit.key);
            Html(pages::frequency(&hit.key, &frequencies, &hit.neighbors)).into_response()
        }
        CategoryLookup::NotFound(miss) => (
            StatusCode::NOT_FOUND,
            Html(pages::error(
                &format!("Drug Frequency \"{}\"", miss.key),
                &miss.message,
                "drug_frequency",
                &miss.neighbors,
            )),
        )
            .into_response(),
    }
}

async fn not_found(uri: Uri) -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found(&uri.to_string()))).into_response()
}
