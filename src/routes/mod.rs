pub mod analysis;
pub mod fields;

use crate::common::state::AppState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(state: &AppState) -> Router {
    #[derive(OpenApi)]
    #[openapi(info(
        title = "FieldScope API",
        description = "Field boundary records and NDVI vegetation-health snapshots from satellite imagery"
    ))]
    struct ApiDoc;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(crate::common::views::router(state)) // Root routes
        .merge(analysis::views::router(state))
        .nest("/api/fields", fields::views::router(state))
        .layer(cors)
        .split_for_parts();

    router.merge(Scalar::with_url("/api/docs", api))
}
