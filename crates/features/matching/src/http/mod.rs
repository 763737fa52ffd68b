mod handlers;
mod models;

use axum::extract::DefaultBodyLimit;
use chub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub use models::CraftResponse;

/// `POST /vision`, accepting request bodies up to `max_upload_bytes`.
pub fn matching_router(max_upload_bytes: usize) -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::match_photo))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
