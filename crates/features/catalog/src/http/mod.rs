mod handlers;
mod models;

use chub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub use models::{CraftRequest, MaterialRequest, MaterialResponse};

/// `/materials`, `/crafts` and `/crafts/{id}/materials`.
pub fn catalog_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::create_material, handlers::list_materials))
        .routes(routes!(handlers::create_craft))
        .routes(routes!(handlers::craft_materials))
}
