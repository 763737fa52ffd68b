use super::{health, ping};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/health` and `/ping`, mounted at the root.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new()
        .routes(routes!(health::health_handler))
        .routes(routes!(ping::ping_handler))
}
