use super::models::{CraftRequest, MaterialRequest, MaterialResponse};
use crate::Catalog;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chub_derive::api_handler;
use chub_domain::catalog::CraftId;
use chub_domain::constants::CATALOG_TAG;
use chub_kernel::server::error::ApiResult;
use chub_kernel::server::state::ApiState;

#[api_handler(
    post,
    path = "/materials",
    request_body = MaterialRequest,
    responses(
        (status = OK, description = "Material registered"),
        (status = BAD_REQUEST, description = "Blank name or label"),
    ),
    tag = CATALOG_TAG,
)]
pub(super) async fn create_material(
    State(state): State<ApiState>,
    Json(request): Json<MaterialRequest>,
) -> ApiResult<StatusCode> {
    let catalog = state.try_get_slice::<Catalog>()?;
    catalog.registration.register_material(&request.name, &request.ml_label).await?;
    Ok(StatusCode::OK)
}

#[api_handler(
    get,
    path = "/materials",
    responses((status = OK, description = "All materials", body = Vec<MaterialResponse>)),
    tag = CATALOG_TAG,
)]
pub(super) async fn list_materials(
    State(state): State<ApiState>,
) -> ApiResult<Json<Vec<MaterialResponse>>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let materials = catalog.registration.list_materials().await?;
    Ok(Json(materials.into_iter().map(MaterialResponse::from).collect()))
}

#[api_handler(
    post,
    path = "/crafts",
    request_body = CraftRequest,
    responses(
        (status = OK, description = "Craft registered with its materials"),
        (status = BAD_REQUEST, description = "Blank field, no materials or unknown material ids"),
    ),
    tag = CATALOG_TAG,
)]
pub(super) async fn create_craft(
    State(state): State<ApiState>,
    Json(request): Json<CraftRequest>,
) -> ApiResult<StatusCode> {
    let catalog = state.try_get_slice::<Catalog>()?;
    catalog
        .registration
        .register_craft(&request.name, &request.description, &request.image_url, &request.material_ids)
        .await?;
    Ok(StatusCode::OK)
}

#[api_handler(
    get,
    path = "/crafts/{id}/materials",
    params(("id" = i64, Path, description = "Craft id")),
    responses(
        (status = OK, description = "Materials attached to the craft", body = Vec<MaterialResponse>),
        (status = NOT_FOUND, description = "Unknown craft"),
    ),
    tag = CATALOG_TAG,
)]
pub(super) async fn craft_materials(
    State(state): State<ApiState>,
    Path(id): Path<CraftId>,
) -> ApiResult<Json<Vec<MaterialResponse>>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let materials = catalog.registration.craft_materials(id).await?;
    Ok(Json(materials.into_iter().map(MaterialResponse::from).collect()))
}
