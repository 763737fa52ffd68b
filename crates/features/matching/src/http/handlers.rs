use super::models::CraftResponse;
use crate::Matching;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use chub_derive::api_handler;
use chub_domain::constants::MATCHING_TAG;
use chub_kernel::server::error::{ApiError, ApiResult};
use chub_kernel::server::state::ApiState;
use chub_vision::ImageUpload;

/// Multipart field carrying the image.
const PHOTO_FIELD: &str = "photo";

#[api_handler(
    post,
    path = "/vision",
    request_body(content_type = "multipart/form-data", description = "Image in the `photo` field"),
    responses(
        (status = OK, description = "Crafts whose materials exactly match the detected labels", body = Vec<CraftResponse>),
        (status = BAD_REQUEST, description = "No photo in the form"),
        (status = PAYLOAD_TOO_LARGE, description = "Upload exceeds the configured limit"),
        (status = INTERNAL_SERVER_ERROR, description = "Detector unavailable"),
    ),
    tag = MATCHING_TAG,
)]
pub(super) async fn match_photo(
    State(state): State<ApiState>,
    multipart: Multipart,
) -> ApiResult<Json<Vec<CraftResponse>>> {
    let matching = state.try_get_slice::<Matching>()?;
    let photo = read_photo(multipart).await?;

    let crafts = matching.engine.match_image(photo).await?;
    Ok(Json(crafts.into_iter().map(CraftResponse::from).collect()))
}

async fn read_photo(mut multipart: Multipart) -> ApiResult<ImageUpload> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or(PHOTO_FIELD).to_owned();
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let mut upload = ImageUpload::new(filename, bytes);
        upload.content_type = content_type;
        return Ok(upload);
    }

    Err(ApiError::bad_request("missing `photo` field"))
}

fn multipart_error(err: MultipartError) -> ApiError {
    let message = err.body_text();
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { message: message.into(), context: None }
    } else {
        ApiError::BadRequest { message: message.into(), context: Some("Reading multipart form".into()) }
    }
}
