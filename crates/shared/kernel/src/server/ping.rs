use axum::Json;
use chub_derive::{api_handler, api_model};
use chub_domain::constants::SYSTEM_TAG;

#[api_model]
pub(super) struct PingResponse {
    message: &'static str,
}

#[api_handler(
    get,
    path = "/ping",
    responses((status = OK, description = "Connectivity check", body = PingResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}
