//! Liveness probe.

use actix_web::{HttpResponse, get};

/// Report process liveness.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Process is alive")),
    tags = ["health"],
    operation_id = "live"
)]
#[get("/healthz")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().finish()
}
