use crate::models::PrintersResponse;
use crate::pipeline::printers::PRINTERS;
use axum::Json;

/// GET /api/v1/printers
pub async fn list_printers() -> Json<PrintersResponse> {
    Json(PrintersResponse {
        printers: PRINTERS.iter().collect(),
    })
}
