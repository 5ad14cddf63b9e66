use actix_web::{HttpResponse, web};
use log::error;

use crate::state::app_state::AppState;

/// Liveness probe, useful for poking the server to see if it's alive
pub async fn ping() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    // Perform a simple ping operation to check the database connection
    match state.store.ping().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "success": false, "error": "Database connection failed" }))
        }
    }
}
