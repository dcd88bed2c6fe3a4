use actix_web::{HttpResponse, get, http::header, web};
use uppe_service::{BadgeState, Orchestrator};
use uuid::Uuid;

use crate::badge::render_badge;

macros_utils::routes! {
    route endpoint_badge,
}

/// SVG badge, `unknown` for ids that do not match an endpoint
#[get("/badge/{endpoint_id}")]
pub async fn endpoint_badge(
    orchestrator: web::Data<Orchestrator>,
    path: web::Path<String>,
) -> HttpResponse {
    let state = match Uuid::parse_str(&path) {
        Ok(id) => orchestrator.badge_state(id).await,
        Err(_) => BadgeState::unknown(),
    };

    HttpResponse::Ok()
        .content_type("image/svg+xml")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(render_badge(state))
}
