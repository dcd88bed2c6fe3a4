use actix_web::{HttpResponse, post, web};
use serde::Serialize;
use uppe_service::{Orchestrator, SweepEntry};

use crate::error::ApiError;

macros_utils::routes! {
    route run_checks,
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    checks: Vec<SweepEntry>,
}

/// Probe every endpoint now and return the fresh results
#[post("/check")]
pub async fn run_checks(orchestrator: web::Data<Orchestrator>) -> Result<HttpResponse, ApiError> {
    let checks = orchestrator.trigger_sweep().await.ok_or(ApiError::SweepInProgress)?;
    Ok(HttpResponse::Ok().json(CheckResponse { checks }))
}
