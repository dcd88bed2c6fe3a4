use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uppe_service::{CheckResult, Endpoint, NewEndpoint, Orchestrator};
use uuid::Uuid;

use crate::error::ApiError;

macros_utils::routes! {
    route list_endpoints,
    route create_endpoint,
    route delete_endpoint,
    route endpoint_stats,
}

/// An endpoint together with its recorded checks
#[derive(Debug, Serialize)]
struct EndpointView {
    #[serde(flatten)]
    endpoint: Endpoint,
    checks: Vec<CheckResult>,
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    id: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

#[get("/endpoints")]
pub async fn list_endpoints(orchestrator: web::Data<Orchestrator>) -> HttpResponse {
    let endpoints: Vec<EndpointView> = orchestrator
        .list_with_history()
        .await
        .into_iter()
        .map(|(endpoint, checks)| EndpointView { endpoint, checks })
        .collect();

    HttpResponse::Ok().json(endpoints)
}

#[post("/endpoints")]
pub async fn create_endpoint(
    orchestrator: web::Data<Orchestrator>,
    body: web::Json<NewEndpoint>,
) -> Result<HttpResponse, ApiError> {
    let endpoint = orchestrator.register_endpoint(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(EndpointView { endpoint, checks: Vec::new() }))
}

#[delete("/endpoints")]
pub async fn delete_endpoint(
    orchestrator: web::Data<Orchestrator>,
    query: web::Query<DeleteQuery>,
) -> Result<HttpResponse, ApiError> {
    let raw = query.id.as_deref().filter(|id| !id.is_empty()).ok_or(ApiError::MissingId)?;

    if !orchestrator.remove_endpoint(parse_id(raw)?).await {
        return Err(ApiError::NotFound);
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[get("/endpoints/{id}/stats")]
pub async fn endpoint_stats(
    orchestrator: web::Data<Orchestrator>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let stats = orchestrator.get_stats(parse_id(&path)?).await.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(stats))
}
