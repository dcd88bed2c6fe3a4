use actix_web::{error::JsonPayloadError, web};

use crate::error::ApiError;

mod api;
mod health;

macros_utils::routes! {
    configure health::routes,
    scope "/api" => api::routes,
}

/// Routes plus the extractor settings they rely on
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).configure(routes);
}

/// Malformed bodies get the same `{"error": ...}` shape as other failures
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        tracing::debug!("Rejected request body: {err}");
        ApiError::InvalidRequest.into()
    })
}
