#![warn(clippy::all, clippy::pedantic)]

use std::env;

use actix_web::{App, HttpServer, web};
use tracing::info;
use uppe_service::{Config, Orchestrator};

mod badge;
mod error;
mod routes;

use error::AppError;

fn get_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(val) => val.parse().unwrap_or(default),
        Err(_) => default,
    }
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    logger::init();

    let config_path = env::var("UPPE_CONFIG").ok();
    let mut config = Config::from_config(config_path.as_deref())?;
    config.server.bind = get_env_var("BIND", config.server.bind);
    config.server.port = get_env_var("PORT", config.server.port);

    let orchestrator = web::Data::new(Orchestrator::new(config.monitoring.clone())?);
    let seeded = orchestrator.seed(&config.endpoints).await;
    info!("Registered {} endpoints from configuration", seeded.len());
    orchestrator.start_scheduler();

    run_server(&config, orchestrator).await
}

async fn run_server(config: &Config, orchestrator: web::Data<Orchestrator>) -> Result<(), AppError> {
    let addr = (config.server.bind.clone(), config.server.port);
    info!("Listening on {}:{}", addr.0, addr.1);

    HttpServer::new(move || App::new().app_data(orchestrator.clone()).configure(routes::configure))
        .bind(addr)?
        .run()
        .await?;

    Ok(())
}
