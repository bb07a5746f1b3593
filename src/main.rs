use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};

mod api;
mod client;
mod config;
mod forms;
mod model;
mod pages;
mod routes;
mod shell;
mod tables;
mod utils;
mod views;

use client::ApiClient;
use config::Config;

use tracing::info;
use tracing_appender::rolling;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    let api = Data::new(ApiClient::new(Some(config.api_base_url.clone()))?);

    info!(
        server_addr = %config.server_addr,
        api_base_url = api.get_base_url(),
        "Server starting..."
    );

    HttpServer::new(move || {
        let api = api.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(|cfg| routes::configure(cfg, api))
    })
    .bind(&config.server_addr)?
    .run()
    .await?;

    Ok(())
}
