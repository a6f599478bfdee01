use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;

use scheme_predictor::config::Config;
use scheme_predictor::errors::json_error_handler;
use scheme_predictor::handlers;
use scheme_predictor::model::SchemeModel;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    // The model must be loaded before the listener binds; a bad artifact
    // is fatal, not a per-request error.
    let model = SchemeModel::load(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;
    log::info!("loaded model with {} classes", model.classes().len());

    let model = web::Data::new(model);
    log::info!("server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(model.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(handlers::routes)
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await?;

    Ok(())
}
