use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizforge_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(err) => {
            log::error!("failed to initialize application state: {}", err);
            std::process::exit(1);
        }
    };

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::parse_image)
            .service(handlers::parse_pdf)
            .service(handlers::get_quiz)
            .service(handlers::list_quizzes)
            .service(handlers::save_attempt)
            .service(handlers::get_attempt)
            .service(handlers::append_chat)
            .service(handlers::list_chats)
            .service(handlers::health_check)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
