use actix_cors::Cors;
use actix_web::{
    middleware::Logger,
    web,
    web::{resource, Data},
    App, HttpResponse, HttpServer,
};
use dotenv::dotenv;

mod actions;
mod client;
mod config;
mod errortype;
mod formatter;
mod middleware;
mod models;
mod resolver;
mod routes;


use config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let backlog = client::backlog::Client::new(&config);
    let slack = client::slack::Client::new(&config);
    let bind = (config.bind_ip.clone(), config.bind_port);

    // /setup is the guarded slash-command flow; every other path takes the
    // webhook dispatcher, so registered hook URLs are free to vary.
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(backlog.clone()))
            .app_data(Data::new(slack.clone()))
            .service(
                resource("/setup")
                    .route(web::post().to(routes::setup::post))
                    .default_service(web::route().to(not_allowed)),
            )
            .default_service(web::route().to(routes::event::post))
    })
    .bind(bind)?
    .run()
    .await
}

pub(crate) async fn not_allowed() -> HttpResponse {
    HttpResponse::BadRequest().body("not allowed")
}
