use crate::api::routes::configure_routes;
use crate::settings::Settings;
use actix_web::{web, App, HttpServer};

pub async fn start_server(bind: &str, settings: Settings) -> std::io::Result<()> {
    let settings = web::Data::new(settings);
    HttpServer::new(move || {
        App::new()
            .app_data(settings.clone())
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
