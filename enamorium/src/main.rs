mod api;
mod app;
mod clients;
mod constants;
mod errors;
mod models;
mod store;
mod utils;

use actix_web::middleware::Logger;
use actix_web::{web, App as ActixWebApp, HttpServer};
use app::App;
use log::info;
use utils::logger::{log_fatal, log_success};

#[tokio::main]
async fn main() {
    let app = App::new().await.unwrap_or_else(|e| {
        log_fatal(format!("Could not start Enamorium. {}", e));
        std::process::exit(1);
    });
    let port = app.port();

    app.init();
    let app_web_data = web::Data::new(app);

    info!("Store: {:?}", app_web_data.config.store);

    let server = HttpServer::new(move || {
        ActixWebApp::new()
            .wrap(Logger::new("%a %r %s %b %{Referer}i %{User-Agent}i %T"))
            .wrap(app_web_data.cors())
            .wrap(app_web_data.session_middleware())
            .app_data(app_web_data.clone())
            .configure(api::configure)
    })
    .bind(("0.0.0.0", port))
    .unwrap_or_else(|e| panic!("Could not bind to port {}.\n{}", port, e));

    log_success(format!("Enamorium listening on port {}", port));

    server
        .run()
        .await
        .unwrap_or_else(|e| panic!("Could not run server on port {}.\n{}", port, e));
}
