use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use env_logger::Env;
use rupoll::store::sea::SeaPollStore;
use rupoll::store::SharedStore;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set.");
    let db = rupoll::db::connect(&database_url)
        .await
        .expect("Failed to connect to the database.");
    rupoll::db::ensure_schema(&db)
        .await
        .expect("Failed to prepare the database schema.");

    let store: SharedStore = Arc::new(SeaPollStore::new(db));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    log::info!("listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(store.clone()))
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::NOT_FOUND, rupoll::web::error::render_404)
                    .handler(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        rupoll::web::error::render_500,
                    ),
            )
            .wrap(Logger::new("%a %{User-Agent}i"))
            .configure(rupoll::web::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
