extern crate diesel;
extern crate dotenv;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::RequestHead;
use actix_web::http::header::HeaderValue;
use actix_web::{web, App, HttpServer};

use diesel_async::pooled_connection::{bb8::Pool, AsyncDieselConnectionManager};
use diesel_async::AsyncPgConnection;

use treasure_server::api::{admin, monitor, report, submission};
use treasure_server::store::PgStore;
use treasure_server::util::cache::Cache;

use log::warn;
use treasure_server::DbPool;

fn cors_check(head: &HeaderValue, _: &RequestHead) -> bool {
    if let Ok(origin) = head.to_str() {
        match origin {
            "https://treasure-in-the-shell.netlify.app" => true,
            "http://localhost:5173" => true,
            "http://localhost:8080" => true,
            url => url.ends_with("treasure-in-shell.netlify.app"), // for deploy preview
        }
    } else {
        false
    }
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool: DbPool = Pool::builder()
        .build(manager)
        .await
        .expect("Failed to link to db");

    if let Ok(mode) = std::env::var("MODE") {
        if mode == "dev" {
            warn!("Under development mode.");
        }
    }

    let store = PgStore::new(Arc::new(pool));
    let cache = Arc::new(Cache::new(store.clone()));

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::from(cache.clone()))
            .wrap(
                Cors::default()
                    .allowed_origin_fn(cors_check)
                    .allow_any_header()
                    .allow_any_method(),
            )
            .service(submission::submit)
            .service(submission::list_submissions)
            .service(submission::count)
            .service(monitor::dashboard)
            .service(monitor::leaderboard)
            .service(monitor::victory)
            .service(report::summary)
            .service(report::report)
            .service(admin::reset)
    })
    .bind("0.0.0.0:9000")?
    .run()
    .await
}
