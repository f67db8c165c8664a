//! Catalog service entry point.

use actix_web::{App, HttpServer, web};

use catalog_service::auth::JwtSecret;
use catalog_service::db::establish_connection_pool;
use catalog_service::models::config::ServerConfig;
use catalog_service::repository::DieselRepository;
use catalog_service::routes::{categories, products};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_config: ServerConfig = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()
        .and_then(|settings| settings.try_deserialize())
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    let pool = establish_connection_pool(&server_config.database_url)
        .map_err(std::io::Error::other)?;
    let repo = DieselRepository::new(pool);
    let jwt_secret = JwtSecret(server_config.jwt_secret.clone());

    log::info!(
        "Starting catalog server on {}:{}",
        server_config.bind_address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(jwt_secret.clone()))
            .service(products::list_products)
            .service(products::get_product)
            .service(products::create_product)
            .service(products::update_product)
            .service(products::delete_product)
            .service(categories::list_categories)
            .service(categories::get_category)
            .service(categories::create_category)
            .service(categories::update_category)
            .service(categories::delete_category)
    })
    .bind((server_config.bind_address.as_str(), server_config.port))?
    .run()
    .await
}
