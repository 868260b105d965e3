use actix_web::{App, HttpServer, middleware, web};

use mailforge::blob::BlobStore;
use mailforge::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    // Ensure data directory exists
    std::fs::create_dir_all("data").expect("Failed to create data directory");

    // Initialize database
    let pool = db::init_pool("data/app.db");
    db::run_migrations(&pool);

    // Disk store for uploaded image blobs, served back under /uploads
    let blob_store =
        BlobStore::new("data/uploads").expect("Failed to create upload directory");
    let uploads_dir = blob_store.root().to_path_buf();

    log::info!("Starting server at http://127.0.0.1:8080");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(blob_store.clone()))
            // Uploaded image blobs
            .service(actix_files::Files::new("/uploads", uploads_dir.clone()))
            .service(
                web::scope("/api")
                    .route(
                        "/getEmailLayout",
                        web::get().to(handlers::template_handlers::get_layout),
                    )
                    .route(
                        "/uploadEmailConfig",
                        web::post().to(handlers::template_handlers::create),
                    )
                    .route(
                        "/email/{id}",
                        web::get().to(handlers::template_handlers::read),
                    )
                    .route(
                        "/email/{id}",
                        web::put().to(handlers::template_handlers::update),
                    )
                    .route(
                        "/uploadImage",
                        web::post().to(handlers::upload_handlers::upload_image),
                    )
                    .route(
                        "/renderAndDownloadTemplate/{id}",
                        web::get().to(handlers::template_handlers::download),
                    ),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Not found" }))
            }))
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
