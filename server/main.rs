use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::{get, middleware, web, App, HttpServer, Responder};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[get("/healthz")]
async fn healthz() -> impl Responder {
    web::Json(Health { status: "ok" })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Get port from environment or default to 8080
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let dist_dir = env::var("DIST_DIR").unwrap_or_else(|_| "./dist".to_string());

    println!("Serving {dist_dir} on 0.0.0.0:{port}");

    HttpServer::new(move || {
        let index = PathBuf::from(&dist_dir).join("index.html");

        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(healthz)
            .service(
                Files::new("/", &dist_dir)
                    .index_file("index.html")
                    // Unknown paths get the app shell so client-side routes load
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let index = index.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let file = NamedFile::open_async(index).await?;
                            let res = file.into_response(&req);
                            Ok(ServiceResponse::new(req, res))
                        }
                    })),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
