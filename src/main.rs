use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod api;
mod auth;
mod config;
mod db;
mod domain;
mod entities;
mod models;

use config::Config;
use db::create_mysql_pool;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().expect("Failed to load configuration");

    log::info!(
        "Starting server on {}:{}",
        config.server.host,
        config.server.port
    );

    let mysql_pool = create_mysql_pool(&config)
        .await
        .expect("Failed to create MySQL pool");

    log::info!("Database connection established");

    let openapi = api::ApiDoc::openapi();

    let server_host = config.server.host.clone();
    let server_port = config.server.port;
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(mysql_pool.clone()))
            .route(
                "/api/docs",
                web::get().to(|| async {
                    actix_web::HttpResponse::PermanentRedirect()
                        .append_header(("Location", "/api/docs/"))
                        .finish()
                }),
            )
            .service(
                SwaggerUi::new("/api/docs/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(api::auth::register))
                            .route("/login", web::post().to(api::auth::login)),
                    )
                    .service(
                        web::scope("/users")
                            .route("/{user_id}", web::get().to(api::users::get_user))
                            .route("/{user_id}", web::put().to(api::users::update_user))
                            .route("/{user_id}", web::delete().to(api::users::delete_user))
                            .route(
                                "/{user_id}/password",
                                web::put().to(api::users::update_password),
                            )
                            .route(
                                "/{user_id}/avatar",
                                web::put().to(api::users::update_avatar),
                            ),
                    )
                    .service(
                        web::scope("/recipes")
                            .route("", web::post().to(api::recipes::create_recipe))
                            .route("", web::get().to(api::recipes::get_recipes))
                            .route("/{recipe_id}", web::get().to(api::recipes::get_recipe))
                            .route("/{recipe_id}", web::put().to(api::recipes::update_recipe))
                            .route(
                                "/{recipe_id}",
                                web::delete().to(api::recipes::delete_recipe),
                            )
                            .route(
                                "/{recipe_id}/image",
                                web::put().to(api::recipes::update_recipe_image),
                            )
                            .route(
                                "/{recipe_id}/ingredients/{ingredient_id}",
                                web::post().to(api::recipes::add_ingredient),
                            )
                            .route(
                                "/{recipe_id}/ingredients/{ingredient_id}",
                                web::delete().to(api::recipes::remove_ingredient),
                            )
                            .route(
                                "/{recipe_id}/comments",
                                web::post().to(api::comments::create_comment),
                            )
                            .route(
                                "/{recipe_id}/comments",
                                web::get().to(api::comments::get_comments),
                            ),
                    )
                    .service(
                        web::scope("/comments").route(
                            "/{comment_id}",
                            web::delete().to(api::comments::delete_comment),
                        ),
                    )
                    .service(
                        web::scope("/ingredients")
                            .route("", web::post().to(api::ingredients::create_ingredient))
                            .route("", web::get().to(api::ingredients::get_ingredients)),
                    ),
            )
    })
    .bind(format!("{}:{}", server_host, server_port))?
    .run()
    .await
}
