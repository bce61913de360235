use crate::auth::{create_token, hash_password, verify_password, Claims};
use crate::config::Config;
use crate::db::DbPool;
use crate::domain;
use crate::entities::user;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use actix_web::{web, HttpResponse, Result as ActixResult};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already in use")
    ),
    tag = "auth"
)]
pub async fn register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let existing_user = user::Entity::find()
        .filter(user::Column::Email.eq(&req.email))
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if existing_user.is_some() {
        return Ok(HttpResponse::Conflict().json(json!({
            "error": "email déjà utilisé merci d'en choisir un autre"
        })));
    }

    let password =
        hash_password(&req.password).map_err(actix_web::error::ErrorInternalServerError)?;

    // Slug is derived right before the insert, never afterwards.
    let slug = domain::ensure_user_slug(
        req.slug.as_deref().unwrap_or(""),
        &req.first_name,
        &req.last_name,
    );

    let new_user = user::ActiveModel {
        email: sea_orm::Set(req.email.clone()),
        roles: sea_orm::Set(json!([])),
        password: sea_orm::Set(password),
        first_name: sea_orm::Set(req.first_name.clone()),
        last_name: sea_orm::Set(req.last_name.clone()),
        slug: sea_orm::Set(slug),
        picture: sea_orm::Set(req.picture.clone()),
        presentation: sea_orm::Set(req.presentation.clone()),
        ..Default::default()
    };

    let user = user::Entity::insert(new_user)
        .exec_with_returning(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let claims = Claims::for_user(&user, config.jwt.expiration_hours);
    let token = create_token(&claims, &config.jwt.secret)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: UserProfile::from(user),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn login(
    req: web::Json<LoginRequest>,
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
) -> ActixResult<HttpResponse> {
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(&req.email))
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let user = match user {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "User not found"
            })));
        }
    };

    let is_valid = verify_password(&req.password, &user.password)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if !is_valid {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "error": "Invalid credentials"
        })));
    }

    // Token payload is enriched with the profile fields at issuance time.
    let claims = Claims::for_user(&user, config.jwt.expiration_hours);
    let token = create_token(&claims, &config.jwt.secret)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserProfile::from(user),
    }))
}
