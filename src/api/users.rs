use crate::auth::{hash_password, verify_password, AuthenticatedUser};
use crate::db::DbPool;
use crate::domain;
use crate::entities::user;
use crate::models::{UpdateAvatarRequest, UpdatePasswordRequest, UpdateUserRequest, UserProfile};
use actix_web::{web, HttpResponse, Result as ActixResult};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait};
use serde_json::json;
use validator::Validate;

async fn find_user(pool: &DbPool, user_id: i64) -> ActixResult<Option<user::Model>> {
    user::Entity::find_by_id(user_id)
        .one(pool)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(path: web::Path<i64>, pool: web::Data<DbPool>) -> ActixResult<HttpResponse> {
    let user_id = path.into_inner();

    match find_user(pool.get_ref(), user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserProfile::from(user))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "User not found"
        }))),
    }
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    request_body = UpdateUserRequest,
    params(
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn update_user(
    path: web::Path<i64>,
    req: web::Json<UpdateUserRequest>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let user_id = path.into_inner();

    if auth.user_id != user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only update your own profile"
        })));
    }

    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let user = match find_user(pool.get_ref(), user_id).await? {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "User not found"
            })));
        }
    };

    // An explicitly supplied slug wins; an absent one keeps the stored
    // value, and a cleared one is re-derived from the new name.
    let slug = domain::ensure_user_slug(
        req.slug.as_deref().unwrap_or(&user.slug),
        &req.first_name,
        &req.last_name,
    );

    let mut active: user::ActiveModel = user.into();
    active.first_name = sea_orm::Set(req.first_name.clone());
    active.last_name = sea_orm::Set(req.last_name.clone());
    active.presentation = sea_orm::Set(req.presentation.clone());
    active.slug = sea_orm::Set(slug);

    let updated = active
        .update(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(UserProfile::from(updated)))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/password",
    request_body = UpdatePasswordRequest,
    params(
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Current password incorrect"),
        (status = 403, description = "Not your profile")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn update_password(
    path: web::Path<i64>,
    req: web::Json<UpdatePasswordRequest>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let user_id = path.into_inner();

    if auth.user_id != user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only change your own password"
        })));
    }

    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let user = match find_user(pool.get_ref(), user_id).await? {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "User not found"
            })));
        }
    };

    let is_valid = verify_password(&req.current_password, &user.password)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if !is_valid {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "error": "Current password incorrect"
        })));
    }

    let password =
        hash_password(&req.password).map_err(actix_web::error::ErrorInternalServerError)?;

    let mut active: user::ActiveModel = user.into();
    active.password = sea_orm::Set(password);
    active
        .update(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password updated"
    })))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/avatar",
    request_body = UpdateAvatarRequest,
    params(
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Avatar updated", body = UserProfile),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn update_avatar(
    path: web::Path<i64>,
    req: web::Json<UpdateAvatarRequest>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let user_id = path.into_inner();

    if auth.user_id != user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only update your own avatar"
        })));
    }

    let user = match find_user(pool.get_ref(), user_id).await? {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "User not found"
            })));
        }
    };

    // The upload collaborator already stored the file; keep the
    // reference verbatim.
    let mut active: user::ActiveModel = user.into();
    active.picture = sea_orm::Set(Some(req.picture.clone()));

    let updated = active
        .update(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(UserProfile::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted, recipes and comments cascade"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn delete_user(
    path: web::Path<i64>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let user_id = path.into_inner();

    if auth.user_id != user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only delete your own account"
        })));
    }

    let user = match find_user(pool.get_ref(), user_id).await? {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "User not found"
            })));
        }
    };

    // Recipes and comments go with the account through the FK cascades.
    user.delete(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::NoContent().finish())
}
