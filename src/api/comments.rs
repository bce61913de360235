use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::domain;
use crate::entities::{comment, recipe, user};
use crate::models::{CommentRequest, CommentView};
use actix_web::{web, HttpResponse, Result as ActixResult};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use serde_json::json;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/recipes/{recipe_id}/comments",
    request_body = CommentRequest,
    params(
        ("recipe_id" = i64, Path, description = "Recipe id")
    ),
    responses(
        (status = 201, description = "Comment created", body = CommentView),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found"),
        (status = 409, description = "Author already commented this recipe")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "comments"
)]
pub async fn create_comment(
    path: web::Path<i64>,
    req: web::Json<CommentRequest>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let recipe_id = path.into_inner();

    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let recipe = match recipe::Entity::find_by_id(recipe_id)
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
    {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "Recipe not found"
            })));
        }
    };

    // One comment per author per recipe; the unique key backstops this
    // check against races.
    let comments = recipe
        .find_related(comment::Entity)
        .all(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if domain::comment_from_author(&comments, auth.user_id).is_some() {
        return Ok(HttpResponse::Conflict().json(json!({
            "error": "You already commented this recipe"
        })));
    }

    let new_comment = comment::ActiveModel {
        rating: sea_orm::Set(req.rating),
        content: sea_orm::Set(req.content.clone()),
        author_id: sea_orm::Set(auth.user_id),
        recipe_id: sea_orm::Set(recipe_id),
        ..Default::default()
    };

    let comment = comment::Entity::insert(new_comment)
        .exec_with_returning(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let author_name = user::Entity::find_by_id(auth.user_id)
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .map(|u| u.full_name())
        .unwrap_or_default();

    Ok(HttpResponse::Created().json(CommentView::build(comment, author_name)))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/comments",
    params(
        ("recipe_id" = i64, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Comments for the recipe", body = Vec<CommentView>),
        (status = 404, description = "Recipe not found")
    ),
    tag = "comments"
)]
pub async fn get_comments(
    path: web::Path<i64>,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let recipe_id = path.into_inner();

    let recipe_exists = recipe::Entity::find_by_id(recipe_id)
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .is_some();

    if !recipe_exists {
        return Ok(HttpResponse::NotFound().json(json!({
            "error": "Recipe not found"
        })));
    }

    let comments = comment::Entity::find()
        .filter(comment::Column::RecipeId.eq(recipe_id))
        .order_by_desc(comment::Column::CreatedAt)
        .all(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let mut views = Vec::new();
    for comment in comments {
        let author_name = user::Entity::find_by_id(comment.author_id)
            .one(pool.get_ref())
            .await
            .map_err(actix_web::error::ErrorInternalServerError)?
            .map(|u| u.full_name())
            .unwrap_or_default();
        views.push(CommentView::build(comment, author_name));
    }

    Ok(HttpResponse::Ok().json(views))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    params(
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted from both owning collections"),
        (status = 403, description = "Neither comment author nor recipe author"),
        (status = 404, description = "Comment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    path: web::Path<i64>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let comment_id = path.into_inner();

    let comment = match comment::Entity::find_by_id(comment_id)
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
    {
        Some(c) => c,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "Comment not found"
            })));
        }
    };

    let recipe_author_id = recipe::Entity::find_by_id(comment.recipe_id)
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .map(|r| r.author_id);

    let is_comment_author = comment.author_id == auth.user_id;
    let is_recipe_author = recipe_author_id == Some(auth.user_id);

    if !is_comment_author && !is_recipe_author {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only delete your own comments"
        })));
    }

    // Orphan removal: the row goes away, so the comment is unreachable
    // from both the recipe and the author afterwards.
    comment
        .delete(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::NoContent().finish())
}
