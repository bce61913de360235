use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::entities::ingredient;
use crate::models::{IngredientRequest, IngredientView};
use actix_web::{web, HttpResponse, Result as ActixResult};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::json;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/ingredients",
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientView),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Name already used")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "ingredients"
)]
pub async fn create_ingredient(
    req: web::Json<IngredientRequest>,
    _auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let existing = ingredient::Entity::find()
        .filter(ingredient::Column::Name.eq(&req.name))
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if existing.is_some() {
        return Ok(HttpResponse::Conflict().json(json!({
            "error": "Ingredient already exists"
        })));
    }

    let new_ingredient = ingredient::ActiveModel {
        name: sea_orm::Set(req.name.clone()),
        ..Default::default()
    };

    let ingredient = ingredient::Entity::insert(new_ingredient)
        .exec_with_returning(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Created().json(IngredientView::from(ingredient)))
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    responses(
        (status = 200, description = "Ingredient catalogue", body = Vec<IngredientView>)
    ),
    tag = "ingredients"
)]
pub async fn get_ingredients(pool: web::Data<DbPool>) -> ActixResult<HttpResponse> {
    let ingredients: Vec<IngredientView> = ingredient::Entity::find()
        .order_by_asc(ingredient::Column::Name)
        .all(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .into_iter()
        .map(IngredientView::from)
        .collect();

    Ok(HttpResponse::Ok().json(ingredients))
}
