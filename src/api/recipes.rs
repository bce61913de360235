use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::domain;
use crate::entities::{comment, ingredient, recipe, recipe_ingredient, user};
use crate::models::{
    image_upload_allowed, AuthorView, CommentView, IngredientView, RecipeDetail,
    RecipeImageRequest, RecipeRequest, RecipeSummary,
};
use actix_web::{web, HttpResponse, Result as ActixResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct RecipeQuery {
    #[schema(example = 1)]
    pub page: Option<u64>,
    #[schema(example = 20)]
    pub limit: Option<u64>,
}

async fn find_recipe(pool: &DbPool, recipe_id: i64) -> ActixResult<Option<recipe::Model>> {
    recipe::Entity::find_by_id(recipe_id)
        .one(pool)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)
}

async fn author_view(pool: &DbPool, author_id: i64) -> ActixResult<AuthorView> {
    let author = user::Entity::find_by_id(author_id)
        .one(pool)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Recipe author missing"))?;
    Ok(AuthorView::from(&author))
}

async fn comment_views(
    pool: &DbPool,
    comments: Vec<comment::Model>,
) -> ActixResult<Vec<CommentView>> {
    let mut views = Vec::new();
    for comment in comments {
        let author_name = user::Entity::find_by_id(comment.author_id)
            .one(pool)
            .await
            .map_err(actix_web::error::ErrorInternalServerError)?
            .map(|u| u.full_name())
            .unwrap_or_default();
        views.push(CommentView::build(comment, author_name));
    }
    Ok(views)
}

async fn build_detail(pool: &DbPool, recipe: recipe::Model) -> ActixResult<RecipeDetail> {
    let author = author_view(pool, recipe.author_id).await?;

    let ingredients: Vec<IngredientView> = recipe
        .find_related(ingredient::Entity)
        .all(pool)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .into_iter()
        .map(IngredientView::from)
        .collect();

    let comments = recipe
        .find_related(comment::Entity)
        .all(pool)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let average_rating = domain::average_rating(&comments);
    let comments = comment_views(pool, comments).await?;

    Ok(RecipeDetail::build(
        recipe,
        author,
        ingredients,
        comments,
        average_rating,
    ))
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetail),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Title already used")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "recipes"
)]
pub async fn create_recipe(
    req: web::Json<RecipeRequest>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let existing = recipe::Entity::find()
        .filter(recipe::Column::Titre.eq(&req.titre))
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if existing.is_some() {
        return Ok(HttpResponse::Conflict().json(json!({
            "error": "titre déjà utilisé merci d'en choisir un autre"
        })));
    }

    // Slug is filled from the title just before the insert.
    let slug = domain::ensure_recipe_slug(req.slug.as_deref().unwrap_or(""), &req.titre);

    let new_recipe = recipe::ActiveModel {
        titre: sea_orm::Set(req.titre.clone()),
        description: sea_orm::Set(req.description.clone()),
        etapes: sea_orm::Set(req.etapes.clone()),
        types: sea_orm::Set(req.types.clone()),
        preptime: sea_orm::Set(req.preptime.clone()),
        cooktime: sea_orm::Set(req.cooktime.clone()),
        portion: sea_orm::Set(req.portion.clone()),
        img_recette: sea_orm::Set(req.img_recette.clone()),
        slug: sea_orm::Set(slug),
        author_id: sea_orm::Set(auth.user_id),
        ..Default::default()
    };

    let recipe = recipe::Entity::insert(new_recipe)
        .exec_with_returning(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let detail = build_detail(pool.get_ref(), recipe).await?;
    Ok(HttpResponse::Created().json(detail))
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of recipes", body = Vec<RecipeSummary>)
    ),
    tag = "recipes"
)]
pub async fn get_recipes(
    pool: web::Data<DbPool>,
    query: web::Query<RecipeQuery>,
) -> ActixResult<HttpResponse> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20);
    let offset = (page - 1) * limit;

    let recipes = recipe::Entity::find()
        .order_by_desc(recipe::Column::Date)
        .limit(limit)
        .offset(offset)
        .all(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let mut summaries = Vec::new();
    for recipe in recipes {
        let author = author_view(pool.get_ref(), recipe.author_id).await?;

        let comments = recipe
            .find_related(comment::Entity)
            .all(pool.get_ref())
            .await
            .map_err(actix_web::error::ErrorInternalServerError)?;

        summaries.push(RecipeSummary {
            id: recipe.id,
            titre: recipe.titre,
            slug: recipe.slug,
            date: recipe.date,
            types: recipe.types,
            img_recette: recipe.img_recette,
            author,
            average_rating: domain::average_rating(&comments),
        });
    }

    Ok(HttpResponse::Ok().json(summaries))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}",
    params(
        ("recipe_id" = i64, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetail),
        (status = 404, description = "Recipe not found")
    ),
    tag = "recipes"
)]
pub async fn get_recipe(
    path: web::Path<i64>,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let recipe_id = path.into_inner();

    match find_recipe(pool.get_ref(), recipe_id).await? {
        Some(recipe) => {
            let detail = build_detail(pool.get_ref(), recipe).await?;
            Ok(HttpResponse::Ok().json(detail))
        }
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "Recipe not found"
        }))),
    }
}

#[utoipa::path(
    put,
    path = "/api/recipes/{recipe_id}",
    request_body = RecipeRequest,
    params(
        ("recipe_id" = i64, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Recipe updated", body = RecipeDetail),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Recipe not found"),
        (status = 409, description = "Title already used")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "recipes"
)]
pub async fn update_recipe(
    path: web::Path<i64>,
    req: web::Json<RecipeRequest>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let recipe_id = path.into_inner();

    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let recipe = match find_recipe(pool.get_ref(), recipe_id).await? {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "Recipe not found"
            })));
        }
    };

    if recipe.author_id != auth.user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only update your own recipes"
        })));
    }

    let title_taken = recipe::Entity::find()
        .filter(
            Condition::all()
                .add(recipe::Column::Titre.eq(&req.titre))
                .add(recipe::Column::Id.ne(recipe_id)),
        )
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if title_taken.is_some() {
        return Ok(HttpResponse::Conflict().json(json!({
            "error": "titre déjà utilisé merci d'en choisir un autre"
        })));
    }

    // A supplied slug wins, a cleared one is re-derived from the title.
    let slug = domain::ensure_recipe_slug(req.slug.as_deref().unwrap_or(&recipe.slug), &req.titre);

    let mut active: recipe::ActiveModel = recipe.into();
    active.titre = sea_orm::Set(req.titre.clone());
    active.description = sea_orm::Set(req.description.clone());
    active.etapes = sea_orm::Set(req.etapes.clone());
    active.types = sea_orm::Set(req.types.clone());
    active.preptime = sea_orm::Set(req.preptime.clone());
    active.cooktime = sea_orm::Set(req.cooktime.clone());
    active.portion = sea_orm::Set(req.portion.clone());
    if req.img_recette.is_some() {
        active.img_recette = sea_orm::Set(req.img_recette.clone());
    }
    active.slug = sea_orm::Set(slug);

    let updated = active
        .update(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let detail = build_detail(pool.get_ref(), updated).await?;
    Ok(HttpResponse::Ok().json(detail))
}

#[utoipa::path(
    put,
    path = "/api/recipes/{recipe_id}/image",
    request_body = RecipeImageRequest,
    params(
        ("recipe_id" = i64, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Image reference updated", body = RecipeDetail),
        (status = 400, description = "Unsupported type or file too large"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Recipe not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "recipes"
)]
pub async fn update_recipe_image(
    path: web::Path<i64>,
    req: web::Json<RecipeImageRequest>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let recipe_id = path.into_inner();

    let recipe = match find_recipe(pool.get_ref(), recipe_id).await? {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "Recipe not found"
            })));
        }
    };

    if recipe.author_id != auth.user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only update your own recipes"
        })));
    }

    if !image_upload_allowed(&req.content_type, req.size_bytes) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Vous devez upload un fichier jpg, png ou gif de moins de 1024k"
        })));
    }

    let mut active: recipe::ActiveModel = recipe.into();
    active.img_recette = sea_orm::Set(Some(req.img_recette.clone()));

    let updated = active
        .update(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    let detail = build_detail(pool.get_ref(), updated).await?;
    Ok(HttpResponse::Ok().json(detail))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{recipe_id}",
    params(
        ("recipe_id" = i64, Path, description = "Recipe id")
    ),
    responses(
        (status = 204, description = "Recipe deleted, comments cascade"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Recipe not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "recipes"
)]
pub async fn delete_recipe(
    path: web::Path<i64>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let recipe_id = path.into_inner();

    let recipe = match find_recipe(pool.get_ref(), recipe_id).await? {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "Recipe not found"
            })));
        }
    };

    if recipe.author_id != auth.user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only delete your own recipes"
        })));
    }

    // Comments and ingredient links cascade with the recipe row.
    recipe
        .delete(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/recipes/{recipe_id}/ingredients/{ingredient_id}",
    params(
        ("recipe_id" = i64, Path, description = "Recipe id"),
        ("ingredient_id" = i64, Path, description = "Ingredient id")
    ),
    responses(
        (status = 201, description = "Ingredient attached"),
        (status = 200, description = "Already attached (no-op)"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Recipe or ingredient not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "recipes"
)]
pub async fn add_ingredient(
    path: web::Path<(i64, i64)>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let (recipe_id, ingredient_id) = path.into_inner();

    let recipe = match find_recipe(pool.get_ref(), recipe_id).await? {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "Recipe not found"
            })));
        }
    };

    if recipe.author_id != auth.user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only edit your own recipes"
        })));
    }

    let ingredient_exists = ingredient::Entity::find_by_id(ingredient_id)
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .is_some();

    if !ingredient_exists {
        return Ok(HttpResponse::NotFound().json(json!({
            "error": "Ingredient not found"
        })));
    }

    // Attaching twice is a no-op; the single join row keeps both sides
    // of the association consistent.
    let existing_link = recipe_ingredient::Entity::find()
        .filter(
            Condition::all()
                .add(recipe_ingredient::Column::RecipeId.eq(recipe_id))
                .add(recipe_ingredient::Column::IngredientId.eq(ingredient_id)),
        )
        .one(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if existing_link.is_some() {
        return Ok(HttpResponse::Ok().json(json!({
            "message": "Ingredient already attached"
        })));
    }

    let link = recipe_ingredient::ActiveModel {
        recipe_id: sea_orm::Set(recipe_id),
        ingredient_id: sea_orm::Set(ingredient_id),
        ..Default::default()
    };

    recipe_ingredient::Entity::insert(link)
        .exec(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Ingredient attached"
    })))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{recipe_id}/ingredients/{ingredient_id}",
    params(
        ("recipe_id" = i64, Path, description = "Recipe id"),
        ("ingredient_id" = i64, Path, description = "Ingredient id")
    ),
    responses(
        (status = 204, description = "Ingredient detached (no-op when absent)"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Recipe not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "recipes"
)]
pub async fn remove_ingredient(
    path: web::Path<(i64, i64)>,
    auth: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> ActixResult<HttpResponse> {
    let (recipe_id, ingredient_id) = path.into_inner();

    let recipe = match find_recipe(pool.get_ref(), recipe_id).await? {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "error": "Recipe not found"
            })));
        }
    };

    if recipe.author_id != auth.user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "error": "You can only edit your own recipes"
        })));
    }

    // Detaching an absent ingredient is a no-op, same as attaching twice.
    recipe_ingredient::Entity::delete_many()
        .filter(
            Condition::all()
                .add(recipe_ingredient::Column::RecipeId.eq(recipe_id))
                .add(recipe_ingredient::Column::IngredientId.eq(ingredient_id)),
        )
        .exec(pool.get_ref())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::NoContent().finish())
}
