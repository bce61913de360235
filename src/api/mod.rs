pub mod auth;
pub mod comments;
pub mod ingredients;
pub mod recipes;
pub mod users;

use crate::models::{
    AuthResponse, AuthorView, CommentRequest, CommentView, IngredientRequest, IngredientView,
    LoginRequest, RecipeDetail, RecipeImageRequest, RecipeRequest, RecipeSummary, RegisterRequest,
    UpdateAvatarRequest, UpdatePasswordRequest, UpdateUserRequest, UserProfile,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth endpoints
        auth::register,
        auth::login,
        // User endpoints
        users::get_user,
        users::update_user,
        users::update_password,
        users::update_avatar,
        users::delete_user,
        // Recipe endpoints
        recipes::create_recipe,
        recipes::get_recipes,
        recipes::get_recipe,
        recipes::update_recipe,
        recipes::update_recipe_image,
        recipes::delete_recipe,
        recipes::add_ingredient,
        recipes::remove_ingredient,
        // Comment endpoints
        comments::create_comment,
        comments::get_comments,
        comments::delete_comment,
        // Ingredient endpoints
        ingredients::create_ingredient,
        ingredients::get_ingredients,
    ),
    components(schemas(
        // Auth schemas
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        // User schemas
        UserProfile,
        AuthorView,
        UpdateUserRequest,
        UpdatePasswordRequest,
        UpdateAvatarRequest,
        // Recipe schemas
        RecipeRequest,
        RecipeImageRequest,
        RecipeSummary,
        RecipeDetail,
        recipes::RecipeQuery,
        // Comment schemas
        CommentRequest,
        CommentView,
        // Ingredient schemas
        IngredientRequest,
        IngredientView,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Profile management"),
        (name = "recipes", description = "Recipe management"),
        (name = "comments", description = "Recipe comments and ratings"),
        (name = "ingredients", description = "Ingredient catalogue"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

use utoipa::Modify;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
