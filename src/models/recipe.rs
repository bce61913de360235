use crate::entities::recipe;
use crate::models::{AuthorView, CommentView, IngredientView};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Mime types an image upload may declare.
pub const ALLOWED_IMAGE_MIME: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/gif"];

/// 1024 KB upload ceiling.
pub const MAX_IMAGE_SIZE_BYTES: u64 = 1024 * 1024;

pub fn image_upload_allowed(content_type: &str, size_bytes: u64) -> bool {
    ALLOWED_IMAGE_MIME.contains(&content_type) && size_bytes <= MAX_IMAGE_SIZE_BYTES
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecipeRequest {
    #[validate(length(
        min = 2,
        max = 40,
        message = "Le titre doit faire entre 2 et 40 caractères"
    ))]
    pub titre: String,
    #[validate(length(
        min = 2,
        max = 250,
        message = "La description doit faire entre 2 et 250 caractères"
    ))]
    pub description: Option<String>,
    #[validate(length(min = 20, message = "La recette doit faire plus de 20 caractères"))]
    pub etapes: String,
    pub types: Option<String>,
    pub preptime: Option<String>,
    pub cooktime: Option<String>,
    pub portion: Option<String>,
    pub img_recette: Option<String>,
    /// Optional explicit slug; derived from the title when absent.
    pub slug: Option<String>,
}

/// Reference plus declared upload metadata; the file itself is stored
/// by the upload collaborator.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecipeImageRequest {
    pub img_recette: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// List projection of a recipe.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i64,
    pub titre: String,
    pub slug: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub types: Option<String>,
    pub img_recette: Option<String>,
    pub author: AuthorView,
    pub average_rating: i64,
}

/// Detail projection: everything the recipe page renders.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i64,
    pub titre: String,
    pub slug: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub description: Option<String>,
    pub etapes: String,
    pub types: Option<String>,
    pub preptime: Option<String>,
    pub cooktime: Option<String>,
    pub portion: Option<String>,
    pub img_recette: Option<String>,
    pub author: AuthorView,
    pub ingredients: Vec<IngredientView>,
    pub comments: Vec<CommentView>,
    pub average_rating: i64,
}

impl RecipeDetail {
    pub fn build(
        recipe: recipe::Model,
        author: AuthorView,
        ingredients: Vec<IngredientView>,
        comments: Vec<CommentView>,
        average_rating: i64,
    ) -> Self {
        RecipeDetail {
            id: recipe.id,
            titre: recipe.titre,
            slug: recipe.slug,
            date: recipe.date,
            description: recipe.description,
            etapes: recipe.etapes,
            types: recipe.types,
            preptime: recipe.preptime,
            cooktime: recipe.cooktime,
            portion: recipe.portion,
            img_recette: recipe.img_recette,
            author,
            ingredients,
            comments,
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_uploads_accept_listed_mime_types_only() {
        assert!(image_upload_allowed("image/png", 512 * 1024));
        assert!(image_upload_allowed("image/gif", MAX_IMAGE_SIZE_BYTES));
        assert!(!image_upload_allowed("image/webp", 1024));
        assert!(!image_upload_allowed("application/pdf", 1024));
    }

    #[test]
    fn image_uploads_reject_oversized_files() {
        assert!(!image_upload_allowed("image/jpeg", MAX_IMAGE_SIZE_BYTES + 1));
    }
}
