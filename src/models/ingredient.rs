use crate::entities::ingredient;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IngredientRequest {
    #[validate(length(min = 1, max = 255, message = "Le nom de l'ingrédient est obligatoire"))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientView {
    pub id: i64,
    pub name: String,
}

impl From<ingredient::Model> for IngredientView {
    fn from(ingredient: ingredient::Model) -> Self {
        IngredientView {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}
