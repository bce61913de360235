use crate::entities::comment;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentRequest {
    #[validate(range(min = 0, max = 5, message = "La note doit être comprise entre 0 et 5"))]
    pub rating: i32,
    #[validate(length(min = 1, message = "Le commentaire ne peut pas être vide"))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentView {
    pub id: i64,
    pub rating: i32,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author_id: i64,
    pub author_name: String,
}

impl CommentView {
    pub fn build(comment: comment::Model, author_name: String) -> Self {
        CommentView {
            id: comment.id,
            rating: comment.rating,
            content: comment.content,
            created_at: comment.created_at,
            author_id: comment.author_id,
            author_name,
        }
    }
}
