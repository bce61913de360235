use crate::entities::user;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Veuillez renseigner une adresse email valide"))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit faire au moins 6 caractères"))]
    pub password: String,
    /// Transient confirmation field; never persisted.
    #[validate(must_match(
        other = "password",
        message = "Vous n'avez pas correctement confirmé votre mot de passe"
    ))]
    pub password_confirm: String,
    #[validate(length(min = 1, message = "Vous devez renseigner votre prénom"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Vous devez renseigner votre nom"))]
    pub last_name: String,
    /// Optional explicit slug; derived from the name when absent.
    pub slug: Option<String>,
    pub picture: Option<String>,
    #[validate(length(
        min = 10,
        message = "Votre presentation doit faire au minimum 10 caractères"
    ))]
    pub presentation: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Vous devez renseigner votre prénom"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Vous devez renseigner votre nom"))]
    pub last_name: String,
    /// Cleared (empty/absent) slug is re-derived from the new name.
    pub slug: Option<String>,
    #[validate(length(
        min = 10,
        message = "Votre presentation doit faire au minimum 10 caractères"
    ))]
    pub presentation: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 6, message = "Le mot de passe doit faire au moins 6 caractères"))]
    pub password: String,
    #[validate(must_match(
        other = "password",
        message = "Vous n'avez pas correctement confirmé votre mot de passe"
    ))]
    pub password_confirm: String,
}

/// Avatar upload happens out of band; this carries the stored reference.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAvatarRequest {
    pub picture: String,
}

/// Full profile projection, the detail view of a user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub roles: Vec<String>,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub slug: String,
    pub picture: Option<String>,
    pub presentation: Option<String>,
}

impl From<user::Model> for UserProfile {
    fn from(user: user::Model) -> Self {
        UserProfile {
            id: user.id,
            email: user.email.clone(),
            roles: user.roles(),
            full_name: user.full_name(),
            first_name: user.first_name,
            last_name: user.last_name,
            slug: user.slug,
            picture: user.picture,
            presentation: user.presentation,
        }
    }
}

/// Compact author projection embedded in recipe views.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthorView {
    pub id: i64,
    pub full_name: String,
    pub slug: String,
    pub picture: Option<String>,
}

impl From<&user::Model> for AuthorView {
    fn from(user: &user::Model) -> Self {
        AuthorView {
            id: user.id,
            full_name: user.full_name(),
            slug: user.slug.clone(),
            picture: user.picture.clone(),
        }
    }
}
