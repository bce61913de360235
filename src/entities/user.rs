use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "ROLE_USER";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub roles: Json,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub slug: String,
    pub picture: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub presentation: Option<String>,
}

impl Model {
    /// Stored roles plus the implicit `ROLE_USER` every account carries.
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = self
            .roles
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();
        if !roles.iter().any(|r| r == ROLE_USER) {
            roles.push(ROLE_USER.to_string());
        }
        roles
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipe::Entity")]
    Recipes,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
