//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    /// ULID primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Unique handle
    pub username: String,

    /// Display name
    pub fullname: String,

    /// Contact email
    pub email: String,

    /// Profile bio
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// Avatar image URL
    pub image: String,

    /// Subject of the identity provider token this user belongs to
    #[sea_orm(unique)]
    pub clerk_id: String,

    /// Followers count (denormalized)
    #[sea_orm(default_value = 0)]
    pub followers: i32,

    /// Following count (denormalized)
    #[sea_orm(default_value = 0)]
    pub following: i32,

    /// Posts count (denormalized)
    #[sea_orm(default_value = 0)]
    pub posts: i32,

    /// Creation time
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
