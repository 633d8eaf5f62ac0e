//! Bookmark entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A post saved by a user.
///
/// `post_id` is deliberately not a foreign key: a bookmark outlives the post
/// it points at and reads back as an empty slot.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookmark")]
pub struct Model {
    /// ULID primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User who saved the post.
    pub user_id: String,

    /// Post that was saved.
    pub post_id: String,

    /// Creation time
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
