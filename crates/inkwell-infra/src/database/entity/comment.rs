//! Comment entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub post_id: i32,
    #[sea_orm(column_type = "Text")]
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Comment.
impl From<Model> for inkwell_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            post_id: model.post_id,
            text: model.text,
        }
    }
}

/// Conversion from Domain Comment to SeaORM ActiveModel.
impl From<inkwell_core::domain::Comment> for ActiveModel {
    fn from(comment: inkwell_core::domain::Comment) -> Self {
        Self {
            id: if comment.id == 0 { NotSet } else { Set(comment.id) },
            author_id: Set(comment.author_id),
            post_id: Set(comment.post_id),
            text: Set(comment.text),
        }
    }
}
