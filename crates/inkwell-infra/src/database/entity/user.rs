//! User entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use inkwell_core::domain::Role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
/// An unknown role string degrades to the unprivileged role.
impl From<Model> for inkwell_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            role: Role::from_str(&model.role).unwrap_or(Role::Reader),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
/// Id 0 means "not yet assigned": leave the primary key unset so the
/// database allocates the next value.
impl From<inkwell_core::domain::User> for ActiveModel {
    fn from(user: inkwell_core::domain::User) -> Self {
        Self {
            id: if user.id == 0 { NotSet } else { Set(user.id) },
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            name: Set(user.name),
            role: Set(user.role.as_str().to_string()),
        }
    }
}
