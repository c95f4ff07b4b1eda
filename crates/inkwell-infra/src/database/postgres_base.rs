use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DbConn, EntityTrait, IntoActiveModel, PrimaryKeyTrait, TryIntoModel,
};

use inkwell_core::error::RepoError;
use inkwell_core::ports::BaseRepository;

/// Generic PostgreSQL repository over any entity keyed by an i32 id.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T> BaseRepository<T> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + TryIntoModel<E::Model> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        // save() inserts when the primary key is unset, updates otherwise.
        // Unique-index violations (email, post title) come back as
        // Constraint so callers can re-render the form instead of 500ing.
        let active_model: E::ActiveModel = entity.into();
        let result = active_model.save(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        let model = result
            .try_into_model()
            .map_err(|e| RepoError::Query(e.to_string()))?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
