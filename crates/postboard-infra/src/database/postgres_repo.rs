//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use postboard_core::domain::{Post, PostChanges};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn set_if_some(value: Option<String>) -> ActiveValue<String> {
    value.map_or(ActiveValue::NotSet, ActiveValue::Set)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        tracing::debug!("Listing all posts");

        // v7 ids sort by creation time
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        if changes.is_empty() {
            return BaseRepository::<Post, Uuid>::find_by_id(self, id)
                .await?
                .ok_or(RepoError::NotFound);
        }

        // NotSet columns are left out of the UPDATE statement
        let active_model = post::ActiveModel {
            id: ActiveValue::Unchanged(id),
            title: set_if_some(changes.title),
            text: set_if_some(changes.text),
            author: set_if_some(changes.author),
        };

        let model = active_model
            .update(&*self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepoError::NotFound,
                other => query_error(other),
            })?;

        Ok(model.into())
    }
}
