use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostChanges};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity and return it as stored.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Every stored post, oldest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Write only the supplied fields of post `id` and return the stored
    /// post. Fields not in `changes` keep whatever value the store holds.
    /// Fails with [`RepoError::NotFound`] if no post has that ID.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;
}
