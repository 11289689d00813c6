//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::ports::PostRepository;
use postboard_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use postboard_infra::PostgresPostRepository;
#[cfg(feature = "postgres")]
use sea_orm::DbConn;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// Backend name reported by the health check.
    pub store: &'static str,
    #[cfg(feature = "postgres")]
    db: Option<Arc<DbConn>>,
}

impl AppState {
    /// Build the application state with the configured post store.
    ///
    /// A configured database that cannot be reached is an error; only an
    /// absent configuration selects the in-memory store.
    pub async fn init(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        match db_config {
            #[cfg(feature = "postgres")]
            Some(config) => Self::postgres(config).await,
            #[cfg(not(feature = "postgres"))]
            Some(_) => {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
                Ok(Self::in_memory())
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory post store.");
                Ok(Self::in_memory())
            }
        }
    }

    #[cfg(feature = "postgres")]
    async fn postgres(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let conn = postboard_infra::database::connect(config).await?;

        Migrator::up(&conn, None).await?;
        tracing::info!("Database migrations applied");

        let conn = Arc::new(conn);
        let mut state = Self::with_repository(
            Arc::new(PostgresPostRepository::new(conn.clone())),
            "postgres",
        );
        state.db = Some(conn);
        Ok(state)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), "memory")
    }

    /// State over an arbitrary post store. Owns no database connection.
    pub fn with_repository(posts: Arc<dyn PostRepository>, store: &'static str) -> Self {
        Self {
            posts,
            store,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Release the database connection, if any.
    pub async fn shutdown(self) {
        #[cfg(feature = "postgres")]
        self.close_database().await;

        tracing::info!("Application state released");
    }

    #[cfg(feature = "postgres")]
    async fn close_database(self) {
        let Some(conn) = self.db else {
            return;
        };
        // The repository holds the other handle
        drop(self.posts);

        match Arc::try_unwrap(conn) {
            Ok(conn) => match conn.close().await {
                Ok(()) => tracing::info!("Database connection closed"),
                Err(e) => tracing::error!("Failed to close database connection: {}", e),
            },
            Err(_) => {
                tracing::warn!("Database connection still shared; pool closes when the last handle drops")
            }
        }
    }
}
