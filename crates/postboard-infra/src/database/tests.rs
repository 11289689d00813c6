use std::sync::Arc;

use postboard_core::domain::{Post, PostChanges};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostRepository};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(title: &str) -> post::Model {
    post::Model {
        id: uuid::Uuid::now_v7(),
        title: title.to_owned(),
        text: "Text".to_owned(),
        author: "Author".to_owned(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("Test Post");
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_find_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(uuid::Uuid::now_v7()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_all_posts() {
    let first = model("First");
    let second = model("Second");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![first.clone(), second.clone()]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_all().await.unwrap();
    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second"]);
    assert_eq!(posts[0].id, first.id);
}

#[tokio::test]
async fn test_insert_post_returns_stored_row() {
    let row = model("Created");
    let post = Post::from(row.clone());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let saved = repo.insert(post.clone()).await.unwrap();
    assert_eq!(saved, post);
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let changes = PostChanges {
        title: Some("Z".into()),
        ..Default::default()
    };
    let result = repo.update(uuid::Uuid::now_v7(), changes).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_update_sets_only_supplied_columns() {
    let mut row = model("Z");
    row.author = "Someone else".to_owned();
    let id = row.id;

    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection(),
    );
    let repo = PostgresPostRepository::new(db.clone());

    let changes = PostChanges {
        title: Some("Z".into()),
        ..Default::default()
    };
    let updated = repo.update(id, changes).await.unwrap();
    // the stored row wins for fields that were not supplied
    assert_eq!(updated.title, "Z");
    assert_eq!(updated.author, "Someone else");

    drop(repo);
    let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
    let sql = format!("{log:?}");
    assert!(sql.contains(r#"SET \"title\" = "#), "{sql}");
    assert!(!sql.contains(r#"\"author\" = "#), "{sql}");
    assert!(!sql.contains(r#"\"text\" = "#), "{sql}");
}

#[tokio::test]
async fn test_empty_update_reads_current_row() {
    let row = model("Unchanged");
    let id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.update(id, PostChanges::default()).await.unwrap();
    assert_eq!(post.title, "Unchanged");
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, _>::delete(&repo, uuid::Uuid::now_v7()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_existing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(
        BaseRepository::<Post, _>::delete(&repo, uuid::Uuid::now_v7())
            .await
            .is_ok()
    );
}
