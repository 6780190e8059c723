use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    DatabaseBackend, DatabaseConnection, MockDatabase, MockDatabaseConnection, MockExecResult,
};
use uuid::Uuid;

use chronicle_core::domain::{PostStatus, Role};
use chronicle_core::error::RepoError;
use chronicle_core::ports::{PostRepository, UserRepository};

use super::entity::{post, user};
use super::repo::{PostgresPostRepository, PostgresUserRepository};

/// Build two handles onto the same mock connection: one to hand to the
/// repository (which takes the connection by value) and one to drain the
/// transaction log from afterwards. `DatabaseConnection` is not `Clone` under
/// the `mock` feature, so we share the inner `Arc` directly — exactly what
/// `MockDatabase::into_connection` does internally.
fn mock_pair(mock: MockDatabase) -> (DatabaseConnection, DatabaseConnection) {
    let conn = Arc::new(MockDatabaseConnection::new(mock));
    (
        DatabaseConnection::MockDatabaseConnection(conn.clone()),
        DatabaseConnection::MockDatabaseConnection(conn),
    )
}

fn post_model(views: i64) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        title: "Hello World".to_owned(),
        slug: "hello-world".to_owned(),
        content: "First post.".to_owned(),
        thumbnail: None,
        status: "published".to_owned(),
        category: "More".to_owned(),
        views,
        likes: 0,
        liked_by: vec![],
        author_id: Uuid::new_v4(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn user_model() -> user::Model {
    let now = Utc::now();
    user::Model {
        id: Uuid::new_v4(),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password_hash: "$argon2id$stub".to_owned(),
        role: "admin".to_owned(),
        is_active: true,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_to_domain() {
    let model = post_model(3);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let found = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(found.id, post_id);
    assert_eq!(found.slug, "hello-world");
    assert_eq!(found.status, PostStatus::Published);
    assert_eq!(found.views, 3);
}

#[tokio::test]
async fn find_user_by_email_normalizes_lookup_key() {
    let (db, probe) = mock_pair(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()]),
    );

    let repo = PostgresUserRepository::new(db);
    let found = repo.find_by_email("  Ada@Example.COM ").await.unwrap();
    assert!(found.is_none());

    let log = format!("{:?}", probe.into_transaction_log());
    assert!(log.contains("ada@example.com"), "query used: {log}");
}

#[tokio::test]
async fn find_user_by_email_maps_role() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_model()]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let found = repo.find_by_email("ada@example.com").await.unwrap().unwrap();

    assert_eq!(found.role, Role::Admin);
    assert!(found.is_active);
}

#[tokio::test]
async fn update_password_rewrites_hash_for_existing_email() {
    let model = user_model();
    let mut updated = model.clone();
    updated.password_hash = "$argon2id$new".to_owned();

    let (db, probe) = mock_pair(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model]])
            .append_query_results([vec![updated]]),
    );

    let repo = PostgresUserRepository::new(db);
    repo.update_password("ada@example.com", "$argon2id$new")
        .await
        .unwrap();

    let log = format!("{:?}", probe.into_transaction_log());
    assert!(log.contains("$argon2id$new"), "statements were: {log}");
}

#[tokio::test]
async fn update_password_for_unknown_email_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let result = repo.update_password("ghost@example.com", "hash").await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn slug_lookup_bumps_views_in_a_single_statement() {
    let (db, probe) = mock_pair(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![post_model(8)]]),
    );

    let repo = PostgresPostRepository::new(db);
    let found = repo
        .find_published_by_slug_and_bump_views("hello-world")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.views, 8);

    let log = format!("{:?}", probe.into_transaction_log());
    assert!(log.contains("views = views + 1"), "statement was: {log}");
    assert!(log.contains("status = 'published'"), "statement was: {log}");
    assert!(log.contains("RETURNING"), "statement was: {log}");
}

#[tokio::test]
async fn like_toggle_is_a_single_guarded_statement() {
    let reader = Uuid::new_v4();
    let mut model = post_model(0);
    model.likes = 1;
    model.liked_by = vec![reader];
    let post_id = model.id;

    let (db, probe) = mock_pair(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![model]]),
    );

    let repo = PostgresPostRepository::new(db);
    let toggled = repo.toggle_like(post_id, reader).await.unwrap().unwrap();
    assert!(toggled.liked_by.contains(&reader));

    let log = format!("{:?}", probe.into_transaction_log());
    assert!(log.contains("array_remove"), "statement was: {log}");
    assert!(log.contains("array_append"), "statement was: {log}");
    assert!(log.contains("GREATEST(likes - 1, 0)"), "statement was: {log}");
}

#[tokio::test]
async fn delete_of_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo.delete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}
