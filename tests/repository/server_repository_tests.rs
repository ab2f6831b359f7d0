//! Server Repository Tests

use chat_community::domain::{Server, ServerQuery, ServerRecord, ServerRepository};
use chat_community::infrastructure::repositories::PgServerRepository;
use chat_community::shared::error::AppError;
use pretty_assertions::assert_eq;
use sqlx::PgPool;

use super::seed;

async fn listed_ids(repo: &PgServerRepository, query: ServerQuery) -> Vec<i64> {
    repo.list(&query)
        .await
        .unwrap()
        .into_iter()
        .map(|record: ServerRecord| record.server.id)
        .collect()
}

fn new_server(owner_id: i64, category_id: i64) -> Server {
    Server {
        id: 50,
        name: Some("fresh".into()),
        owner_id,
        category_id,
        description: None,
        members: Vec::new(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_limit_keeps_lowest_ids(pool: PgPool) {
    seed(&pool).await;
    let repo = PgServerRepository::new(pool);

    let ids = listed_ids(
        &repo,
        ServerQuery {
            limit: Some(2),
            ..Default::default()
        },
    )
    .await;

    assert_eq!(ids, vec![1, 2]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_member_count_matches_memberships(pool: PgPool) {
    seed(&pool).await;
    let repo = PgServerRepository::new(pool);

    let records = repo
        .list(&ServerQuery {
            with_member_count: true,
            server_id: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].member_count, Some(3));
    assert_eq!(records[0].server.members, vec![1, 2, 4]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_plain_listing_has_no_member_count(pool: PgPool) {
    seed(&pool).await;
    let repo = PgServerRepository::new(pool);

    let records = repo.list(&ServerQuery::default()).await.unwrap();

    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.member_count.is_none()));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_category_by_name_or_id(pool: PgPool) {
    seed(&pool).await;
    let repo = PgServerRepository::new(pool);

    for category in ["Music", "200"] {
        let ids = listed_ids(
            &repo,
            ServerQuery {
                category: Some(category.into()),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(ids, vec![5], "category {category}");
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_membership_filter_runs_after_limit(pool: PgPool) {
    seed(&pool).await;
    let repo = PgServerRepository::new(pool);

    let truncated = listed_ids(
        &repo,
        ServerQuery {
            limit: Some(2),
            member_id: Some(3),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(truncated, Vec::<i64>::new());

    let all = listed_ids(
        &repo,
        ServerQuery {
            member_id: Some(3),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(all, vec![4]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_with_missing_owner(pool: PgPool) {
    seed(&pool).await;
    let repo = PgServerRepository::new(pool);

    let err = repo.create(&new_server(999, 100)).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(ref msg) if msg == "The owner does not exist"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_with_missing_category(pool: PgPool) {
    seed(&pool).await;
    let repo = PgServerRepository::new(pool);

    let err = repo.create(&new_server(1, 999)).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(ref msg) if msg == "The category does not exist"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_membership_round_trip(pool: PgPool) {
    seed(&pool).await;
    let repo = PgServerRepository::new(pool);

    repo.add_member(2, 3).await.unwrap();
    repo.add_member(2, 3).await.unwrap();
    let server = repo.find_by_id(2).await.unwrap().unwrap();
    assert!(server.is_member(3));

    assert!(repo.remove_member(2, 3).await.unwrap());
    assert!(!repo.remove_member(2, 3).await.unwrap());
}
