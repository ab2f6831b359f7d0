//! Category Repository Tests

use chat_community::domain::{
    CategoryRepository, Channel, ChannelRepository, ServerRepository,
};
use chat_community::infrastructure::repositories::{
    PgCategoryRepository, PgChannelRepository, PgServerRepository,
};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

use super::seed;

const CHANNEL_ICON: &str = "channel/10/channel_icon/icon.png";
const CHANNEL_BANNER: &str = "channel/10/channel_banner/banner.png";
const CATEGORY_ICON: &str = "category/100/category_icon/gaming.png";

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_collects_cascaded_files(pool: PgPool) {
    seed(&pool).await;
    PgChannelRepository::new(pool.clone())
        .create(&Channel {
            id: 10,
            name: "general".into(),
            owner_id: 1,
            topic: "talk".into(),
            server_id: 1,
            banner: Some(CHANNEL_BANNER.into()),
            icon: Some(CHANNEL_ICON.into()),
        })
        .await
        .unwrap();

    let orphans = PgCategoryRepository::new(pool.clone())
        .delete(100)
        .await
        .unwrap();

    assert_eq!(
        orphans,
        Some(vec![
            CHANNEL_ICON.to_string(),
            CHANNEL_BANNER.to_string(),
            CATEGORY_ICON.to_string(),
        ])
    );

    let servers = PgServerRepository::new(pool);
    assert!(!servers.exists(1).await.unwrap());
    assert!(servers.exists(5).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_without_files(pool: PgPool) {
    seed(&pool).await;
    let repo = PgCategoryRepository::new(pool);

    assert_eq!(repo.delete(200).await.unwrap(), Some(Vec::new()));
    assert_eq!(repo.delete(200).await.unwrap(), None);
}
