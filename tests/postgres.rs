//! Repository tests against a live PostgreSQL. Run with `DATABASE_URL` set and
//! `cargo test -- --ignored`.

use sqlx::PgPool;

use linkfeed::application::repos::{
    CreateLinkParams, HealthRepo, LinkQueryFilter, LinkRelationsRepo, LinksRepo, LinksWriteRepo,
    RepoError,
};
use linkfeed::domain::feed::{FeedWindow, LinkOrderBy, order_terms};
use linkfeed::domain::types::SortDirection;
use linkfeed::infra::db::PostgresRepositories;

async fn seed(pool: &PgPool) -> (i32, i32) {
    let alice: i32 =
        sqlx::query_scalar("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
            .bind("Alice")
            .bind("alice@example.com")
            .fetch_one(pool)
            .await
            .expect("insert alice");
    let bob: i32 =
        sqlx::query_scalar("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
            .bind("Bob")
            .bind("bob@example.com")
            .fetch_one(pool)
            .await
            .expect("insert bob");

    sqlx::query(
        r#"
        INSERT INTO links (description, url, created_at, posted_by_id) VALUES
            ('howtographql.com tutorial', 'https://www.howtographql.com', now() - interval '30 minutes', $1),
            ('graphql.org official', 'https://graphql.org', now() - interval '10 minutes', $2),
            ('Rust book', 'https://doc.rust-lang.org/book', now() - interval '20 minutes', NULL)
        "#,
    )
    .bind(alice)
    .bind(bob)
    .execute(pool)
    .await
    .expect("insert links");

    (alice, bob)
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn filtered_feed_is_ordered_newest_first(pool: PgPool) {
    seed(&pool).await;
    let repos = PostgresRepositories::new(pool);
    let filter = LinkQueryFilter::from_search(Some("graphql"));
    let order = order_terms(&[LinkOrderBy {
        created_at: Some(SortDirection::Desc),
        ..Default::default()
    }]);

    let links = repos
        .list_links(&filter, &order, FeedWindow::default())
        .await
        .expect("list");
    let descriptions: Vec<_> = links.iter().map(|link| link.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["graphql.org official", "howtographql.com tutorial"]
    );
    assert_eq!(repos.count_links(&filter).await.expect("count"), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn window_limits_rows_but_not_count(pool: PgPool) {
    seed(&pool).await;
    let repos = PostgresRepositories::new(pool);
    let filter = LinkQueryFilter::default();

    let links = repos
        .list_links(
            &filter,
            &[],
            FeedWindow {
                skip: Some(1),
                take: Some(1),
            },
        )
        .await
        .expect("list");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].description, "graphql.org official");
    assert_eq!(repos.count_links(&filter).await.expect("count"), 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_link_returns_generated_columns(pool: PgPool) {
    let (alice, _) = seed(&pool).await;
    let repos = PostgresRepositories::new(pool);

    let link = repos
        .create_link(CreateLinkParams {
            description: "new".to_string(),
            url: "https://new.example".to_string(),
            posted_by_id: alice,
        })
        .await
        .expect("create");

    assert_eq!(link.posted_by_id, Some(alice));
    let found = repos.find_by_id(link.id).await.expect("find");
    assert_eq!(found, Some(link));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unknown_author_violates_foreign_key(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);

    let err = repos
        .create_link(CreateLinkParams {
            description: "orphan".to_string(),
            url: "https://orphan.example".to_string(),
            posted_by_id: 4242,
        })
        .await
        .expect_err("foreign key");

    assert!(matches!(err, RepoError::InvalidInput { .. }));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn relations_are_batched_by_link(pool: PgPool) {
    let (alice, bob) = seed(&pool).await;
    sqlx::query("INSERT INTO votes (link_id, user_id) SELECT id, $1 FROM links")
        .bind(bob)
        .execute(&pool)
        .await
        .expect("votes");
    let repos = PostgresRepositories::new(pool);
    let ids: Vec<i32> = repos
        .list_links(&LinkQueryFilter::default(), &[], FeedWindow::default())
        .await
        .expect("list")
        .iter()
        .map(|link| link.id)
        .collect();

    let authors = repos.posted_by_for_links(&ids).await.expect("authors");
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[&ids[0]].id, alice);

    let voters = repos.voters_for_links(&ids).await.expect("voters");
    assert_eq!(voters.len(), 3);
    assert!(voters.values().all(|users| users.len() == 1 && users[0].id == bob));

    repos.health_check().await.expect("healthy");
}
