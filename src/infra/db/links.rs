use async_trait::async_trait;
use sqlx::QueryBuilder;

use crate::application::repos::{
    CreateLinkParams, LinkQueryFilter, LinksRepo, LinksWriteRepo, RepoError,
};
use crate::domain::entities::LinkRecord;
use crate::domain::feed::{FeedWindow, LinkOrderTerm};

use super::PostgresRepositories;
use super::types::LinkRow;
use crate::infra::db::map_sqlx_error;

const LINK_COLUMNS: &str = "l.id, l.description, l.url, l.created_at, l.posted_by_id";

#[async_trait]
impl LinksRepo for PostgresRepositories {
    async fn list_links(
        &self,
        filter: &LinkQueryFilter,
        order: &[LinkOrderTerm],
        window: FeedWindow,
    ) -> Result<Vec<LinkRecord>, RepoError> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(LINK_COLUMNS);
        qb.push(" FROM links l WHERE 1=1");

        Self::apply_link_filter(&mut qb, filter);
        Self::apply_ordering(&mut qb, order);

        if let Some(take) = window.take {
            qb.push(" LIMIT ");
            qb.push_bind(i64::from(take));
        }
        if let Some(skip) = window.skip {
            qb.push(" OFFSET ");
            qb.push_bind(i64::from(skip));
        }

        let rows = qb
            .build_query_as::<LinkRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(LinkRecord::from).collect())
    }

    async fn count_links(&self, filter: &LinkQueryFilter) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM links l WHERE 1=1");
        Self::apply_link_filter(&mut qb, filter);

        let count = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Self::convert_count(count)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<LinkRecord>, RepoError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links l WHERE l.id = $1");
        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(LinkRecord::from))
    }
}

#[async_trait]
impl LinksWriteRepo for PostgresRepositories {
    async fn create_link(&self, params: CreateLinkParams) -> Result<LinkRecord, RepoError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (description, url, posted_by_id)
            VALUES ($1, $2, $3)
            RETURNING id, description, url, created_at, posted_by_id
            "#,
        )
        .bind(params.description)
        .bind(params.url)
        .bind(params.posted_by_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(LinkRecord::from(row))
    }
}
