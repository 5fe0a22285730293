use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::repos::{LinkRelationsRepo, RepoError};
use crate::domain::entities::UserRecord;

use super::PostgresRepositories;
use super::types::LinkUserRow;
use crate::infra::db::map_sqlx_error;

#[async_trait]
impl LinkRelationsRepo for PostgresRepositories {
    async fn posted_by_for_links(
        &self,
        link_ids: &[i32],
    ) -> Result<HashMap<i32, UserRecord>, RepoError> {
        if link_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, LinkUserRow>(
            r#"
            SELECT l.id AS link_id, u.id, u.name, u.email
            FROM links l
            INNER JOIN users u ON u.id = l.posted_by_id
            WHERE l.id = ANY($1)
            "#,
        )
        .bind(link_ids)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(LinkUserRow::into_pair).collect())
    }

    async fn voters_for_links(
        &self,
        link_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<UserRecord>>, RepoError> {
        if link_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, LinkUserRow>(
            r#"
            SELECT v.link_id, u.id, u.name, u.email
            FROM votes v
            INNER JOIN users u ON u.id = v.user_id
            WHERE v.link_id = ANY($1)
            ORDER BY v.link_id, u.id
            "#,
        )
        .bind(link_ids)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let mut voters: HashMap<i32, Vec<UserRecord>> = HashMap::new();
        for (link_id, user) in rows.into_iter().map(LinkUserRow::into_pair) {
            voters.entry(link_id).or_default().push(user);
        }
        Ok(voters)
    }
}
