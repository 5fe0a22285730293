//! Postgres-backed repository implementations.

mod links;
mod relations;
mod types;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{
    Postgres, QueryBuilder,
    postgres::{PgPool, PgPoolOptions},
    query,
};

use crate::application::repos::{HealthRepo, LinkQueryFilter, RepoError};
use crate::domain::feed::LinkOrderTerm;

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(pool).await
    }

    /// Case-sensitive substring match on description or url.
    fn apply_link_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &LinkQueryFilter) {
        if let Some(search) = filter.search.as_ref() {
            qb.push(" AND (strpos(l.description, ");
            qb.push_bind(search.clone());
            qb.push(") > 0 OR strpos(l.url, ");
            qb.push_bind(search.clone());
            qb.push(") > 0)");
        }
    }

    /// Client terms in sequence, then the primary key so windows are stable.
    fn apply_ordering(qb: &mut QueryBuilder<'_, Postgres>, order: &[LinkOrderTerm]) {
        qb.push(" ORDER BY ");
        for term in order {
            qb.push(term.field.column());
            qb.push(" ");
            qb.push(term.direction.as_sql());
            qb.push(", ");
        }
        qb.push("l.id ASC");
    }

    fn convert_count(value: i64) -> Result<u64, RepoError> {
        value
            .try_into()
            .map_err(|_| RepoError::from_persistence("count exceeds supported range"))
    }
}

#[async_trait]
impl HealthRepo for PostgresRepositories {
    async fn health_check(&self) -> Result<(), RepoError> {
        query("SELECT 1")
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}
