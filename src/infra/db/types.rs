use time::OffsetDateTime;

use crate::domain::entities::{LinkRecord, UserRecord};

#[derive(sqlx::FromRow)]
pub(crate) struct LinkRow {
    pub(crate) id: i32,
    pub(crate) description: String,
    pub(crate) url: String,
    pub(crate) created_at: OffsetDateTime,
    pub(crate) posted_by_id: Option<i32>,
}

impl From<LinkRow> for LinkRecord {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
            url: row.url,
            created_at: row.created_at,
            posted_by_id: row.posted_by_id,
        }
    }
}

/// A user joined to the link it relates to.
#[derive(sqlx::FromRow)]
pub(crate) struct LinkUserRow {
    pub(crate) link_id: i32,
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) email: String,
}

impl LinkUserRow {
    pub(crate) fn into_pair(self) -> (i32, UserRecord) {
        (
            self.link_id,
            UserRecord {
                id: self.id,
                name: self.name,
                email: self.email,
            },
        )
    }
}
