//! Domain entities mirrored from persistent storage.

use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub id: i32,
    pub description: String,
    pub url: String,
    pub created_at: OffsetDateTime,
    pub posted_by_id: Option<i32>,
}

/// A user referenced by links. Users are owned by the account system; this
/// service only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
}
