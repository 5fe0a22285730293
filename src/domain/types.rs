//! Shared domain enumerations.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Link columns a feed may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSortField {
    Description,
    Url,
    CreatedAt,
}

impl LinkSortField {
    pub fn column(self) -> &'static str {
        match self {
            LinkSortField::Description => "l.description",
            LinkSortField::Url => "l.url",
            LinkSortField::CreatedAt => "l.created_at",
        }
    }
}
