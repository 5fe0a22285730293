//! Feed ordering and windowing rules.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::types::{LinkSortField, SortDirection};

/// One `orderBy` entry as supplied by a client.
///
/// Fields are declared alphabetically because the serialized form feeds the
/// feed identity string and must not depend on input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LinkOrderBy {
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<SortDirection>,
}

impl LinkOrderBy {
    /// Sort terms carried by this entry, in description, url, createdAt order.
    pub fn terms(&self) -> impl Iterator<Item = LinkOrderTerm> + '_ {
        [
            (LinkSortField::Description, self.description),
            (LinkSortField::Url, self.url),
            (LinkSortField::CreatedAt, self.created_at),
        ]
        .into_iter()
        .filter_map(|(field, direction)| {
            direction.map(|direction| LinkOrderTerm { field, direction })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkOrderTerm {
    pub field: LinkSortField,
    pub direction: SortDirection,
}

/// Flatten a client `orderBy` list into a composite sort key.
pub fn order_terms(order_by: &[LinkOrderBy]) -> Vec<LinkOrderTerm> {
    order_by.iter().flat_map(|entry| entry.terms()).collect()
}

/// Offset/limit window over a filtered, ordered feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedWindow {
    pub skip: Option<u32>,
    pub take: Option<u32>,
}

impl FeedWindow {
    pub fn new(
        skip: Option<i32>,
        take: Option<i32>,
        max_take: Option<NonZeroU32>,
    ) -> Result<Self, DomainError> {
        let skip = skip
            .map(|value| {
                u32::try_from(value)
                    .map_err(|_| DomainError::validation("skip must not be negative"))
            })
            .transpose()?;
        let take = take
            .map(|value| {
                u32::try_from(value)
                    .map_err(|_| DomainError::validation("take must not be negative"))
            })
            .transpose()?;

        if let (Some(take), Some(max)) = (take, max_take)
            && take > max.get()
        {
            return Err(DomainError::validation(format!(
                "take must not exceed {}",
                max.get()
            )));
        }

        Ok(Self { skip, take })
    }
}
