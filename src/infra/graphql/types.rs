use async_graphql::{ComplexObject, Context, Enum, ID, InputObject, Result, SimpleObject};
use time::OffsetDateTime;

use crate::application::feed::FeedPage;
use crate::domain::entities::{LinkRecord, UserRecord};
use crate::domain::feed::LinkOrderBy;
use crate::domain::types::SortDirection;

use super::error::loader_error;
use super::loaders::RelationLoaders;

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "link", complex)]
pub struct Link {
    pub id: i32,
    pub description: String,
    pub url: String,
    pub created_at: OffsetDateTime,
    #[graphql(skip)]
    pub posted_by_id: Option<i32>,
}

#[ComplexObject]
impl Link {
    async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        if self.posted_by_id.is_none() {
            return Ok(None);
        }
        let loaders = ctx.data::<RelationLoaders>()?;
        let user = loaders
            .posted_by
            .load_one(self.id)
            .await
            .map_err(loader_error)?;
        Ok(user.map(User::from))
    }

    async fn voters(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let loaders = ctx.data::<RelationLoaders>()?;
        let voters = loaders
            .voters
            .load_one(self.id)
            .await
            .map_err(loader_error)?;
        Ok(voters
            .unwrap_or_default()
            .into_iter()
            .map(User::from)
            .collect())
    }
}

impl From<LinkRecord> for Link {
    fn from(record: LinkRecord) -> Self {
        Self {
            id: record.id,
            description: record.description,
            url: record.url,
            created_at: record.created_at,
            posted_by_id: record.posted_by_id,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Feed {
    pub links: Vec<Link>,
    pub count: i32,
    pub id: Option<ID>,
}

impl TryFrom<FeedPage> for Feed {
    type Error = async_graphql::Error;

    fn try_from(page: FeedPage) -> Result<Self, Self::Error> {
        let count = i32::try_from(page.count)
            .map_err(|_| async_graphql::Error::new("feed count exceeds the Int range"))?;
        Ok(Self {
            links: page.links.into_iter().map(Link::from).collect(),
            count,
            id: Some(ID(page.id)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "Sort", rename_items = "lowercase")]
pub enum Sort {
    Asc,
    Desc,
}

impl From<Sort> for SortDirection {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Asc => SortDirection::Asc,
            Sort::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct LinkOrderByInput {
    pub description: Option<Sort>,
    pub url: Option<Sort>,
    pub created_at: Option<Sort>,
}

impl From<LinkOrderByInput> for LinkOrderBy {
    fn from(input: LinkOrderByInput) -> Self {
        Self {
            created_at: input.created_at.map(SortDirection::from),
            description: input.description.map(SortDirection::from),
            url: input.url.map(SortDirection::from),
        }
    }
}
