use async_graphql::{Context, Object, Result};

use crate::application::feed::{FeedArgs, FeedService};
use crate::application::links::LinkService;

use super::error::{feed_error, link_error};
use super::types::{Feed, Link, LinkOrderByInput};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Links matching `filter`, ordered by `orderBy` and windowed by `skip`/`take`.
    async fn feed(
        &self,
        ctx: &Context<'_>,
        filter: Option<String>,
        skip: Option<i32>,
        take: Option<i32>,
        order_by: Option<Vec<LinkOrderByInput>>,
    ) -> Result<Feed> {
        let service = ctx.data::<FeedService>()?;
        let args = FeedArgs {
            filter,
            skip,
            take,
            order_by: order_by.map(|entries| entries.into_iter().map(Into::into).collect()),
        };
        let page = service.feed(args).await.map_err(feed_error)?;
        Feed::try_from(page)
    }

    async fn link(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Link>> {
        let service = ctx.data::<LinkService>()?;
        let link = service.find_link(id).await.map_err(link_error)?;
        Ok(link.map(Link::from))
    }
}
