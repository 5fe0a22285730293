use async_graphql::{Context, Object, Result};

use crate::application::auth::Viewer;
use crate::application::links::{LinkService, PostLinkCommand};

use super::error::link_error;
use super::types::Link;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Creates a link authored by the caller.
    async fn post(&self, ctx: &Context<'_>, description: String, url: String) -> Result<Link> {
        let service = ctx.data::<LinkService>()?;
        let viewer = ctx.data_opt::<Viewer>().copied().unwrap_or_default();
        let link = service
            .post(&viewer, PostLinkCommand { description, url })
            .await
            .map_err(link_error)?;
        Ok(Link::from(link))
    }
}
