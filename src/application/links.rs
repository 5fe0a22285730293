use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{info, instrument};

use crate::application::auth::Viewer;
use crate::application::repos::{CreateLinkParams, LinksRepo, LinksWriteRepo, RepoError};
use crate::domain::entities::LinkRecord;

const METRIC_LINKS_POSTED_TOTAL: &str = "linkfeed_links_posted_total";

#[derive(Debug, Clone)]
pub struct PostLinkCommand {
    pub description: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Cannot post without logging in.")]
    Unauthenticated,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct LinkService {
    reader: Arc<dyn LinksRepo>,
    writer: Arc<dyn LinksWriteRepo>,
}

impl LinkService {
    pub fn new(reader: Arc<dyn LinksRepo>, writer: Arc<dyn LinksWriteRepo>) -> Self {
        Self { reader, writer }
    }

    /// Creates a link authored by the viewer. Anonymous viewers are rejected
    /// before anything is written.
    #[instrument(skip(self, command), fields(user_id = ?viewer.user_id()))]
    pub async fn post(
        &self,
        viewer: &Viewer,
        command: PostLinkCommand,
    ) -> Result<LinkRecord, LinkError> {
        let Some(user_id) = viewer.user_id() else {
            return Err(LinkError::Unauthenticated);
        };

        let link = self
            .writer
            .create_link(CreateLinkParams {
                description: command.description,
                url: command.url,
                posted_by_id: user_id,
            })
            .await?;

        counter!(METRIC_LINKS_POSTED_TOTAL).increment(1);
        info!(link_id = link.id, user_id, "link posted");

        Ok(link)
    }

    pub async fn find_link(&self, id: i32) -> Result<Option<LinkRecord>, LinkError> {
        Ok(self.reader.find_by_id(id).await?)
    }
}
