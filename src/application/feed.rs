use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use metrics::histogram;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::application::keys::feed_identity;
use crate::application::repos::{LinkQueryFilter, LinksRepo, RepoError};
use crate::domain::entities::LinkRecord;
use crate::domain::error::DomainError;
use crate::domain::feed::{FeedWindow, LinkOrderBy, order_terms};

const METRIC_FEED_QUERY_MS: &str = "linkfeed_feed_query_ms";

/// Feed arguments exactly as the client supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedArgs {
    pub filter: Option<String>,
    pub skip: Option<i32>,
    pub take: Option<i32>,
    pub order_by: Option<Vec<LinkOrderBy>>,
}

/// One feed response. `count` covers the whole filtered set, not the window.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub links: Vec<LinkRecord>,
    pub count: u64,
    pub id: String,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    InvalidArguments(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("failed to encode feed id: {0}")]
    Identity(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct FeedService {
    links: Arc<dyn LinksRepo>,
    max_take: Option<NonZeroU32>,
}

impl FeedService {
    pub fn new(links: Arc<dyn LinksRepo>, max_take: Option<NonZeroU32>) -> Self {
        Self { links, max_take }
    }

    #[instrument(skip(self), fields(feed_id = tracing::field::Empty))]
    pub async fn feed(&self, args: FeedArgs) -> Result<FeedPage, FeedError> {
        let started_at = Instant::now();
        let id = feed_identity(&args)?;
        tracing::Span::current().record("feed_id", id.as_str());

        let window = FeedWindow::new(args.skip, args.take, self.max_take)?;
        let filter = LinkQueryFilter::from_search(args.filter.as_deref());
        let order = order_terms(args.order_by.as_deref().unwrap_or_default());

        let links = self.links.list_links(&filter, &order, window).await?;
        let count = self.links.count_links(&filter).await?;

        debug!(returned = links.len(), count, "feed resolved");
        histogram!(METRIC_FEED_QUERY_MS).record(started_at.elapsed().as_secs_f64() * 1000.0);

        Ok(FeedPage { links, count, id })
    }
}
