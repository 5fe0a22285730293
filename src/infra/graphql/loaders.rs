//! Per-request batch loaders for link relations.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use tracing::debug;

use crate::application::repos::{LinkRelationsRepo, RepoError};
use crate::domain::entities::UserRecord;

/// Author of each link, keyed by link id.
pub struct PostedByLoader {
    relations: Arc<dyn LinkRelationsRepo>,
}

impl Loader<i32> for PostedByLoader {
    type Value = UserRecord;
    type Error = Arc<RepoError>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        debug!(keys = keys.len(), "loading link authors");
        self.relations
            .posted_by_for_links(keys)
            .await
            .map_err(Arc::new)
    }
}

/// Voters of each link, keyed by link id.
pub struct VotersLoader {
    relations: Arc<dyn LinkRelationsRepo>,
}

impl Loader<i32> for VotersLoader {
    type Value = Vec<UserRecord>;
    type Error = Arc<RepoError>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        debug!(keys = keys.len(), "loading link voters");
        self.relations
            .voters_for_links(keys)
            .await
            .map_err(Arc::new)
    }
}

/// Built fresh for every request so cached relations never leak between callers.
pub struct RelationLoaders {
    pub posted_by: DataLoader<PostedByLoader>,
    pub voters: DataLoader<VotersLoader>,
}

impl RelationLoaders {
    pub fn new(relations: Arc<dyn LinkRelationsRepo>) -> Self {
        Self {
            posted_by: DataLoader::new(
                PostedByLoader {
                    relations: relations.clone(),
                },
                tokio::spawn,
            ),
            voters: DataLoader::new(VotersLoader { relations }, tokio::spawn),
        }
    }
}
