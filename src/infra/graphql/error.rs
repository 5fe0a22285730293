use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use tracing::error;

use crate::application::feed::FeedError;
use crate::application::links::LinkError;
use crate::application::repos::RepoError;
use crate::domain::error::DomainError;

const BAD_USER_INPUT: &str = "BAD_USER_INPUT";

pub(crate) fn feed_error(err: FeedError) -> Error {
    match err {
        FeedError::InvalidArguments(err) => domain_error(err),
        FeedError::Repo(err) => repo_error(&err),
        FeedError::Identity(_) => {
            error!(target = "linkfeed::graphql", error = %err, "feed id encoding failed");
            Error::new(err.to_string())
        }
    }
}

pub(crate) fn link_error(err: LinkError) -> Error {
    match err {
        LinkError::Unauthenticated => Error::new(err.to_string()),
        LinkError::Repo(err) => repo_error(&err),
    }
}

pub(crate) fn loader_error(err: Arc<RepoError>) -> Error {
    repo_error(&err)
}

fn domain_error(err: DomainError) -> Error {
    match err {
        DomainError::Validation { message } => {
            Error::new(message).extend_with(|_, ext| ext.set("code", BAD_USER_INPUT))
        }
    }
}

fn repo_error(err: &RepoError) -> Error {
    error!(target = "linkfeed::graphql", error = %err, "storage request failed");
    Error::new(err.to_string())
}
