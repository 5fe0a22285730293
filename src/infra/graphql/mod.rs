//! GraphQL schema over the feed and link services.

mod error;
mod loaders;
mod mutation;
mod query;
mod types;

pub use loaders::RelationLoaders;
pub use mutation::MutationRoot;
pub use query::QueryRoot;

use async_graphql::{EmptySubscription, Schema};

use crate::application::feed::FeedService;
use crate::application::links::LinkService;

pub type LinkSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Services are schema-wide; the viewer and loaders are attached per request.
pub fn build_schema(feed: FeedService, links: LinkService) -> LinkSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(feed)
        .data(links)
        .finish()
}

pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdl_exposes_feed_and_post() {
        let sdl = schema_sdl();
        assert!(sdl.contains("orderBy: [LinkOrderByInput!]"));
        assert!(sdl.contains("): Feed!"));
        assert!(sdl.contains("post(description: String!, url: String!): link!"));
        assert!(sdl.contains("link(id: Int!): link"));
        assert!(sdl.contains("enum Sort"));
        assert!(sdl.contains("postedBy: User"));
        assert!(sdl.contains("voters: [User!]!"));
    }
}
