//! Feed identity keys.
//!
//! A feed id is `main-feed:` followed by the canonical JSON of the arguments
//! the client supplied. Absent arguments are omitted and keys are emitted in
//! a fixed order, so equal argument sets always produce equal ids.

use serde::Serialize;

use crate::application::feed::FeedArgs;
use crate::domain::feed::LinkOrderBy;

pub const FEED_KEY_PREFIX: &str = "main-feed";

/// Canonical key shape. Field order here is the emitted key order.
#[derive(Serialize)]
struct FeedKeyPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    #[serde(rename = "orderBy", skip_serializing_if = "Option::is_none")]
    order_by: Option<&'a [LinkOrderBy]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    take: Option<i32>,
}

pub fn feed_identity(args: &FeedArgs) -> Result<String, serde_json::Error> {
    let payload = FeedKeyPayload {
        filter: args.filter.as_deref(),
        order_by: args.order_by.as_deref(),
        skip: args.skip,
        take: args.take,
    };
    let serialized = serde_json::to_string(&payload)?;
    Ok(format!("{FEED_KEY_PREFIX}:{serialized}"))
}
