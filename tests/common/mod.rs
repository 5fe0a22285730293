//! In-memory repositories behind the application traits.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;

use linkfeed::application::auth::SessionVerifier;
use linkfeed::application::feed::FeedService;
use linkfeed::application::links::LinkService;
use linkfeed::application::repos::{
    CreateLinkParams, HealthRepo, LinkQueryFilter, LinkRelationsRepo, LinksRepo, LinksWriteRepo,
    RepoError,
};
use linkfeed::domain::entities::{LinkRecord, UserRecord};
use linkfeed::domain::feed::{FeedWindow, LinkOrderTerm};
use linkfeed::domain::types::{LinkSortField, SortDirection};
use linkfeed::infra::graphql::{LinkSchema, build_schema};
use linkfeed::infra::http::HttpState;

pub const JWT_SECRET: &str = "integration-secret";

#[derive(Default)]
struct StoreState {
    users: Vec<UserRecord>,
    links: Vec<LinkRecord>,
    votes: Vec<(i32, i32)>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
    pub list_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
    pub posted_by_batches: AtomicUsize,
    pub voters_batches: AtomicUsize,
    pub healthy: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        let store = Self::default();
        store.healthy.store(true, AtomicOrdering::SeqCst);
        Arc::new(store)
    }

    pub async fn add_user(&self, name: &str, email: &str) -> UserRecord {
        let mut state = self.state.lock().await;
        let user = UserRecord {
            id: state.users.len() as i32 + 1,
            name: name.to_string(),
            email: email.to_string(),
        };
        state.users.push(user.clone());
        user
    }

    /// Links created `minutes_ago` before a fixed reference instant.
    pub async fn add_link(
        &self,
        description: &str,
        url: &str,
        minutes_ago: i64,
        posted_by_id: Option<i32>,
    ) -> LinkRecord {
        let mut state = self.state.lock().await;
        let link = LinkRecord {
            id: state.links.len() as i32 + 1,
            description: description.to_string(),
            url: url.to_string(),
            created_at: reference_instant() - Duration::minutes(minutes_ago),
            posted_by_id,
        };
        state.links.push(link.clone());
        link
    }

    pub async fn add_vote(&self, link_id: i32, user_id: i32) {
        self.state.lock().await.votes.push((link_id, user_id));
    }

    pub async fn link_count(&self) -> usize {
        self.state.lock().await.links.len()
    }

    pub async fn links(&self) -> Vec<LinkRecord> {
        self.state.lock().await.links.clone()
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, AtomicOrdering::SeqCst);
    }
}

pub fn reference_instant() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("valid timestamp")
}

fn matches(link: &LinkRecord, filter: &LinkQueryFilter) -> bool {
    match filter.search.as_deref() {
        Some(search) => link.description.contains(search) || link.url.contains(search),
        None => true,
    }
}

fn compare(left: &LinkRecord, right: &LinkRecord, order: &[LinkOrderTerm]) -> Ordering {
    for term in order {
        let ordering = match term.field {
            LinkSortField::Description => left.description.cmp(&right.description),
            LinkSortField::Url => left.url.cmp(&right.url),
            LinkSortField::CreatedAt => left.created_at.cmp(&right.created_at),
        };
        let ordering = match term.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.id.cmp(&right.id)
}

#[async_trait]
impl LinksRepo for MemoryStore {
    async fn list_links(
        &self,
        filter: &LinkQueryFilter,
        order: &[LinkOrderTerm],
        window: FeedWindow,
    ) -> Result<Vec<LinkRecord>, RepoError> {
        self.list_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let state = self.state.lock().await;
        let mut links: Vec<LinkRecord> = state
            .links
            .iter()
            .filter(|link| matches(link, filter))
            .cloned()
            .collect();
        links.sort_by(|left, right| compare(left, right, order));

        let skip = window.skip.unwrap_or(0) as usize;
        let take = window.take.map(|take| take as usize).unwrap_or(usize::MAX);
        Ok(links.into_iter().skip(skip).take(take).collect())
    }

    async fn count_links(&self, filter: &LinkQueryFilter) -> Result<u64, RepoError> {
        self.count_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let state = self.state.lock().await;
        Ok(state
            .links
            .iter()
            .filter(|link| matches(link, filter))
            .count() as u64)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<LinkRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.links.iter().find(|link| link.id == id).cloned())
    }
}

#[async_trait]
impl LinksWriteRepo for MemoryStore {
    async fn create_link(&self, params: CreateLinkParams) -> Result<LinkRecord, RepoError> {
        let mut state = self.state.lock().await;
        if !state.users.iter().any(|user| user.id == params.posted_by_id) {
            return Err(RepoError::InvalidInput {
                message: "insert on table \"links\" violates foreign key constraint".to_string(),
            });
        }
        let link = LinkRecord {
            id: state.links.len() as i32 + 1,
            description: params.description,
            url: params.url,
            created_at: OffsetDateTime::now_utc(),
            posted_by_id: Some(params.posted_by_id),
        };
        state.links.push(link.clone());
        Ok(link)
    }
}

#[async_trait]
impl LinkRelationsRepo for MemoryStore {
    async fn posted_by_for_links(
        &self,
        link_ids: &[i32],
    ) -> Result<HashMap<i32, UserRecord>, RepoError> {
        self.posted_by_batches.fetch_add(1, AtomicOrdering::SeqCst);
        let state = self.state.lock().await;
        let mut authors = HashMap::new();
        for link in state.links.iter().filter(|link| link_ids.contains(&link.id)) {
            if let Some(user) = link
                .posted_by_id
                .and_then(|id| state.users.iter().find(|user| user.id == id))
            {
                authors.insert(link.id, user.clone());
            }
        }
        Ok(authors)
    }

    async fn voters_for_links(
        &self,
        link_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<UserRecord>>, RepoError> {
        self.voters_batches.fetch_add(1, AtomicOrdering::SeqCst);
        let state = self.state.lock().await;
        let mut voters: HashMap<i32, Vec<UserRecord>> = HashMap::new();
        for (link_id, user_id) in state.votes.iter().copied() {
            if !link_ids.contains(&link_id) {
                continue;
            }
            if let Some(user) = state.users.iter().find(|user| user.id == user_id) {
                voters.entry(link_id).or_default().push(user.clone());
            }
        }
        for users in voters.values_mut() {
            users.sort_by_key(|user| user.id);
        }
        Ok(voters)
    }
}

#[async_trait]
impl HealthRepo for MemoryStore {
    async fn health_check(&self) -> Result<(), RepoError> {
        if self.healthy.load(AtomicOrdering::SeqCst) {
            Ok(())
        } else {
            Err(RepoError::Timeout)
        }
    }
}

pub fn feed_service(store: &Arc<MemoryStore>) -> FeedService {
    FeedService::new(store.clone(), None)
}

pub fn link_service(store: &Arc<MemoryStore>) -> LinkService {
    LinkService::new(store.clone(), store.clone())
}

pub fn schema(store: &Arc<MemoryStore>) -> LinkSchema {
    build_schema(feed_service(store), link_service(store))
}

pub fn http_state(store: &Arc<MemoryStore>) -> HttpState {
    HttpState {
        schema: schema(store),
        sessions: Arc::new(SessionVerifier::new(JWT_SECRET)),
        relations: store.clone(),
        health: store.clone(),
    }
}

/// Seeds the two tutorial links plus one unrelated link.
pub async fn seed_tutorials(store: &MemoryStore) -> (UserRecord, UserRecord) {
    let alice = store.add_user("Alice", "alice@example.com").await;
    let bob = store.add_user("Bob", "bob@example.com").await;
    store
        .add_link(
            "howtographql.com tutorial",
            "https://www.howtographql.com",
            30,
            Some(alice.id),
        )
        .await;
    store
        .add_link("graphql.org official", "https://graphql.org", 10, Some(bob.id))
        .await;
    store
        .add_link("Rust book", "https://doc.rust-lang.org/book", 20, None)
        .await;
    (alice, bob)
}
