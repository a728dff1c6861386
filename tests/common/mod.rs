//! In-memory repository fakes and a wired service harness for
//! integration tests that exercise feed assembly and cache behavior
//! without a database.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use quotedrift::application::{
    catalog::CatalogService,
    engagement::EngagementService,
    feed::{FeedService, PageLimits},
    overlay::OverlayService,
    quotes::QuoteService,
    repos::{
        CategoriesRepo, CategoryFilter, CreateUserQuoteParams, EngagementRepo,
        EngagementWriteRepo, HealthRepo, QuotesRepo, QuotesWriteRepo, RepoError,
        UpdateUserQuoteParams, UsersRepo,
    },
};
use quotedrift::cache::{CacheConfig, CacheInvalidator, FeedCacheStore};
use quotedrift::domain::entities::{CategoryRecord, SystemQuoteRecord, UserQuoteRecord};
use quotedrift::domain::types::EngagementKind;

#[derive(Default)]
struct State {
    categories: Vec<CategoryRecord>,
    system: Vec<SystemQuoteRecord>,
    user: Vec<UserQuoteRecord>,
    users: HashMap<Uuid, String>,
    engagements: HashSet<(Uuid, Uuid, EngagementKind)>,
}

/// Shared fake backing store. Read methods count their invocations so
/// tests can assert whether a request was served from cache or rebuilt.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
    pub system_list_calls: AtomicUsize,
    pub user_list_calls: AtomicUsize,
    pub liked_ids_calls: AtomicUsize,
    pub like_count_calls: AtomicUsize,
    pub fail_like_counts: AtomicBool,
}

impl FakeStore {
    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("fake store lock")
    }

    pub fn add_category(&self, name: &str, icon: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state().categories.push(CategoryRecord {
            id,
            name: name.to_string(),
            icon: icon.to_string(),
        });
        id
    }

    pub fn add_system_quote(&self, text: &str, author: &str, category_id: Option<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        self.state().system.push(SystemQuoteRecord {
            id,
            text: text.to_string(),
            author: author.to_string(),
            category_id,
            created_at: OffsetDateTime::now_utc(),
        });
        id
    }

    pub fn add_user(&self, display_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state().users.insert(id, display_name.to_string());
        id
    }

    pub fn add_user_quote(
        &self,
        creator_id: Uuid,
        text: &str,
        category_id: Option<Uuid>,
        is_public: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        self.state().user.push(UserQuoteRecord {
            id,
            text: text.to_string(),
            author: String::new(),
            category_id,
            creator_id,
            is_public,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn add_engagement(&self, user_id: Uuid, quote_id: Uuid, kind: EngagementKind) {
        self.state().engagements.insert((user_id, quote_id, kind));
    }
}

fn matches_filter(filter: &CategoryFilter, category_id: Option<Uuid>) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Categories(ids) => {
            category_id.is_some_and(|id| ids.contains(&id))
        }
    }
}

#[async_trait]
impl CategoriesRepo for FakeStore {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        Ok(self.state().categories.clone())
    }

    async fn count_quotes_by_category(&self) -> Result<HashMap<Uuid, u64>, RepoError> {
        let state = self.state();
        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for quote in &state.system {
            if let Some(id) = quote.category_id {
                *counts.entry(id).or_default() += 1;
            }
        }
        for quote in state.user.iter().filter(|q| q.is_public) {
            if let Some(id) = quote.category_id {
                *counts.entry(id).or_default() += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl QuotesRepo for FakeStore {
    async fn list_system_quotes(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<SystemQuoteRecord>, RepoError> {
        self.system_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state()
            .system
            .iter()
            .filter(|quote| matches_filter(filter, quote.category_id))
            .cloned()
            .collect())
    }

    async fn list_public_user_quotes(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<UserQuoteRecord>, RepoError> {
        self.user_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state()
            .user
            .iter()
            .filter(|quote| quote.is_public && matches_filter(filter, quote.category_id))
            .cloned()
            .collect())
    }

    async fn find_user_quote(&self, id: Uuid) -> Result<Option<UserQuoteRecord>, RepoError> {
        Ok(self.state().user.iter().find(|q| q.id == id).cloned())
    }
}

#[async_trait]
impl QuotesWriteRepo for FakeStore {
    async fn create_user_quote(
        &self,
        params: CreateUserQuoteParams,
    ) -> Result<UserQuoteRecord, RepoError> {
        let now = OffsetDateTime::now_utc();
        let record = UserQuoteRecord {
            id: Uuid::new_v4(),
            text: params.text,
            author: params.author,
            category_id: params.category_id,
            creator_id: params.creator_id,
            is_public: params.is_public,
            created_at: now,
            updated_at: now,
        };
        self.state().user.push(record.clone());
        Ok(record)
    }

    async fn update_user_quote(
        &self,
        params: UpdateUserQuoteParams,
    ) -> Result<UserQuoteRecord, RepoError> {
        let mut state = self.state();
        let quote = state
            .user
            .iter_mut()
            .find(|q| q.id == params.id)
            .ok_or(RepoError::NotFound)?;
        quote.text = params.text;
        quote.author = params.author;
        quote.category_id = params.category_id;
        quote.updated_at = OffsetDateTime::now_utc();
        Ok(quote.clone())
    }

    async fn set_user_quote_visibility(
        &self,
        id: Uuid,
        is_public: bool,
    ) -> Result<UserQuoteRecord, RepoError> {
        let mut state = self.state();
        let quote = state
            .user
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(RepoError::NotFound)?;
        quote.is_public = is_public;
        quote.updated_at = OffsetDateTime::now_utc();
        Ok(quote.clone())
    }

    async fn delete_user_quote(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state();
        let before = state.user.len();
        state.user.retain(|q| q.id != id);
        if state.user.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl EngagementRepo for FakeStore {
    async fn liked_quote_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, RepoError> {
        self.liked_ids_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state()
            .engagements
            .iter()
            .filter(|(user, _, kind)| *user == user_id && *kind == EngagementKind::Like)
            .map(|(_, quote, _)| *quote)
            .collect())
    }

    async fn saved_quote_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, RepoError> {
        Ok(self
            .state()
            .engagements
            .iter()
            .filter(|(user, _, kind)| *user == user_id && *kind == EngagementKind::Save)
            .map(|(_, quote, _)| *quote)
            .collect())
    }

    async fn like_counts(&self) -> Result<HashMap<Uuid, u64>, RepoError> {
        self.like_count_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_like_counts.load(Ordering::SeqCst) {
            return Err(RepoError::Timeout);
        }
        Ok(self.counts_for(EngagementKind::Like))
    }

    async fn dislike_counts(&self) -> Result<HashMap<Uuid, u64>, RepoError> {
        Ok(self.counts_for(EngagementKind::Dislike))
    }
}

impl FakeStore {
    fn counts_for(&self, wanted: EngagementKind) -> HashMap<Uuid, u64> {
        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for (_, quote, kind) in self.state().engagements.iter() {
            if *kind == wanted {
                *counts.entry(*quote).or_default() += 1;
            }
        }
        counts
    }
}

#[async_trait]
impl EngagementWriteRepo for FakeStore {
    async fn set_engagement(
        &self,
        user_id: Uuid,
        quote_id: Uuid,
        kind: EngagementKind,
        engaged: bool,
    ) -> Result<(), RepoError> {
        let mut state = self.state();
        if engaged {
            if let Some(opposite) = kind.opposite() {
                state.engagements.remove(&(user_id, quote_id, opposite));
            }
            state.engagements.insert((user_id, quote_id, kind));
        } else {
            state.engagements.remove(&(user_id, quote_id, kind));
        }
        Ok(())
    }
}

#[async_trait]
impl UsersRepo for FakeStore {
    async fn display_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, RepoError> {
        let state = self.state();
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|name| (*id, name.clone())))
            .collect())
    }
}

#[async_trait]
impl HealthRepo for FakeStore {
    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

/// Everything wired the way `main` wires it, over one [`FakeStore`].
pub struct TestApp {
    pub store: Arc<FakeStore>,
    pub cache: Arc<FeedCacheStore>,
    pub catalog: CatalogService,
    pub feed: Arc<FeedService>,
    pub quotes: Arc<QuoteService>,
    pub engagement: Arc<EngagementService>,
}

pub fn build_app(config: CacheConfig) -> TestApp {
    let store = Arc::new(FakeStore::default());
    let cache = Arc::new(FeedCacheStore::new(config));
    let invalidator = CacheInvalidator::new(cache.clone());

    let catalog = CatalogService::new(store.clone(), cache.clone());
    let overlay = OverlayService::new(store.clone(), cache.clone());
    let feed = Arc::new(FeedService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        catalog.clone(),
        overlay,
        cache.clone(),
        PageLimits::default(),
    ));
    let quotes = Arc::new(QuoteService::new(
        store.clone(),
        store.clone(),
        invalidator.clone(),
    ));
    let engagement = Arc::new(EngagementService::new(store.clone(), invalidator));

    TestApp {
        store,
        cache,
        catalog,
        feed,
        quotes,
        engagement,
    }
}

pub fn default_app() -> TestApp {
    build_app(CacheConfig::default())
}
