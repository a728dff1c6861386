//! JSON view models for the public API.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{CategoryMeta, UserQuoteRecord};
use crate::domain::feed::{FeedItem, UserOverlay};

/// One quote as served to the feed consumer, per-user flags merged in.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteView {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub category: String,
    pub category_icon: String,
    pub category_id: Option<Uuid>,
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub quote_type: &'static str,
    pub creator_id: Option<Uuid>,
    pub creator_name: Option<String>,
    pub is_liked: bool,
    pub is_saved: bool,
    pub is_own_quote: bool,
}

impl QuoteView {
    /// Merge one pool item with the viewer's overlay. Anonymous viewers
    /// (no overlay) get all-false flags.
    pub fn from_item(
        item: &FeedItem,
        overlay: Option<&UserOverlay>,
        viewer: Option<Uuid>,
    ) -> Self {
        let creator_id = item.origin.creator_id();
        Self {
            id: item.id,
            text: item.text.clone(),
            author: item.author.clone(),
            category: item.category_name.clone(),
            category_icon: item.category_icon.clone(),
            category_id: item.category_id,
            likes_count: item.likes_count,
            dislikes_count: item.dislikes_count,
            quote_type: item.origin.quote_type(),
            creator_id,
            creator_name: item.creator_name.clone(),
            is_liked: overlay.is_some_and(|o| o.is_liked(item.id)),
            is_saved: overlay.is_some_and(|o| o.is_saved(item.id)),
            is_own_quote: match (creator_id, viewer) {
                (Some(creator), Some(viewer)) => creator == viewer,
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaginationView {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Feed response envelope. `pagination` is omitted in the legacy
/// `limit=0` mode, which returns the entire pool.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEnvelope {
    pub quotes: Vec<QuoteView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationView>,
}

/// A user's own quote as returned by the write endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UserQuoteView {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub category_id: Option<Uuid>,
    pub is_public: bool,
}

impl From<&UserQuoteRecord> for UserQuoteView {
    fn from(record: &UserQuoteRecord) -> Self {
        Self {
            id: record.id,
            text: record.text.clone(),
            author: record.author.clone(),
            category_id: record.category_id,
            is_public: record.is_public,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub quote_count: u64,
}

impl From<&CategoryMeta> for CategoryView {
    fn from(meta: &CategoryMeta) -> Self {
        Self {
            id: meta.id,
            name: meta.name.clone(),
            icon: meta.icon.clone(),
            quote_count: meta.quote_count,
        }
    }
}
