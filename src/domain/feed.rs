//! Projected feed types: the common item view both quote origins map onto,
//! the shuffled content pool, and the per-user engagement overlay.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::entities::{CategoryMeta, SystemQuoteRecord, UserQuoteRecord};
use super::types::QuoteOrigin;

/// Display fallback when a system quote's category cannot be resolved.
pub const SYSTEM_FALLBACK_CATEGORY: (&str, &str) = ("General", "\u{1F4D6}");
/// Display fallback when a user quote's category cannot be resolved.
pub const USER_FALLBACK_CATEGORY: (&str, &str) = ("Personal", "\u{270D}\u{FE0F}");

/// A fully projected feed entry. Immutable once placed into a pool; content
/// mutations become visible only through invalidation and rebuild.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub origin: QuoteOrigin,
    pub category_id: Option<Uuid>,
    pub category_name: String,
    pub category_icon: String,
    pub creator_name: Option<String>,
    pub likes_count: u64,
    pub dislikes_count: u64,
}

impl FeedItem {
    /// Project a system quote into the common view. Missing category
    /// metadata falls back to `General`; missing counts default to zero.
    pub fn from_system(
        record: &SystemQuoteRecord,
        catalog: &HashMap<Uuid, CategoryMeta>,
        likes: &HashMap<Uuid, u64>,
        dislikes: &HashMap<Uuid, u64>,
    ) -> Self {
        let meta = record.category_id.and_then(|id| catalog.get(&id));
        let (name, icon) = match meta {
            Some(meta) => (meta.name.clone(), meta.icon.clone()),
            None => (
                SYSTEM_FALLBACK_CATEGORY.0.to_string(),
                SYSTEM_FALLBACK_CATEGORY.1.to_string(),
            ),
        };
        Self {
            id: record.id,
            text: record.text.clone(),
            author: record.author.clone(),
            origin: QuoteOrigin::System,
            category_id: record.category_id,
            category_name: name,
            category_icon: icon,
            creator_name: None,
            likes_count: likes.get(&record.id).copied().unwrap_or(0),
            dislikes_count: dislikes.get(&record.id).copied().unwrap_or(0),
        }
    }

    /// Project a public user quote into the common view. Missing category
    /// metadata falls back to `Personal`.
    pub fn from_user(
        record: &UserQuoteRecord,
        catalog: &HashMap<Uuid, CategoryMeta>,
        creator_names: &HashMap<Uuid, String>,
        likes: &HashMap<Uuid, u64>,
        dislikes: &HashMap<Uuid, u64>,
    ) -> Self {
        let meta = record.category_id.and_then(|id| catalog.get(&id));
        let (name, icon) = match meta {
            Some(meta) => (meta.name.clone(), meta.icon.clone()),
            None => (
                USER_FALLBACK_CATEGORY.0.to_string(),
                USER_FALLBACK_CATEGORY.1.to_string(),
            ),
        };
        Self {
            id: record.id,
            text: record.text.clone(),
            author: record.author.clone(),
            origin: QuoteOrigin::UserGenerated {
                creator_id: record.creator_id,
            },
            category_id: record.category_id,
            category_name: name,
            category_icon: icon,
            creator_name: creator_names.get(&record.creator_id).cloned(),
            likes_count: likes.get(&record.id).copied().unwrap_or(0),
            dislikes_count: dislikes.get(&record.id).copied().unwrap_or(0),
        }
    }
}

/// The merged, shuffled, paginatable collection of feed items for one
/// filter key. Shuffled exactly once at rebuild, so every page within the
/// entry's lifetime sees the same stable order.
#[derive(Debug, Clone)]
pub struct ContentPool {
    pub items: Vec<FeedItem>,
}

impl ContentPool {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Return the `[offset, offset + limit)` window of the stable order.
    pub fn page(&self, limit: usize, offset: usize) -> &[FeedItem] {
        let start = offset.min(self.items.len());
        let end = offset.saturating_add(limit).min(self.items.len());
        &self.items[start..end]
    }

    pub fn has_more(&self, limit: usize, offset: usize) -> bool {
        offset.saturating_add(limit) < self.items.len()
    }
}

/// Per-user engagement state merged onto feed pages at read time.
/// Replaced wholesale on refresh, never patched field-by-field.
#[derive(Debug, Clone, Default)]
pub struct UserOverlay {
    pub liked: HashSet<Uuid>,
    pub saved: HashSet<Uuid>,
}

impl UserOverlay {
    pub fn is_liked(&self, quote_id: Uuid) -> bool {
        self.liked.contains(&quote_id)
    }

    pub fn is_saved(&self, quote_id: Uuid) -> bool {
        self.saved.contains(&quote_id)
    }
}
