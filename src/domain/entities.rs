//! Persistent record types returned by the repository layer.

use time::OffsetDateTime;
use uuid::Uuid;

/// A quote category as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
}

/// Composed category metadata served by the catalog cache: the stored
/// record joined with the aggregated quote count for that category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMeta {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub quote_count: u64,
}

/// A curated, always-visible quote.
#[derive(Debug, Clone)]
pub struct SystemQuoteRecord {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub category_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

/// A user-authored quote. Only public ones enter the feed.
#[derive(Debug, Clone)]
pub struct UserQuoteRecord {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub category_id: Option<Uuid>,
    pub creator_id: Uuid,
    pub is_public: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
