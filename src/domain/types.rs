use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a quote came from. System quotes are curated and always visible;
/// user-generated quotes belong to a creator and carry a visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteOrigin {
    System,
    UserGenerated { creator_id: Uuid },
}

impl QuoteOrigin {
    pub fn creator_id(&self) -> Option<Uuid> {
        match self {
            QuoteOrigin::System => None,
            QuoteOrigin::UserGenerated { creator_id } => Some(*creator_id),
        }
    }

    /// Wire label for the `quote_type` response field.
    pub fn quote_type(&self) -> &'static str {
        match self {
            QuoteOrigin::System => "regular",
            QuoteOrigin::UserGenerated { .. } => "user",
        }
    }
}

/// Kind of per-user engagement with a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    Like,
    Dislike,
    Save,
}

impl EngagementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::Like => "like",
            EngagementKind::Dislike => "dislike",
            EngagementKind::Save => "save",
        }
    }

    /// Like and dislike cancel each other; saving is independent.
    pub fn opposite(&self) -> Option<EngagementKind> {
        match self {
            EngagementKind::Like => Some(EngagementKind::Dislike),
            EngagementKind::Dislike => Some(EngagementKind::Like),
            EngagementKind::Save => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_type_labels() {
        assert_eq!(QuoteOrigin::System.quote_type(), "regular");
        let origin = QuoteOrigin::UserGenerated {
            creator_id: Uuid::nil(),
        };
        assert_eq!(origin.quote_type(), "user");
        assert_eq!(origin.creator_id(), Some(Uuid::nil()));
        assert_eq!(QuoteOrigin::System.creator_id(), None);
    }

    #[test]
    fn like_and_dislike_are_opposites() {
        assert_eq!(
            EngagementKind::Like.opposite(),
            Some(EngagementKind::Dislike)
        );
        assert_eq!(
            EngagementKind::Dislike.opposite(),
            Some(EngagementKind::Like)
        );
        assert_eq!(EngagementKind::Save.opposite(), None);
    }
}
