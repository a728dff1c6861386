//! Canonical cache keys for the content pool.

use std::fmt;

use uuid::Uuid;

/// Canonical string form of a requested category filter.
///
/// Either the literal `all`, or the selected category ids sorted, deduped,
/// and joined with `,` — so semantically identical requests (same set, any
/// input order) hit the same cache slot. A request whose names all failed
/// to resolve canonicalizes to the empty selection, which is distinct from
/// `all`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey(String);

const ALL: &str = "all";

impl FilterKey {
    /// The unfiltered feed.
    pub fn all() -> Self {
        Self(ALL.to_string())
    }

    /// Canonicalize a set of resolved category ids.
    pub fn from_ids(ids: &[Uuid]) -> Self {
        let mut ids: Vec<Uuid> = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        let joined = ids
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self(joined)
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_key_is_literal() {
        let key = FilterKey::all();
        assert!(key.is_all());
        assert_eq!(key.as_str(), "all");
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(FilterKey::from_ids(&[a, b]), FilterKey::from_ids(&[b, a]));
    }

    #[test]
    fn duplicates_collapse() {
        let a = Uuid::new_v4();
        assert_eq!(FilterKey::from_ids(&[a, a]), FilterKey::from_ids(&[a]));
    }

    #[test]
    fn empty_selection_differs_from_all() {
        let empty = FilterKey::from_ids(&[]);
        assert!(!empty.is_all());
        assert_ne!(empty, FilterKey::all());
    }

    #[test]
    fn distinct_sets_get_distinct_keys() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_ne!(FilterKey::from_ids(&[a]), FilterKey::from_ids(&[b]));
        assert_ne!(FilterKey::from_ids(&[a]), FilterKey::all());
    }
}
