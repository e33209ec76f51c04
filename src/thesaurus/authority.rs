use std::collections::HashMap;
use tracing::debug;

/// Normalizes a phrasing for identity and lookup: lower-cased,
/// whitespace-collapsed. Two phrasings with the same normalized form are
/// the same entry.
pub fn normalize_phrase(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Mapping from every known phrasing (normalized) to the authorized term
/// it resolves to. Authorized terms always map to themselves.
#[derive(Debug, Clone, Default)]
pub struct AuthorityTable {
    entries: HashMap<String, String>,
}

impl AuthorityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an authorized term under its own normalized label.
    pub fn register_term(&mut self, label: &str) {
        self.register(label, label);
    }

    /// Registers a variation resolving to `target`. If the same normalized
    /// phrasing was already registered under another term, the last
    /// registration wins.
    pub fn register(&mut self, phrasing: &str, target: &str) {
        let key = normalize_phrase(phrasing);
        if key.is_empty() {
            return;
        }
        if let Some(previous) = self.entries.insert(key, target.to_string()) {
            if previous != target {
                debug!(
                    "Phrasing '{}' remapped from '{}' to '{}'",
                    phrasing, previous, target
                );
            }
        }
    }

    /// Looks up the authorized term for a phrasing, normalizing first.
    pub fn resolve(&self, phrasing: &str) -> Option<&str> {
        self.entries
            .get(&normalize_phrase(phrasing))
            .map(String::as_str)
    }

    /// Direct lookup with an already-normalized key.
    pub fn resolve_normalized(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The distinct normalized phrasings to be indexed, sorted for
    /// deterministic embedding order.
    pub fn phrasings(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of distinct authorized terms reachable through the table.
    pub fn term_count(&self) -> usize {
        let mut terms: Vec<&str> = self.entries.values().map(String::as_str).collect();
        terms.sort_unstable();
        terms.dedup();
        terms.len()
    }

    /// Longest phrasing in the table, in words. Bounds the window size of
    /// the exact-match strategy.
    pub fn max_phrasing_words(&self) -> usize {
        self.entries
            .keys()
            .map(|k| k.split_whitespace().count())
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_phrase("  Desvio  de\tVerba "), "desvio de verba");
        assert_eq!(normalize_phrase("Peculato"), "peculato");
    }

    #[test]
    fn test_term_maps_to_itself() {
        let mut table = AuthorityTable::new();
        table.register_term("Peculato");
        assert_eq!(table.resolve("peculato"), Some("Peculato"));
        assert_eq!(table.resolve("  PECULATO  "), Some("Peculato"));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut table = AuthorityTable::new();
        table.register("norma", "Norma");
        table.register("norma", "Legislação");
        assert_eq!(table.resolve("norma"), Some("Legislação"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_phrasings_are_distinct_and_sorted() {
        let mut table = AuthorityTable::new();
        table.register_term("Peculato");
        table.register("Desvio de verba", "Peculato");
        table.register("desvio  de  VERBA", "Peculato");
        assert_eq!(table.phrasings(), vec!["desvio de verba", "peculato"]);
    }

    #[test]
    fn test_empty_phrasing_ignored() {
        let mut table = AuthorityTable::new();
        table.register("   ", "Peculato");
        assert!(table.is_empty());
    }

    #[test]
    fn test_max_phrasing_words() {
        let mut table = AuthorityTable::new();
        assert_eq!(table.max_phrasing_words(), 0);
        table.register("furto de recurso público", "Peculato");
        table.register_term("Peculato");
        assert_eq!(table.max_phrasing_words(), 4);
    }
}
