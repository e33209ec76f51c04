use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::Result;
use crate::embedding::{cosine_similarity, EmbeddingProvider};
use crate::matcher::index::SemanticIndex;
use crate::thesaurus::{normalize_phrase, AuthorityTable};

lazy_static! {
    /// Runs of word characters and internal spaces, as candidate phrases
    /// are carved out of free text.
    static ref PHRASE_RE: Regex = Regex::new(r"[\w\s]+").expect("invalid phrase regex");
}

/// Candidate phrases shorter than this many characters carry too little
/// signal to embed.
const MIN_PHRASE_CHARS: usize = 5;
const MIN_PHRASE_WORDS: usize = 2;

/// Exact-strategy windows are bounded by the longest phrasing in the
/// table, capped to keep degenerate tables from exploding the window set.
const MAX_WINDOW_WORDS: usize = 8;

/// One suggested authorized term with the best similarity that reached
/// it. Exact hits score 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    pub term: String,
    pub score: f32,
}

/// Resolves free text to authorized terms via exact lookups over the
/// authority table plus cosine similarity against the semantic index.
pub struct TermSuggester {
    table: AuthorityTable,
    index: SemanticIndex,
    provider: Arc<dyn EmbeddingProvider>,
}

impl TermSuggester {
    /// Builds the suggester, embedding every distinct phrasing once.
    pub async fn build(
        table: AuthorityTable,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let index = SemanticIndex::build(&table, provider.as_ref()).await?;
        Ok(Self {
            table,
            index,
            provider,
        })
    }

    pub fn table(&self) -> &AuthorityTable {
        &self.table
    }

    pub fn index(&self) -> &SemanticIndex {
        &self.index
    }

    /// Suggests authorized terms for `text`. The threshold is a strict
    /// lower bound on cosine similarity for the semantic strategy; exact
    /// hits are independent of it. Results are deduplicated per term,
    /// best score kept, sorted score-descending with alphabetical
    /// tie-break. Empty or whitespace-only input yields an empty result.
    pub async fn suggest(&self, text: &str, threshold: f32) -> Result<Vec<TermMatch>> {
        let normalized = normalize_phrase(text);
        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        let mut best: HashMap<String, f32> = HashMap::new();

        for term in self.exact_matches(&normalized) {
            best.insert(term.to_string(), 1.0);
        }

        if !self.index.is_empty() {
            for (term, score) in self.semantic_matches(&normalized, threshold).await? {
                let entry = best.entry(term).or_insert(score);
                if score > *entry {
                    *entry = score;
                }
            }
        }

        let mut matches: Vec<TermMatch> = best
            .into_iter()
            .map(|(term, score)| TermMatch { term, score })
            .collect();
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.term.cmp(&b.term))
        });

        info!(
            "Query '{}' matched {} terms (threshold {})",
            crate::safe_truncate_ellipsis(text, 40),
            matches.len(),
            threshold
        );
        Ok(matches)
    }

    /// Ranked authorized term labels only, best-first.
    pub async fn suggest_terms(&self, text: &str, threshold: f32) -> Result<Vec<String>> {
        Ok(self
            .suggest(text, threshold)
            .await?
            .into_iter()
            .map(|m| m.term)
            .collect())
    }

    /// Exact strategy: every word window of the normalized input is
    /// looked up directly in the authority table. Windows are taken
    /// inside word-character runs, so punctuation neither clings to a
    /// token ("verba." vs "verba") nor lets a window span a clause
    /// boundary.
    fn exact_matches(&self, normalized: &str) -> Vec<&str> {
        let max_words = self.table.max_phrasing_words().min(MAX_WINDOW_WORDS);

        let mut hits = Vec::new();
        for run in PHRASE_RE.find_iter(normalized) {
            let words: Vec<&str> = run.as_str().split_whitespace().collect();
            for window in 1..=max_words.min(words.len()) {
                for chunk in words.windows(window) {
                    let phrase = chunk.join(" ");
                    if let Some(term) = self.table.resolve_normalized(&phrase) {
                        debug!("Exact hit: '{}' -> '{}'", phrase, term);
                        hits.push(term);
                    }
                }
            }
        }
        hits
    }

    /// Semantic strategy: candidate phrases (plus the whole input) are
    /// embedded in one batch and compared against every indexed phrasing.
    async fn semantic_matches(
        &self,
        normalized: &str,
        threshold: f32,
    ) -> Result<Vec<(String, f32)>> {
        let candidates = candidate_phrases(normalized);
        let vectors = self.provider.encode_batch(&candidates).await?;

        let mut matches = Vec::new();
        for vector in &vectors {
            for entry in self.index.entries() {
                let score = cosine_similarity(vector, &entry.vector);
                if score > threshold {
                    if let Some(term) = self.table.resolve_normalized(&entry.phrasing) {
                        matches.push((term.to_string(), score));
                    }
                }
            }
        }
        Ok(matches)
    }
}

/// Extracts candidate phrases from normalized input: multi-word runs of
/// word characters, plus the whole input so short queries are never
/// filtered away. Deduplicated, order preserved.
fn candidate_phrases(normalized: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for m in PHRASE_RE.find_iter(normalized) {
        let phrase = m.as_str().trim();
        if phrase.chars().count() < MIN_PHRASE_CHARS {
            continue;
        }
        if phrase.split_whitespace().count() < MIN_PHRASE_WORDS {
            continue;
        }
        if !candidates.iter().any(|c| c == phrase) {
            candidates.push(phrase.to_string());
        }
    }

    if !candidates.iter().any(|c| c == normalized) {
        candidates.push(normalized.to_string());
    }
    candidates
}
