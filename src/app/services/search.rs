//! # Search Suggestion Engine
//!
//! Ranks catalogue titles and tags against a free-text query.
//!
//! Scoring is by case-insensitive containment: exact match 100, prefix 80,
//! substring 60. Results are deduplicated by `(text, kind)`, stably sorted by
//! descending score and truncated. Result lists are shared `Arc` slices kept
//! in a bounded LRU cache keyed by the exact query string, so repeating a
//! query hands back the very same allocation without rescanning.

use crate::app::models::ContentCatalog;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

pub const EXACT_SCORE: u8 = 100;
pub const PREFIX_SCORE: u8 = 80;
pub const CONTAINS_SCORE: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    /// A content title; carries the content id
    Game,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub kind: SuggestionKind,
    pub score: u8,
    pub id: Option<u32>,
}

pub type Suggestions = Arc<[Suggestion]>;

/// Score `text` against `query`; both must already be lower-cased
pub fn score(text: &str, query: &str) -> Option<u8> {
    if text == query {
        Some(EXACT_SCORE)
    } else if text.starts_with(query) {
        Some(PREFIX_SCORE)
    } else if text.contains(query) {
        Some(CONTAINS_SCORE)
    } else {
        None
    }
}

/// Query-keyed LRU cache of suggestion lists
#[derive(Debug)]
struct SuggestionCache {
    capacity: usize,
    entries: HashMap<String, Suggestions>,
    // least recently used at the front
    order: VecDeque<String>,
}

impl SuggestionCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&mut self, query: &str) -> Option<Suggestions> {
        let hit = self.entries.get(query).cloned()?;
        self.touch(query);
        Some(hit)
    }

    fn insert(&mut self, query: String, suggestions: Suggestions) {
        if self.entries.contains_key(&query) {
            self.touch(&query);
        } else {
            if self.entries.len() >= self.capacity {
                if let Some(evicted) = self.order.pop_front() {
                    tracing::trace!("search cache evicted '{}'", evicted);
                    self.entries.remove(&evicted);
                }
            }
            self.order.push_back(query.clone());
        }
        self.entries.insert(query, suggestions);
    }

    fn touch(&mut self, query: &str) {
        if let Some(pos) = self.order.iter().position(|q| q == query) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug)]
pub struct SearchSuggestionEngine {
    cache: SuggestionCache,
    limit: usize,
    scans: usize,
}

impl SearchSuggestionEngine {
    pub fn new(cache_capacity: usize, limit: usize) -> Self {
        Self {
            cache: SuggestionCache::new(cache_capacity),
            limit,
            scans: 0,
        }
    }

    /// Ranked suggestions for `query`, served from cache when possible
    pub fn suggestions(&mut self, catalog: &ContentCatalog, query: &str) -> Suggestions {
        if query.is_empty() {
            return Arc::from(Vec::new());
        }
        if let Some(hit) = self.cache.get(query) {
            tracing::debug!("search cache hit for '{}'", query);
            return hit;
        }

        let ranked: Suggestions = Arc::from(self.rank(catalog, query));
        self.cache.insert(query.to_string(), Arc::clone(&ranked));
        ranked
    }

    fn rank(&mut self, catalog: &ContentCatalog, query: &str) -> Vec<Suggestion> {
        self.scans += 1;
        let lower_query = query.to_lowercase();
        let mut results = Vec::new();

        for item in catalog.resources() {
            if let Some(score) = score(&item.title.to_lowercase(), &lower_query) {
                results.push(Suggestion {
                    text: item.title.clone(),
                    kind: SuggestionKind::Game,
                    score,
                    id: Some(item.id),
                });
            }
            for tag in &item.tags {
                if let Some(score) = score(&tag.to_lowercase(), &lower_query) {
                    results.push(Suggestion {
                        text: tag.clone(),
                        kind: SuggestionKind::Tag,
                        score,
                        id: None,
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        results.retain(|s| seen.insert((s.text.clone(), s.kind)));
        // stable: equal scores keep catalogue order
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(self.limit);

        tracing::debug!("search '{}' ranked {} suggestions", query, results.len());
        results
    }

    /// Number of full catalogue scans performed so far
    pub fn scan_count(&self) -> usize {
        self.scans
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}
