//! In-process content store backed by a list of documents
//!
//! Used for offline development (`CMS_FIXTURES=path/to/documents.json`) and in
//! tests. Documents have the same shape as in the hosted dataset: `movie`,
//! `news` and a singleton `homePage` whose lists hold `{"_ref": id}`
//! references.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::error::CmsResult;
use crate::query::ContentQuery;
use crate::store::ContentStore;

const REFERENCE_LISTS: [&str; 5] = [
    "trendingList",
    "originalsList",
    "newReleases",
    "kidsFamily",
    "curatedCollections",
];

/// Content store answering queries from in-memory documents
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    documents: Arc<Vec<Value>>,
}

impl FixtureStore {
    pub fn from_documents(documents: Vec<Value>) -> Self {
        Self {
            documents: Arc::new(documents),
        }
    }

    /// Load a JSON array of documents from disk
    pub fn load(path: &Path) -> CmsResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let documents: Vec<Value> = serde_json::from_str(&raw)?;
        info!(
            "Loaded {} fixture documents from {}",
            documents.len(),
            path.display()
        );
        Ok(Self::from_documents(documents))
    }

    fn of_type<'a>(&'a self, doc_type: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.documents
            .iter()
            .filter(move |doc| doc.get("_type").and_then(Value::as_str) == Some(doc_type))
    }

    fn by_id(&self, id: &str) -> Option<&Value> {
        self.documents
            .iter()
            .find(|doc| doc.get("_id").and_then(Value::as_str) == Some(id))
    }

    /// Follow a `{"_ref": id}` reference; dangling references become null
    fn dereference(&self, reference: &Value) -> Value {
        reference
            .get("_ref")
            .and_then(Value::as_str)
            .and_then(|id| self.by_id(id))
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn home_page(&self) -> Value {
        let Some(config) = self.of_type("homePage").next() else {
            return Value::Null;
        };

        let mut projected = Map::new();
        for key in ["tickerText", "liveSection"] {
            if let Some(value) = config.get(key) {
                projected.insert(key.to_string(), value.clone());
            }
        }
        if let Some(hero) = config.get("heroMovie") {
            projected.insert("heroMovie".to_string(), self.dereference(hero));
        }
        for key in REFERENCE_LISTS {
            if let Some(Value::Array(references)) = config.get(key) {
                let expanded = references.iter().map(|r| self.dereference(r)).collect();
                projected.insert(key.to_string(), Value::Array(expanded));
            }
        }

        Value::Object(projected)
    }

    fn newest_first(&self, doc_type: &str, field: &str, limit: u32) -> Value {
        let mut docs: Vec<&Value> = self.of_type(doc_type).collect();
        docs.sort_by(|a, b| {
            let a = a.get(field).and_then(Value::as_str);
            let b = b.get(field).and_then(Value::as_str);
            b.cmp(&a)
        });
        Value::Array(docs.into_iter().take(limit as usize).cloned().collect())
    }

    fn search(&self, pattern: &str) -> Value {
        Value::Array(
            self.of_type("movie")
                .filter(|doc| {
                    doc.get("title")
                        .and_then(Value::as_str)
                        .is_some_and(|title| title_matches(title, pattern))
                })
                .cloned()
                .collect(),
        )
    }

    fn evaluate(&self, query: &ContentQuery) -> Value {
        match query {
            ContentQuery::HomePage => self.home_page(),
            ContentQuery::RecentContent { limit } => self.newest_first("movie", "_createdAt", *limit),
            ContentQuery::LatestNews { limit } => self.newest_first("news", "publishedAt", *limit),
            ContentQuery::SearchTitles { pattern } => self.search(pattern),
            ContentQuery::ContentById { id } => self
                .of_type("movie")
                .find(|doc| doc.get("_id").and_then(Value::as_str) == Some(id.as_str()))
                .cloned()
                .unwrap_or(Value::Null),
        }
    }
}

impl ContentStore for FixtureStore {
    fn fetch(&self, query: &ContentQuery) -> impl Future<Output = CmsResult<Value>> + Send {
        let result = self.evaluate(query);
        async move { Ok(result) }
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Case-insensitive word match in the style of GROQ `match`.
///
/// Every term of the pattern must match some word of the title; a term ending
/// in `*` matches as a prefix, other terms must match a whole word.
pub fn title_matches(title: &str, pattern: &str) -> bool {
    let title_words: Vec<String> = words(title).collect();
    let terms: Vec<&str> = pattern
        .split(|c: char| !c.is_alphanumeric() && c != '*')
        .filter(|t| !t.trim_matches('*').is_empty())
        .collect();

    if terms.is_empty() {
        return false;
    }

    terms.iter().all(|term| {
        let prefix = term.ends_with('*');
        let stem = term.trim_matches('*').to_lowercase();
        title_words.iter().any(|word| {
            if prefix {
                word.starts_with(&stem)
            } else {
                *word == stem
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> FixtureStore {
        FixtureStore::from_documents(vec![
            json!({"_id": "m1", "_type": "movie", "title": "Test Movie", "_createdAt": "2024-01-01T00:00:00Z"}),
            json!({"_id": "m2", "_type": "movie", "title": "The Runner", "_createdAt": "2024-06-01T00:00:00Z"}),
            json!({"_id": "m3", "_type": "movie", "title": "Testing Grounds"}),
            json!({"_id": "n1", "_type": "news", "headline": "Old", "publishedAt": "2023-01-01T00:00:00Z"}),
            json!({"_id": "n2", "_type": "news", "headline": "New", "publishedAt": "2025-01-01T00:00:00Z"}),
            json!({
                "_id": "homePage",
                "_type": "homePage",
                "tickerText": "Breaking",
                "heroMovie": {"_ref": "m2"},
                "trendingList": [{"_ref": "m1"}, {"_ref": "gone"}]
            }),
        ])
    }

    #[test]
    fn test_title_matching() {
        assert!(title_matches("Test Movie", "Test*"));
        assert!(title_matches("Test Movie", "test*"));
        assert!(title_matches("Testing Grounds", "Test*"));
        assert!(title_matches("The Runner", "run*"));
        assert!(!title_matches("The Runner", "run"));
        assert!(title_matches("Coffee & Jazz", "coffee jaz*"));
        assert!(!title_matches("Coffee & Jazz", "tea*"));
        assert!(!title_matches("Anything", "*"));
    }

    #[test]
    fn test_home_page_expands_references() {
        let home = store().evaluate(&ContentQuery::HomePage);
        assert_eq!(home["tickerText"], "Breaking");
        assert_eq!(home["heroMovie"]["_id"], "m2");
        assert_eq!(home["trendingList"][0]["_id"], "m1");
        assert!(home["trendingList"][1].is_null());
        assert!(home.get("originalsList").is_none());
    }

    #[test]
    fn test_missing_home_page_is_null() {
        let empty = FixtureStore::default();
        assert!(empty.evaluate(&ContentQuery::HomePage).is_null());
    }

    #[test]
    fn test_ordering_and_limits() {
        let store = store();
        let recent = store.evaluate(&ContentQuery::RecentContent { limit: 2 });
        let ids: Vec<_> = recent.as_array().unwrap().iter().map(|d| d["_id"].clone()).collect();
        assert_eq!(ids, vec![json!("m2"), json!("m1")]);

        let news = store.evaluate(&ContentQuery::LatestNews { limit: 12 });
        assert_eq!(news[0]["_id"], "n2");
        assert_eq!(news.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_by_id_only_returns_content() {
        let store = store();
        assert_eq!(store.evaluate(&ContentQuery::by_id("m1"))["_id"], "m1");
        assert!(store.evaluate(&ContentQuery::by_id("n1")).is_null());
        assert!(store.evaluate(&ContentQuery::by_id("nope")).is_null());
    }
}
