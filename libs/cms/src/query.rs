//! Typed content queries and their GROQ rendering
//!
//! The facade only ever asks for five shapes of data. Keeping them as an enum
//! lets every store implementation (the HTTP client, the fixture store) answer
//! the same questions, and keeps user input out of query text: free-form
//! values travel as bound `$parameters`.

use serde_json::{Map, Value};

/// A query the content facade can issue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentQuery {
    /// The singleton home page configuration with its references expanded
    HomePage,
    /// Most recently created content documents
    RecentContent { limit: u32 },
    /// News documents, newest first
    LatestNews { limit: u32 },
    /// Content whose title matches a prefix pattern (e.g. `"Test*"`)
    SearchTitles { pattern: String },
    /// A single content document by exact id
    ContentById { id: String },
}

/// GROQ text plus its parameter bindings
#[derive(Debug, Clone, PartialEq)]
pub struct GroqQuery {
    pub text: String,
    pub params: Map<String, Value>,
}

impl ContentQuery {
    /// Search for titles starting with `term`, case-insensitively.
    ///
    /// A trailing wildcard is added unless the caller already supplied one.
    pub fn search(term: &str) -> Self {
        let term = term.trim();
        let pattern = if term.ends_with('*') {
            term.to_string()
        } else {
            format!("{}*", term)
        };
        ContentQuery::SearchTitles { pattern }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        ContentQuery::ContentById { id: id.into() }
    }

    /// Render as GROQ for the HTTP query API
    pub fn to_groq(&self) -> GroqQuery {
        let mut params = Map::new();
        let text = match self {
            ContentQuery::HomePage => r#"*[_type == "homePage"][0]{
  tickerText,
  heroMovie->,
  trendingList[]->,
  originalsList[]->,
  newReleases[]->,
  kidsFamily[]->,
  curatedCollections[]->,
  liveSection
}"#
            .to_string(),
            ContentQuery::RecentContent { limit } => format!(
                r#"*[_type == "movie"] | order(_createdAt desc)[0...{}]"#,
                limit
            ),
            ContentQuery::LatestNews { limit } => format!(
                r#"*[_type == "news"] | order(publishedAt desc)[0...{}]"#,
                limit
            ),
            ContentQuery::SearchTitles { pattern } => {
                params.insert("term".to_string(), Value::String(pattern.clone()));
                r#"*[_type == "movie" && title match $term]"#.to_string()
            }
            ContentQuery::ContentById { id } => {
                params.insert("id".to_string(), Value::String(id.clone()));
                r#"*[_type == "movie" && _id == $id][0]"#.to_string()
            }
        };

        GroqQuery { text, params }
    }

    /// Short label used in logs
    pub fn name(&self) -> &'static str {
        match self {
            ContentQuery::HomePage => "home_page",
            ContentQuery::RecentContent { .. } => "recent_content",
            ContentQuery::LatestNews { .. } => "latest_news",
            ContentQuery::SearchTitles { .. } => "search_titles",
            ContentQuery::ContentById { .. } => "content_by_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_adds_a_single_wildcard() {
        assert_eq!(
            ContentQuery::search(" Test "),
            ContentQuery::SearchTitles { pattern: "Test*".to_string() }
        );
        assert_eq!(
            ContentQuery::search("Test*"),
            ContentQuery::SearchTitles { pattern: "Test*".to_string() }
        );
    }

    #[test]
    fn test_search_term_is_bound_not_interpolated() {
        let hostile = r#"x"] | *[_type == "secret"]{..."#;
        let groq = ContentQuery::search(hostile).to_groq();

        assert!(!groq.text.contains("secret"));
        assert_eq!(groq.text, r#"*[_type == "movie" && title match $term]"#);
        assert_eq!(
            groq.params.get("term"),
            Some(&Value::String(format!("{}*", hostile)))
        );
    }

    #[test]
    fn test_by_id_binds_id() {
        let groq = ContentQuery::by_id("m1").to_groq();
        assert!(groq.text.contains("_id == $id"));
        assert_eq!(groq.params.get("id"), Some(&Value::String("m1".to_string())));
    }

    #[test]
    fn test_bounded_lists() {
        assert!(
            ContentQuery::LatestNews { limit: 12 }
                .to_groq()
                .text
                .ends_with("order(publishedAt desc)[0...12]")
        );
        assert!(
            ContentQuery::RecentContent { limit: 50 }
                .to_groq()
                .text
                .ends_with("order(_createdAt desc)[0...50]")
        );
        assert!(ContentQuery::HomePage.to_groq().params.is_empty());
    }
}
