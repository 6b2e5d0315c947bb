//! Content store configuration

use std::path::PathBuf;
use std::time::Duration;

use common::env;

use crate::error::{CmsError, CmsResult};

/// Default number of news documents fetched for the news section
pub const DEFAULT_NEWS_LIMIT: u32 = 12;
/// Default size of the automatically derived "recently added" rail
pub const DEFAULT_RECENT_LIMIT: u32 = 50;

/// Configuration for the headless CMS connection
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Sanity project identifier
    pub project_id: String,
    /// Dataset name (e.g., "production")
    pub dataset: String,
    /// Dated API version, without the leading `v`
    pub api_version: String,
    /// Optional read token for private datasets
    pub token: Option<String>,
    /// Overrides the query host; defaults to `https://{project_id}.api.sanity.io`
    pub api_host: Option<String>,
    /// Host serving image assets
    pub image_host: String,
    /// Maximum number of news documents per fetch
    pub news_limit: u32,
    /// Maximum number of documents in the recently added rail
    pub recent_limit: u32,
    /// Per-request timeout; `None` waits for the transport indefinitely
    pub request_timeout: Option<Duration>,
    /// When set, documents are served from this JSON file instead of the CMS
    pub fixtures_path: Option<PathBuf>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            token: None,
            api_host: None,
            image_host: "https://cdn.sanity.io".to_string(),
            news_limit: DEFAULT_NEWS_LIMIT,
            recent_limit: DEFAULT_RECENT_LIMIT,
            request_timeout: None,
            fixtures_path: None,
        }
    }
}

impl CmsConfig {
    /// Create a new CmsConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SANITY_PROJECT_ID`: project identifier (required unless `CMS_FIXTURES` is set)
    /// - `SANITY_DATASET`: dataset name (default: "production")
    /// - `SANITY_API_VERSION`: API version (default: "2024-01-01")
    /// - `SANITY_TOKEN`: read token (optional)
    /// - `SANITY_API_HOST`: query host override (optional)
    /// - `SANITY_IMAGE_HOST`: image CDN host (default: "https://cdn.sanity.io")
    /// - `CMS_NEWS_LIMIT`: news documents per fetch (default: 12)
    /// - `CMS_RECENT_LIMIT`: recently added rail size (default: 50)
    /// - `CMS_REQUEST_TIMEOUT_SECS`: request timeout (default: none)
    /// - `CMS_FIXTURES`: path to a JSON array of documents (optional)
    pub fn from_env() -> CmsResult<Self> {
        let defaults = Self::default();
        let config = Self {
            project_id: env::var_or("SANITY_PROJECT_ID", ""),
            dataset: env::var_or("SANITY_DATASET", &defaults.dataset),
            api_version: env::var_or("SANITY_API_VERSION", &defaults.api_version)
                .trim_start_matches('v')
                .to_string(),
            token: env::var_opt("SANITY_TOKEN"),
            api_host: env::var_opt("SANITY_API_HOST"),
            image_host: env::var_or("SANITY_IMAGE_HOST", &defaults.image_host),
            news_limit: env::parse_or("CMS_NEWS_LIMIT", DEFAULT_NEWS_LIMIT)?,
            recent_limit: env::parse_or("CMS_RECENT_LIMIT", DEFAULT_RECENT_LIMIT)?,
            request_timeout: env::parse_opt::<u64>("CMS_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs),
            fixtures_path: env::var_opt("CMS_FIXTURES").map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could never produce a working client
    pub fn validate(&self) -> CmsResult<()> {
        if self.fixtures_path.is_none() && self.project_id.is_empty() {
            return Err(CmsError::Configuration(
                "SANITY_PROJECT_ID must be set when CMS_FIXTURES is not".to_string(),
            ));
        }
        if self.dataset.is_empty() {
            return Err(CmsError::Configuration("dataset must not be empty".to_string()));
        }
        Ok(())
    }

    /// Endpoint for GROQ queries against the live (uncached) API
    pub fn query_endpoint(&self) -> String {
        let host = match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", self.project_id),
        };
        format!("{}/v{}/data/query/{}", host, self.api_version, self.dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_query_endpoint_uses_live_host() {
        let config = CmsConfig {
            project_id: "abc123".to_string(),
            ..CmsConfig::default()
        };
        assert_eq!(
            config.query_endpoint(),
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn test_query_endpoint_honours_host_override() {
        let config = CmsConfig {
            project_id: "abc123".to_string(),
            api_host: Some("http://127.0.0.1:4000/".to_string()),
            dataset: "staging".to_string(),
            ..CmsConfig::default()
        };
        assert_eq!(
            config.query_endpoint(),
            "http://127.0.0.1:4000/v2024-01-01/data/query/staging"
        );
    }

    #[test]
    fn test_validate_requires_project_without_fixtures() {
        assert!(CmsConfig::default().validate().is_err());

        let with_fixtures = CmsConfig {
            fixtures_path: Some(PathBuf::from("fixtures.json")),
            ..CmsConfig::default()
        };
        assert!(with_fixtures.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe {
            std::env::set_var("SANITY_PROJECT_ID", "proj");
            std::env::remove_var("CMS_NEWS_LIMIT");
            std::env::remove_var("CMS_RECENT_LIMIT");
            std::env::remove_var("CMS_REQUEST_TIMEOUT_SECS");
            std::env::remove_var("CMS_FIXTURES");
            std::env::set_var("SANITY_API_VERSION", "v2023-05-03");
        }

        let config = CmsConfig::from_env().expect("config should load");
        assert_eq!(config.project_id, "proj");
        assert_eq!(config.api_version, "2023-05-03");
        assert_eq!(config.news_limit, DEFAULT_NEWS_LIMIT);
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
        assert!(config.request_timeout.is_none());

        unsafe {
            std::env::remove_var("SANITY_PROJECT_ID");
            std::env::remove_var("SANITY_API_VERSION");
        }
    }
}
