//! Content client for the Premier+ front end
//!
//! This crate is the only part of the workspace that talks to the headless
//! CMS. It turns loosely typed documents into view records ([`models`]),
//! exposes the four content operations through [`api::ContentApi`], and
//! schedules debounced searches ([`search::SearchScheduler`]).
//!
//! ```rust,no_run
//! use cms::{api::ContentApi, config::CmsConfig, store::ContentBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CmsConfig::from_env()?;
//!     let api = ContentApi::new(ContentBackend::from_config(&config)?, &config);
//!     let home = api.home_page().await?;
//!     println!("{} trending titles", home.trending.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod image;
pub mod mapper;
pub mod models;
pub mod query;
pub mod search;
pub mod store;

pub use api::ContentApi;
pub use error::{CmsError, CmsResult};
pub use models::{ContentKind, HomePage, LiveSection, MediaItem, NewsItem};
