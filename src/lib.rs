//! # ghkw
//!
//! Count how often keywords are used in GitHub code and rank them.
//!
//! For each keyword one code search query is sent, all of them concurrently,
//! and only the reported total count is kept. The totals are then ranked
//! with shared ranks for ties and printed as a table.
//!
//! ## Main Components
//!
//! - [`QualifierSet`] and [`KeywordSet`]: build the query for each keyword
//! - [`Dispatcher`]: runs one query per keyword and waits for all of them
//! - [`rank()`]: competition ranking of the totals
//! - [`GitHubSearcher`]: the [`CountSource`] backed by the GitHub REST API
//! - [`Args`]: command line arguments of the `ghkw` binary
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ghkw::{DispatchConfig, Dispatcher, GitHubSearcher, KeywordSet, Qualifier, QualifierSet, SearchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ghkw::SearchError> {
//!     let keywords = KeywordSet::new(["exclude_condition", "exclusion_condition"])?;
//!     let qualifiers = QualifierSet::default().with(Qualifier::Language, "javascript")?;
//!
//!     let searcher = GitHubSearcher::new(&SearchConfig::default(), std::env::var("GITHUB_TOKEN").unwrap_or_default())?;
//!     let totals = Dispatcher::new(DispatchConfig::default())?
//!         .run(&keywords, &qualifiers, Arc::new(searcher))
//!         .await;
//!
//!     for entry in ghkw::rank(&totals) {
//!         println!("{} {} {}", entry.rank, entry.keyword, entry.total);
//!     }
//!     Ok(())
//! }
//! ```

mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod fanout;
mod github_searcher;
pub mod query;
pub mod rank;
pub mod report;
pub mod source;

// Re-export main components for documentation and external use
pub use crate::args::Args;
pub use crate::config::SearchConfig;
pub use crate::error::{Result, SearchError};
pub use crate::fanout::{DispatchConfig, Dispatcher};
pub use crate::github_searcher::GitHubSearcher;
pub use crate::query::{KeywordSet, Qualifier, QualifierSet};
pub use crate::rank::{rank, RankedEntry};
pub use crate::source::CountSource;
