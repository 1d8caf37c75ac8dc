//! The remote count interface the dispatcher fans out to.

use std::future::Future;

use crate::error::SearchError;

/// Something that can report how many code matches a query has.
///
/// [`crate::GitHubSearcher`] is the production implementation. Tests plug in
/// in-memory sources. Implementations must be `Send + Sync` because one task
/// per keyword calls into the same source concurrently.
pub trait CountSource: Send + Sync {
    /// Return the total match count for a fully composed `query`.
    ///
    /// # Errors
    ///
    /// Any [`SearchError`]; the dispatcher records the keyword as 0 and logs it.
    fn total_count(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<u64, SearchError>> + Send;
}
