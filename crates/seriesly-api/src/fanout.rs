//! Concurrent hydration of ID lists.

use std::future::Future;

use anyhow::Result;
use futures::future::try_join_all;

/// Fetches every item concurrently and returns the results in input order.
///
/// Items that resolve to `None` (upstream 404) are dropped. The first
/// transport error fails the whole batch; there is no concurrency cap and
/// no retry.
///
/// # Errors
///
/// Returns the first error produced by `fetch`.
pub async fn hydrate_in_order<I, F, Fut, T>(ids: I, fetch: F) -> Result<Vec<T>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let results = try_join_all(ids.into_iter().map(fetch)).await?;
    Ok(results.into_iter().flatten().collect())
}
