//! Concurrent fetches within a single request.

use std::future::Future;

use futures_util::future::try_join;

use crate::error::Result;

/// Await two independent fetches concurrently.
///
/// Both must succeed. The first error observed is returned and the other
/// branch is dropped along with any partial result.
pub async fn join<A, B, FA, FB>(first: FA, second: FB) -> Result<(A, B)>
where
    FA: Future<Output = Result<A>>,
    FB: Future<Output = Result<B>>,
{
    try_join(first, second).await
}
