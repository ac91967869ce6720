//! Paginated listing as a stream of pages.

use async_stream::try_stream;
use futures::Stream;
use sp_error::Result;
use sp_traits::{ListingPage, ObjectStore};

/// List objects under a prefix, one page at a time.
///
/// Returns a stream of [`ListingPage`]s, following continuation tokens until
/// the store stops signalling more pages. The first error ends the stream.
/// Pages are yielded as they arrive so callers can fold over them without
/// holding the whole listing in memory.
///
/// # Example
///
/// ```ignore
/// use futures::{StreamExt, pin_mut};
///
/// let stream = pages(&store, "my-bucket", "app/");
/// pin_mut!(stream);
///
/// while let Some(page) = stream.next().await {
///     for obj in page?.objects {
///         println!("Found: {} ({})", obj.key, obj.last_modified);
///     }
/// }
/// ```
pub fn pages<'a, S>(
    store: &'a S,
    bucket: &'a str,
    prefix: &'a str,
) -> impl Stream<Item = Result<ListingPage>> + 'a
where
    S: ObjectStore + ?Sized,
{
    try_stream! {
        let mut page = store.list(bucket, prefix).await?;

        loop {
            let next = page.next.take();
            yield page;

            match next {
                Some(token) => page = store.list_next(&token).await?,
                None => break,
            }
        }
    }
}
