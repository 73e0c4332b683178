/// Read-through caching on top of [`Cache`](crate::db::Cache).
///
/// Returns the cached value when present. Otherwise awaits `$block`, queues the
/// result for a background write with `$ttl` seconds to live, and returns it.
/// A failed cache read is logged and treated as a miss, so an unavailable
/// Redis never hides the underlying source.
///
/// # Arguments
/// * `$cache`: cache exposing `get_from_cache` and `set_in_background`.
/// * `$key`: the [`CacheKey`](crate::db::CacheKey) to read and write.
/// * `$ttl`: time-to-live in seconds.
/// * `$block`: future producing an `AppResult` on a miss.
///
/// # Example
/// ```rust,ignore
/// let movies = cached!(cache, CacheKey::PopularMovies(1), 3600, async move {
///     fetch_popular_page(1).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await {
            Ok(Some(cached)) => Ok(cached),
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(error = %e, key = %key, "Cache read failed, treating as miss");
                }
                let value = $block.await?;
                $cache.set_in_background(&key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
