//! Conditional parallel iteration for batch analytics.
//!
//! Uses rayon when the `parallel` feature is enabled and the batch is large
//! enough; otherwise falls back to a plain iterator. Both paths return
//! results in input order.

use crate::config::EngineConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &EngineConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            log::trace!("mapping {} items in parallel", items.len());
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}
