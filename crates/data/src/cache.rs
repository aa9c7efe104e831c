use crate::load::source_key;
use bingo_core::{collect_pool, Pool, PoolReport, RawRecord, RngState, TitleRules};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source: String,
    rules: TitleRules,
}

#[derive(Debug, Clone)]
pub struct CachedPool {
    pub pool: Pool,
    pub report: PoolReport,
}

/// Pools built per source, held by the caller between runs.
///
/// Entries are keyed by the normalized source identifier and the title rules
/// used to build them. Failed builds are not cached.
#[derive(Debug, Default)]
pub struct PoolCache {
    entries: HashMap<CacheKey, CachedPool>,
}

impl PoolCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: &str, rules: &TitleRules) -> Option<&CachedPool> {
        self.entries.get(&CacheKey {
            source: source_key(source),
            rules: rules.clone(),
        })
    }

    /// Returns the deduplicated, unshuffled pool for `source`, calling
    /// `fetch` and collecting it on a miss.
    pub fn get_or_collect<F>(
        &mut self,
        source: &str,
        rules: &TitleRules,
        fetch: F,
    ) -> anyhow::Result<&CachedPool>
    where
        F: FnOnce() -> anyhow::Result<Vec<RawRecord>>,
    {
        let key = CacheKey {
            source: source_key(source),
            rules: rules.clone(),
        };
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                tracing::debug!(source = %entry.key().source, "pool cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                tracing::debug!(source = %entry.key().source, "pool cache miss");
                let records = fetch()?;
                let collected = collect_pool(records, rules)?;
                Ok(entry.insert(CachedPool {
                    pool: collected.pool,
                    report: collected.report,
                }))
            }
        }
    }

    /// Pool for one run, shuffled by that run's `rng`.
    ///
    /// The result matches `build_pool` over the fetched records with the same
    /// seed, whether or not the entry was already cached.
    pub fn pool_for_run<F>(
        &mut self,
        source: &str,
        rules: &TitleRules,
        rng: &mut RngState,
        fetch: F,
    ) -> anyhow::Result<CachedPool>
    where
        F: FnOnce() -> anyhow::Result<Vec<RawRecord>>,
    {
        let cached = self.get_or_collect(source, rules, fetch)?;
        Ok(CachedPool {
            pool: cached.pool.shuffled(rng),
            report: cached.report.clone(),
        })
    }

    /// Drops every entry for `source`. Returns whether anything was removed.
    pub fn invalidate(&mut self, source: &str) -> bool {
        let source = source_key(source);
        let before = self.entries.len();
        self.entries.retain(|key, _| key.source != source);
        before != self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
