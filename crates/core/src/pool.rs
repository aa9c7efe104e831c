use crate::{
    identity_key, join_artists, EngineError, Item, RawRecord, RngState, TitleRules, ITEMS_PER_CARD,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Deduplicated, shuffled set of items available for card assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    items: Vec<Item>,
}

impl Pool {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the pool in an order drawn from `rng`.
    pub fn shuffled(&self, rng: &mut RngState) -> Pool {
        let mut items = self.items.clone();
        rng.shuffle(&mut items);
        Pool { items }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReport {
    pub total_records: usize,
    pub removed: usize,
    pub malformed: usize,
    pub duplicates_replaced: usize,
    pub unique: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PoolBuild {
    pub pool: Pool,
    pub report: PoolReport,
}

/// Normalizes, dedups and shuffles upstream records into a [`Pool`].
///
/// Equivalent to [`collect_pool`] followed by [`Pool::shuffled`], so a pool
/// collected once and shuffled per run matches a pool built from scratch
/// with the same seed.
pub fn build_pool<I>(
    records: I,
    rules: &TitleRules,
    rng: &mut RngState,
) -> Result<PoolBuild, EngineError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let collected = collect_pool(records, rules)?;
    Ok(PoolBuild {
        pool: collected.pool.shuffled(rng),
        report: collected.report,
    })
}

/// Normalizes and dedups upstream records without shuffling.
///
/// When two records share an identity key the later one replaces the earlier
/// one, keeping the slot where the key was first seen. Records that would
/// normalize to the free cell are skipped as malformed.
pub fn collect_pool<I>(records: I, rules: &TitleRules) -> Result<PoolBuild, EngineError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut report = PoolReport::default();
    let mut items: Vec<Item> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let free_key = Item::free().identity_key();

    for (index, record) in records.into_iter().enumerate() {
        report.total_records += 1;
        let (title, artists) = match record {
            RawRecord::Present { title, artists } => (title, artists),
            RawRecord::Removed => {
                report.removed += 1;
                continue;
            }
            RawRecord::Malformed { reason } => {
                skip_malformed(&mut report, index, &reason);
                continue;
            }
        };
        let normalized = rules.normalize(&title);
        let key = identity_key(&normalized, &artists);
        if key == free_key {
            skip_malformed(&mut report, index, "collides with the free cell");
            continue;
        }
        let item = Item::new(normalized, join_artists(&artists));
        match slots.get(&key) {
            Some(&slot) => {
                report.duplicates_replaced += 1;
                items[slot] = item;
            }
            None => {
                slots.insert(key, items.len());
                items.push(item);
            }
        }
    }

    report.unique = items.len();
    if items.len() < ITEMS_PER_CARD {
        return Err(EngineError::InsufficientItems {
            found: items.len(),
            required: ITEMS_PER_CARD,
        });
    }

    tracing::info!(
        records = report.total_records,
        unique = report.unique,
        removed = report.removed,
        malformed = report.malformed,
        "pool built"
    );
    Ok(PoolBuild {
        pool: Pool { items },
        report,
    })
}

fn skip_malformed(report: &mut PoolReport, index: usize, reason: &str) {
    tracing::warn!(record = index, %reason, "skipping malformed record");
    report.malformed += 1;
    report.warnings.push(format!("record {}: {}", index, reason));
}
