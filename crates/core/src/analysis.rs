//! Fairness analysis over a finished deck.
//!
//! Everything here is derived from a single pass over the deck into a dense
//! `key x cell` count table ([`PositionUsage`]); the heatmap and per-item
//! statistics are read back out of that table.

use crate::{position_of, Deck, CELLS_PER_CARD, GRID_SIZE, ITEMS_PER_CARD};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Repeat placements per grid position. The free centre is always zero.
pub type Heatmap = [[u32; GRID_SIZE]; GRID_SIZE];

/// Per-item placement statistics.
///
/// `dist_percent` and `randomness_score` are heuristic, non-normative metrics
/// and are computed exactly as defined so reports stay comparable across
/// versions:
///
/// * `dist_percent = round3(freq / (cards * 24) * 100)`
/// * `randomness_score = round3((1 - max_freq / freq) * cards / 24)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub freq: u32,
    pub pos_freq: u32,
    pub dup: u8,
    pub max_freq: u32,
    pub dist_percent: f64,
    pub randomness_score: f64,
}

/// Rounds half away from zero to three decimals.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, Default)]
pub struct PositionUsage {
    keys: Vec<String>,
    slots: HashMap<String, usize>,
    counts: Vec<[u32; CELLS_PER_CARD]>,
    repeated_in_card: Vec<bool>,
    cards: usize,
}

impl PositionUsage {
    pub fn from_deck(deck: &Deck) -> Self {
        let mut usage = Self {
            cards: deck.len(),
            ..Self::default()
        };
        let mut card_slots: Vec<usize> = Vec::with_capacity(ITEMS_PER_CARD);
        for card in deck {
            card_slots.clear();
            for (index, item) in card.non_free_cells() {
                let slot = usage.slot_for(item.identity_key());
                usage.counts[slot][index] += 1;
                if card_slots.contains(&slot) {
                    usage.repeated_in_card[slot] = true;
                } else {
                    card_slots.push(slot);
                }
            }
        }
        usage
    }

    fn slot_for(&mut self, key: String) -> usize {
        if let Some(&slot) = self.slots.get(&key) {
            return slot;
        }
        let slot = self.keys.len();
        self.keys.push(key.clone());
        self.slots.insert(key, slot);
        self.counts.push([0; CELLS_PER_CARD]);
        self.repeated_in_card.push(false);
        slot
    }

    /// Identity keys in first-seen order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn cards(&self) -> usize {
        self.cards
    }

    /// Number of cards placing `key` at `(row, col)`.
    pub fn count_at(&self, key: &str, row: usize, col: usize) -> u32 {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return 0;
        }
        self.slots
            .get(key)
            .map_or(0, |&slot| self.counts[slot][row * GRID_SIZE + col])
    }

    pub fn heatmap(&self) -> Heatmap {
        let mut heatmap = [[0u32; GRID_SIZE]; GRID_SIZE];
        for counts in &self.counts {
            for (index, &count) in counts.iter().enumerate() {
                if count > 1 {
                    let (row, col) = position_of(index);
                    heatmap[row][col] += count - 1;
                }
            }
        }
        heatmap
    }

    pub fn stats(&self) -> BTreeMap<String, ItemStats> {
        let cells_in_deck = (self.cards * ITEMS_PER_CARD) as f64;
        self.keys
            .iter()
            .enumerate()
            .map(|(slot, key)| {
                let counts = &self.counts[slot];
                let freq: u32 = counts.iter().sum();
                let pos_freq: u32 = counts.iter().map(|count| count.saturating_sub(1)).sum();
                let max_freq = counts.iter().copied().max().unwrap_or(0);
                let dist_percent = if cells_in_deck > 0.0 {
                    round3(freq as f64 / cells_in_deck * 100.0)
                } else {
                    0.0
                };
                let randomness_score = if freq > 0 {
                    round3(
                        (1.0 - max_freq as f64 / freq as f64) * self.cards as f64
                            / ITEMS_PER_CARD as f64,
                    )
                } else {
                    0.0
                };
                let stats = ItemStats {
                    freq,
                    pos_freq,
                    dup: u8::from(self.repeated_in_card[slot]),
                    max_freq,
                    dist_percent,
                    randomness_score,
                };
                (key.clone(), stats)
            })
            .collect()
    }
}

pub fn compute_heatmap(deck: &Deck) -> Heatmap {
    PositionUsage::from_deck(deck).heatmap()
}

/// Per-item statistics keyed by identity key. The card count is the deck length.
pub fn compute_stats(deck: &Deck) -> BTreeMap<String, ItemStats> {
    PositionUsage::from_deck(deck).stats()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub num_cards: usize,
    pub heatmap: Heatmap,
    pub stats: BTreeMap<String, ItemStats>,
    pub total_repeats: u32,
}

impl Analysis {
    /// True when no card holds the same item twice.
    pub fn dup_free(&self) -> bool {
        self.stats.values().all(|stats| stats.dup == 0)
    }

    pub fn heatmap_total(&self) -> u32 {
        self.heatmap.iter().flatten().sum()
    }
}

pub fn analyze(deck: &Deck) -> Analysis {
    let usage = PositionUsage::from_deck(deck);
    let heatmap = usage.heatmap();
    let stats = usage.stats();
    let total_repeats = stats.values().map(|stats| stats.pos_freq).sum();
    tracing::debug!(
        cards = usage.cards(),
        items = usage.keys().len(),
        total_repeats,
        "deck analyzed"
    );
    Analysis {
        num_cards: usage.cards(),
        heatmap,
        stats,
        total_repeats,
    }
}
