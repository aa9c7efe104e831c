use crate::{Card, EngineError, Item, Pool, RngState, ITEMS_PER_CARD};
use serde::{Deserialize, Serialize};

/// Ordered set of generated cards for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Working copy of the pool with a read cursor.
#[derive(Debug)]
struct DrawPile<'a> {
    source: &'a [Item],
    draw: Vec<Item>,
    cursor: usize,
    pass: usize,
}

impl<'a> DrawPile<'a> {
    fn new(pool: &'a Pool) -> Self {
        Self {
            source: pool.items(),
            draw: pool.items().to_vec(),
            cursor: 0,
            pass: 1,
        }
    }

    fn remaining(&self) -> usize {
        self.draw.len() - self.cursor
    }

    /// Drops whatever is left and starts a fresh pass over the whole pool.
    fn reshuffle(&mut self, rng: &mut RngState) {
        tracing::debug!(
            pass = self.pass,
            dropped = self.remaining(),
            "pool exhausted, reshuffling"
        );
        self.draw.clear();
        self.draw.extend_from_slice(self.source);
        rng.shuffle(&mut self.draw);
        self.cursor = 0;
        self.pass += 1;
    }

    fn draw_run(&mut self, rng: &mut RngState) -> Vec<Item> {
        if self.remaining() < ITEMS_PER_CARD {
            self.reshuffle(rng);
        }
        let end = self.cursor + ITEMS_PER_CARD;
        let run = self.draw[self.cursor..end].to_vec();
        self.cursor = end;
        run
    }
}

/// Builds `num_cards` cards from the pool.
///
/// The first pass reads the pool in its current order. Whenever fewer than 24
/// items remain ahead of the cursor the leftovers are discarded and a freshly
/// shuffled copy of the whole pool is used instead, so no card can hold the
/// same item twice.
pub fn generate_deck(
    pool: &Pool,
    num_cards: usize,
    rng: &mut RngState,
) -> Result<Deck, EngineError> {
    if num_cards == 0 {
        return Err(EngineError::InvalidCardCount(num_cards));
    }
    if pool.len() < ITEMS_PER_CARD {
        return Err(EngineError::InsufficientItems {
            found: pool.len(),
            required: ITEMS_PER_CARD,
        });
    }

    let mut pile = DrawPile::new(pool);
    let mut cards = Vec::with_capacity(num_cards);
    for _ in 0..num_cards {
        cards.push(Card::from_draw(pile.draw_run(rng))?);
    }
    tracing::info!(cards = cards.len(), passes = pile.pass, "deck generated");
    Ok(Deck::new(cards))
}
