use crate::EngineError;
use serde::{Deserialize, Serialize};

pub const GRID_SIZE: usize = 5;
pub const CELLS_PER_CARD: usize = GRID_SIZE * GRID_SIZE;
pub const ITEMS_PER_CARD: usize = CELLS_PER_CARD - 1;
pub const FREE_INDEX: usize = 12;
pub const FREE_TITLE: &str = "FREE";

/// Row-major `(row, col)` of a cell index.
pub fn position_of(index: usize) -> (usize, usize) {
    (index / GRID_SIZE, index % GRID_SIZE)
}

pub fn index_of(row: usize, col: usize) -> usize {
    row * GRID_SIZE + col
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub artist: String,
}

impl Item {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    pub fn free() -> Self {
        Self::new(FREE_TITLE, "")
    }

    pub fn is_free(&self) -> bool {
        self.title == FREE_TITLE && self.artist.is_empty()
    }

    /// Key used for dedup and all per-item statistics.
    pub fn identity_key(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

/// One entry as delivered by the upstream item source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawRecord {
    Present { title: String, artists: Vec<String> },
    Removed,
    Malformed { reason: String },
}

impl RawRecord {
    pub fn present<S: Into<String>>(title: impl Into<String>, artists: Vec<S>) -> Self {
        Self::Present {
            title: title.into(),
            artists: artists.into_iter().map(Into::into).collect(),
        }
    }
}

/// A 5x5 card. Index 12 always holds the free cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    cells: Vec<Item>,
}

impl Card {
    /// Builds a card from a run of 24 drawn items, inserting the free cell.
    pub fn from_draw(mut run: Vec<Item>) -> Result<Self, EngineError> {
        if run.len() != ITEMS_PER_CARD {
            return Err(EngineError::InvalidCard(format!(
                "expected {} drawn items, got {}",
                ITEMS_PER_CARD,
                run.len()
            )));
        }
        run.insert(FREE_INDEX, Item::free());
        Self::from_cells(run)
    }

    /// Builds a card from a full 25-cell layout supplied by the caller.
    pub fn from_cells(cells: Vec<Item>) -> Result<Self, EngineError> {
        if cells.len() != CELLS_PER_CARD {
            return Err(EngineError::InvalidCard(format!(
                "expected {} cells, got {}",
                CELLS_PER_CARD,
                cells.len()
            )));
        }
        if !cells[FREE_INDEX].is_free() {
            return Err(EngineError::InvalidCard(format!(
                "cell {} must be the free cell",
                FREE_INDEX
            )));
        }
        if let Some(index) = cells
            .iter()
            .enumerate()
            .position(|(index, item)| index != FREE_INDEX && item.is_free())
        {
            return Err(EngineError::InvalidCard(format!(
                "free cell found at index {}",
                index
            )));
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Item] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Item> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        self.cells.get(index_of(row, col))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Item]> {
        self.cells.chunks(GRID_SIZE)
    }

    pub fn non_free_cells(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != FREE_INDEX)
    }
}
