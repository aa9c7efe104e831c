//! Bingo card generation and fairness analysis. Keep this crate free of IO.

pub mod analysis;
pub mod deck;
pub mod engine;
pub mod error;
pub mod identity;
pub mod item;
pub mod pool;
pub mod rng;

pub use analysis::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use identity::*;
pub use item::*;
pub use pool::*;
pub use rng::*;
