//! Loading playlist exports and run settings, plus the caller-side pool cache.

pub mod cache;
pub mod load;
pub mod schema;

pub use cache::*;
pub use load::*;
pub use schema::*;
