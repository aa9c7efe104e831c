//! Renders a finished deck and its analysis into shareable artifacts.

mod error;
mod render;
mod report;
mod text;

pub use error::*;
pub use render::*;
pub use report::*;
pub use text::*;
