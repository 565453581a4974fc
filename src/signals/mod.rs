//! Signal extraction over annotated sequences.

pub mod engine;
pub mod screener;

pub use engine::*;
pub use screener::*;
