//! Turns stored conversation history into model-ready context text.

pub mod full;
pub mod strategy;

pub use full::FullHistoryStrategy;
pub use strategy::ContextStrategy;
