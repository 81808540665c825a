//! Type-safe wrappers and enums for understat resources.

pub mod ids;
pub mod kind;
pub mod time;

pub use ids::{Identifier, League};
pub use kind::{Query, ResourceKind};
pub use time::{Season, MIN_SEASON};
