//! Display projection for the broadcast layer.
//!
//! A `TableView` is built fresh from the game on every call and never
//! aliases game state. The dealer's hole card and War reserve piles are
//! redacted here rather than by cloning and overwriting the game.

pub mod projection;

pub use projection::{CardFace, ParticipantView, TableView};
