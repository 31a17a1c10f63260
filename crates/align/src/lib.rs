//! Ranks transcription alternatives against text a user is typing.
//!
//! Each candidate is globally aligned against the typed text. Whatever the
//! candidate has past the end of the typed text becomes the completion, and
//! the alignment score decides the order.

pub mod nw;
pub mod rank;

pub use nw::{Alignment, Scoring, align};
pub use rank::{Completion, TranscriptOption, complete, rank};
