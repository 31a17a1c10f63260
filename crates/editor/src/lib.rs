pub mod commands;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod mutator;
pub mod observable;
pub mod section;
pub mod types;
pub mod view;

pub use config::{DisplaySettings, EditorConfig};
pub use document::{Document, Paragraph};
pub use editor::Editor;
pub use error::{Error, Result};
pub use history::{History, HistoryStep, Replay, SectionChange};
pub use lexoral_align::TranscriptOption;
pub use mutator::{SectionMutator, Target};
pub use observable::{Observable, SubscriptionId};
pub use section::{DeleteRange, Section};
pub use types::{
    JsonOutput, RawSection, SectionPatch, SectionSelection, SelectionPoint, SelectionTarget,
    Timing,
};
pub use view::{DocumentFrame, ParagraphFrame, SectionFrame};
