use lexoral_align::{TranscriptOption, rank};

use crate::error::{Error, Result};
use crate::types::{RawSection, SectionPatch, Timing};

/// One editable unit of the transcript, usually a single word.
///
/// Sections are immutable snapshots: every mutation builds a new `Section`
/// that replaces the previous one in its observable slot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub idx: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub original_options: Vec<TranscriptOption>,
    /// Always ranked against the current `text`.
    pub completion_options: Vec<String>,
    pub text: String,
    pub placeholder: String,
    pub edited: bool,
    pub start_paragraph: bool,
    pub end_paragraph: bool,
    /// `start_paragraph` as delivered by the transcription source.
    pub loaded_start_paragraph: bool,
}

/// Character range removed by [`Section::with_deleted`].
///
/// An absent bound drops that whole side instead of defaulting to the text
/// boundary: `start: None` keeps no prefix and `end: None` keeps no suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteRange {
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

impl DeleteRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Keep only the text before `offset`.
    pub fn after(offset: usize) -> Self {
        Self {
            start: Some(offset),
            end: None,
        }
    }

    /// Keep only the text from `offset` on.
    pub fn before(offset: usize) -> Self {
        Self {
            start: None,
            end: Some(offset),
        }
    }
}

impl Section {
    pub fn from_raw(idx: usize, raw: RawSection) -> Result<Self> {
        let placeholder = raw
            .options
            .first()
            .map(|option| option.text.clone())
            .ok_or(Error::EmptyOptions { idx })?;

        Ok(Self {
            idx,
            start_time: raw.start_time,
            end_time: raw.end_time,
            completion_options: rank("", &raw.options),
            original_options: raw.options,
            text: String::new(),
            placeholder,
            edited: false,
            start_paragraph: raw.start_paragraph,
            end_paragraph: false,
            loaded_start_paragraph: raw.start_paragraph,
        })
    }

    /// The text shown to the user: the edited text, or the top option.
    pub fn display_text(&self) -> &str {
        if self.edited {
            &self.text
        } else {
            &self.placeholder
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Equality as seen by history. Derived fields are ignored.
    pub fn same_state(&self, other: &Section) -> bool {
        self.idx == other.idx
            && self.text == other.text
            && self.start_time == other.start_time
            && self.end_time == other.end_time
            && self.edited == other.edited
            && self.start_paragraph == other.start_paragraph
            && self.end_paragraph == other.end_paragraph
    }

    pub fn with_text(&self, text: &str) -> Section {
        if self.edited && self.text == text {
            return self.clone();
        }

        Section {
            text: text.to_string(),
            completion_options: rank(text, &self.original_options),
            edited: true,
            ..self.clone()
        }
    }

    pub fn with_deleted(&self, range: DeleteRange) -> Section {
        let current = self.display_text();

        let mut text = String::new();
        if let Some(start) = range.start {
            text.extend(current.chars().take(start));
        }
        if let Some(end) = range.end {
            text.extend(current.chars().skip(end));
        }

        Section {
            completion_options: rank(&text, &self.original_options),
            text,
            edited: true,
            ..self.clone()
        }
    }

    pub fn with_end_paragraph(&self, end_paragraph: bool) -> Section {
        Section {
            end_paragraph,
            ..self.clone()
        }
    }

    pub fn with_start_paragraph(&self, start_paragraph: bool) -> Section {
        Section {
            start_paragraph,
            ..self.clone()
        }
    }

    /// Merges the provided fields. Completions are left as they are.
    pub fn with_patch(&self, patch: &SectionPatch) -> Section {
        Section {
            text: patch.text.clone().unwrap_or_else(|| self.text.clone()),
            edited: patch.edited.unwrap_or(self.edited),
            start_paragraph: patch.start_paragraph.unwrap_or(self.start_paragraph),
            end_paragraph: patch.end_paragraph.unwrap_or(self.end_paragraph),
            ..self.clone()
        }
    }

    /// The remote patch describing this section, if it differs from a
    /// freshly loaded one.
    pub fn patch(&self) -> Option<SectionPatch> {
        let moved_break = self.start_paragraph != self.loaded_start_paragraph;
        if !self.edited && !self.end_paragraph && !moved_break {
            return None;
        }

        Some(SectionPatch {
            text: self.edited.then(|| self.text.clone()),
            edited: self.edited.then_some(true),
            start_paragraph: moved_break.then_some(self.start_paragraph),
            end_paragraph: self.end_paragraph.then_some(true),
        })
    }
}
