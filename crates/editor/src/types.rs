use lexoral_align::TranscriptOption;

/// One section as produced by the transcription source.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    pub start_time: f64,
    pub end_time: f64,
    pub options: Vec<TranscriptOption>,
    #[serde(default)]
    pub start_paragraph: bool,
}

/// The whole transcription output, one entry per section.
pub type JsonOutput = Vec<RawSection>;

/// Playback timing of one section, indexed by section `idx`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub start_time: f64,
    pub end_time: f64,
}

/// Partial section state kept by the remote store. Only the provided fields
/// are merged when applied.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type,
)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_paragraph: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_paragraph: Option<bool>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, specta::Type,
)]
pub struct SelectionPoint {
    pub section: usize,
    /// Character offset inside the section's display text.
    pub offset: usize,
}

/// The user's selection expressed in section coordinates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, specta::Type,
)]
pub struct SectionSelection {
    pub anchor: SelectionPoint,
    pub focus: SelectionPoint,
}

impl SectionSelection {
    pub fn collapsed(section: usize, offset: usize) -> Self {
        let point = SelectionPoint { section, offset };
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn range(anchor: SelectionPoint, focus: SelectionPoint) -> Self {
        Self { anchor, focus }
    }
}

/// Where the selection should go once restored state has been rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionTarget {
    SectionStart(usize),
    SectionEnd(usize),
    Exactly(Option<SectionSelection>),
}
