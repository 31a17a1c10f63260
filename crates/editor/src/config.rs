use crate::error::Result;

/// Editor display settings, persisted per user by the settings sync.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplaySettings {
    pub font_size: u32,
    /// Page width in columns.
    pub page_width: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_size: 12,
            page_width: 80,
        }
    }
}

#[derive(
    Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type,
)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of committed history steps. `None` keeps everything.
    pub history_limit: Option<usize>,
    pub display: DisplaySettings,
}

impl EditorConfig {
    /// Parses a config document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
