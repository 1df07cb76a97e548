//! Configuration schema.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Plugin configuration supplied per call.
///
/// Both slices are forwarded verbatim to their collaborator; prtrim never
/// interprets their contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Configuration for the commit analyzer.
    #[serde(default, deserialize_with = "null_as_default")]
    pub commit_analyzer_config: Map<String, Value>,

    /// Configuration for the notes generator, or `false` to skip notes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes_generator_config: NotesGeneratorSetting,
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Notes generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNotesSetting", into = "RawNotesSetting")]
pub enum NotesGeneratorSetting {
    /// Notes generation is skipped entirely.
    Disabled,
    /// Notes generation runs with the given configuration.
    Enabled(Map<String, Value>),
}

impl NotesGeneratorSetting {
    /// Returns the configuration when enabled.
    #[must_use]
    pub fn options(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Disabled => None,
            Self::Enabled(options) => Some(options),
        }
    }

    /// Returns true if notes generation is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl Default for NotesGeneratorSetting {
    fn default() -> Self {
        Self::Enabled(Map::new())
    }
}

/// Wire shape: either a boolean switch or an options object.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawNotesSetting {
    Flag(bool),
    Options(Map<String, Value>),
}

impl From<RawNotesSetting> for NotesGeneratorSetting {
    fn from(raw: RawNotesSetting) -> Self {
        match raw {
            RawNotesSetting::Flag(false) => Self::Disabled,
            RawNotesSetting::Flag(true) => Self::default(),
            RawNotesSetting::Options(options) => Self::Enabled(options),
        }
    }
}

impl From<NotesGeneratorSetting> for RawNotesSetting {
    fn from(setting: NotesGeneratorSetting) -> Self {
        match setting {
            NotesGeneratorSetting::Disabled => Self::Flag(false),
            NotesGeneratorSetting::Enabled(options) => Self::Options(options),
        }
    }
}
