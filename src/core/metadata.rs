use serde::{Deserialize, Serialize};
use std::fmt;

/// Program and episode names recovered from the page title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub episode_title: Option<String>,
    pub program_title: Option<String>,
}

impl PageMetadata {
    pub fn is_empty(&self) -> bool {
        self.episode_title.is_none() && self.program_title.is_none()
    }
}

/// Transport family a variant is published for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlayerType {
    Flash,
    Ios,
    Wmv,
    /// Unknown types are kept verbatim and never rewritten
    Other(String),
}

impl PlayerType {
    pub fn as_str(&self) -> &str {
        match self {
            PlayerType::Flash => "flash",
            PlayerType::Ios => "ios",
            PlayerType::Wmv => "wmv",
            PlayerType::Other(name) => name,
        }
    }
}

impl From<String> for PlayerType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "flash" => PlayerType::Flash,
            "ios" => PlayerType::Ios,
            "wmv" => PlayerType::Wmv,
            _ => PlayerType::Other(name),
        }
    }
}

impl From<PlayerType> for String {
    fn from(player_type: PlayerType) -> Self {
        player_type.as_str().to_string()
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamVariant {
    pub url: String,
    pub bitrate_kbps: u32,
    pub player_type: PlayerType,
    /// Last path segment of `url`, shown as the stream name
    pub label: String,
}

impl StreamVariant {
    pub fn new(url: impl Into<String>, bitrate_kbps: u32, player_type: PlayerType) -> Self {
        let url = url.into();
        let label = url.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            url,
            bitrate_kbps,
            player_type,
            label,
        }
    }

    pub fn is_flash(&self) -> bool {
        self.player_type == PlayerType::Flash
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCatalog {
    pub variants: Vec<StreamVariant>,
    pub subtitle_url: Option<String>,
}

/// Caller-supplied limits for variant selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityConstraint {
    /// Unset or zero never matches and falls through to the prompt
    pub desired_bitrate_kbps: Option<u32>,
    /// Only flash variants are eligible (the default download mode)
    pub flash_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub final_url: String,
    /// Includes the leading dot, or is empty
    pub file_extension: String,
    pub base_file_name: String,
}

impl ResolvedTarget {
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_file_name, self.file_extension)
    }

    pub fn subtitle_file_name(&self) -> String {
        format!("{}.srt", self.base_file_name)
    }
}

/// The parts of an SVT Play embed page the resolver works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPage {
    /// Value of the page's `data-title` attribute, empty when absent
    pub title: String,
    /// Absolute URL of the embedded flash player
    pub player_url: String,
    /// Raw `flashvars` parameter, still carrying its `json=` prefix
    pub flashvars: String,
}
