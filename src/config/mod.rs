use crate::core::QualityConstraint;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SVTPLAY_URL: &str = "http://www.svtplay.se";

/// What to do with the chosen stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fetch to a file with curl or rtmpdump (flash streams only)
    #[default]
    Download,
    /// Watch with ffplay
    Play,
    /// Remux or transcode to a file with ffmpeg
    Transcode,
}

impl Mode {
    pub fn writes_output(&self) -> bool {
        !matches!(self, Mode::Play)
    }

    /// rtmpdump and curl only get flash streams; ffplay/ffmpeg handle every transport.
    pub fn flash_only(&self) -> bool {
        matches!(self, Mode::Download)
    }
}

/// Bitrate tiers published by SVT Play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    L,
    M,
    N,
    H,
}

impl Quality {
    pub fn kbps(&self) -> u32 {
        match self {
            Quality::L => 340,
            Quality::M => 850,
            Quality::N => 1400,
            Quality::H => 2400,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub bitrate: Option<u32>,
    /// Output extension override, without the dot
    pub extension: Option<String>,
    /// Passed to the launched application
    pub extra_args: String,
    pub subtitles: bool,
    pub silent: bool,
    /// Print commands instead of running them
    pub debug: bool,
    /// Allow prompts on stdin; when false any prompt aborts the run
    pub interactive: bool,
    pub output_dir: PathBuf,
    pub site_url: String,
    pub user_agent: String,
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Download,
            bitrate: None,
            extension: None,
            extra_args: String::new(),
            subtitles: false,
            silent: false,
            debug: false,
            interactive: true,
            output_dir: PathBuf::from("."),
            site_url: SVTPLAY_URL.to_string(),
            user_agent: format!("svtget/{}", env!("CARGO_PKG_VERSION")),
            timeout: 30,
        }
    }
}

impl Config {
    /// Defaults, or the TOML file at `path` layered over them.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_toml(&text).with_context(|| format!("Invalid config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn quality_constraint(&self) -> QualityConstraint {
        QualityConstraint {
            desired_bitrate_kbps: self.bitrate,
            flash_only: self.mode.flash_only(),
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
