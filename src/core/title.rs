//! Program/episode extraction from SVT Play page titles.
//!
//! Titles come in a few layouts, e.g. `Nyheter - Rapport | SVT Play` or
//! `Allt för Sverige: Avsnitt 3 | SVT Play`. Each layout is a strategy;
//! the first one that recognises the title wins.

use crate::core::PageMetadata;
use regex::Regex;
use std::sync::LazyLock;

static HEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*)\s+\|").expect("valid regex"));
static DASH_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+-\s+").expect("valid regex"));
static COLON_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s+").expect("valid regex"));
static EPISODE_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+/\d+").expect("valid regex"));

pub trait TitleStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, title: &str) -> Option<PageMetadata>;
}

/// The part of the title before the trailing ` | <site>` segment.
fn head(title: &str) -> Option<&str> {
    HEAD.captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// `<episode> - <program> | ...`, split on the last dash.
pub struct EpisodeDashProgram;

impl TitleStrategy for EpisodeDashProgram {
    fn name(&self) -> &'static str {
        "episode-dash-program"
    }

    fn parse(&self, title: &str) -> Option<PageMetadata> {
        let head = head(title)?;
        let separator = DASH_SEPARATOR.find_iter(head).last()?;
        let episode = non_empty(&head[..separator.start()])?;
        let program = non_empty(&head[separator.end()..])?;
        Some(PageMetadata {
            episode_title: Some(episode),
            program_title: Some(program),
        })
    }
}

/// `<program>: <episode> | ...`, split on the first colon.
pub struct ProgramColonEpisode;

impl TitleStrategy for ProgramColonEpisode {
    fn name(&self) -> &'static str {
        "program-colon-episode"
    }

    fn parse(&self, title: &str) -> Option<PageMetadata> {
        let head = head(title)?;
        let separator = COLON_SEPARATOR.find(head)?;

        // "1/3: ..." is an episode counter, not a program name
        let program =
            non_empty(&head[..separator.start()]).filter(|p| !EPISODE_INDEX.is_match(p));
        let episode = non_empty(&head[separator.end()..]);

        if program.is_none() && episode.is_none() {
            return None;
        }
        Some(PageMetadata {
            episode_title: episode,
            program_title: program,
        })
    }
}

/// Everything before ` |` is the episode.
pub struct EpisodeOnly;

impl TitleStrategy for EpisodeOnly {
    fn name(&self) -> &'static str {
        "episode-only"
    }

    fn parse(&self, title: &str) -> Option<PageMetadata> {
        head(title).map(|episode| PageMetadata {
            episode_title: Some(episode.to_string()),
            program_title: None,
        })
    }
}

pub struct TitleParser {
    pub strategies: Vec<Box<dyn TitleStrategy>>,
}

impl TitleParser {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(EpisodeDashProgram),
                Box::new(ProgramColonEpisode),
                Box::new(EpisodeOnly),
            ],
        }
    }

    /// Never fails; unrecognised titles give empty metadata.
    pub fn parse(&self, title: &str) -> PageMetadata {
        for strategy in &self.strategies {
            if let Some(metadata) = strategy.parse(title) {
                tracing::debug!("Title {:?} matched {}", title, strategy.name());
                return metadata;
            }
        }

        tracing::debug!("Title {:?} matched no layout", title);
        PageMetadata::default()
    }
}

impl Default for TitleParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(title: &str) -> (Option<String>, Option<String>) {
        let metadata = TitleParser::new().parse(title);
        (metadata.episode_title, metadata.program_title)
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_episode_dash_program() {
        assert_eq!(parse("Nyheter - Rapport | SVT Play"), (some("Nyheter"), some("Rapport")));
        assert_eq!(
            parse("Del 2 av 8 - Mitt i naturen | SVT Play"),
            (some("Del 2 av 8"), some("Mitt i naturen"))
        );
    }

    #[test]
    fn test_program_colon_episode() {
        assert_eq!(
            parse("Allt för Sverige: Avsnitt 3 | SVT Play"),
            (some("Avsnitt 3"), some("Allt för Sverige"))
        );
    }

    #[test]
    fn test_episode_index_is_not_a_program() {
        assert_eq!(parse("1/3: Avsnitt ett | SVT Play"), (some("Avsnitt ett"), None));
    }

    #[test]
    fn test_dash_splits_on_last_separator() {
        assert_eq!(parse("A - B - C | SVT Play"), (some("A - B"), some("C")));
        // The dash layout wins over the colon layout
        assert_eq!(
            parse("Agenda: Val 2010 - Debatt | SVT Play"),
            (some("Agenda: Val 2010"), some("Debatt"))
        );
    }

    #[test]
    fn test_colon_splits_on_first_separator() {
        assert_eq!(
            parse("Agenda: Val 2010: Debatt | SVT Play"),
            (some("Val 2010: Debatt"), some("Agenda"))
        );
    }

    #[test]
    fn test_dash_layout_needs_both_parts() {
        assert_eq!(parse(" - Rapport | SVT Play"), (some(" - Rapport"), None));
    }

    #[test]
    fn test_layouts_need_site_segment() {
        assert_eq!(parse("Sportnytt: Hockey - kväll"), (None, None));
    }

    #[test]
    fn test_falls_back_to_episode_only() {
        assert_eq!(parse("Agenda | SVT Play"), (some("Agenda"), None));
    }

    #[test]
    fn test_unrecognised_title_is_empty() {
        assert_eq!(parse("SVT Play"), (None, None));
        assert_eq!(parse(""), (None, None));
    }

    #[test]
    fn test_strategy_order() {
        let names: Vec<_> = TitleParser::new().strategies.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["episode-dash-program", "program-colon-episode", "episode-only"]);
    }
}
