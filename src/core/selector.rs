use crate::core::error::{ResolveError, Result};
use crate::core::prompt::Prompter;
use crate::core::{QualityConstraint, StreamCatalog, StreamVariant};

pub const SELECTION_QUESTION: &str = "\nWhich file do you want? [#] ";

/// Variants eligible under `constraint`, sorted by ascending bitrate.
/// The sort is stable, so equal bitrates keep page order.
pub fn candidates<'a>(catalog: &'a StreamCatalog, constraint: &QualityConstraint) -> Vec<&'a StreamVariant> {
    let mut streams: Vec<&StreamVariant> = catalog
        .variants
        .iter()
        .filter(|v| !constraint.flash_only || v.is_flash())
        .collect();
    streams.sort_by_key(|v| v.bitrate_kbps);
    streams
}

/// Tabular listing shown before asking for a variant.
pub fn format_listing(streams: &[&StreamVariant]) -> String {
    let mut listing = format!("{:>2}  {:<8}\t{:<60}{}", "#", "Bitrate", "Stream Name", "Type");
    for (i, stream) in streams.iter().enumerate() {
        listing.push('\n');
        listing.push_str(&format!(
            "{:>2}.{:>10}\t{:<60}{}",
            i + 1,
            format!("{} kbps", stream.bitrate_kbps),
            stream.label,
            stream.player_type
        ));
    }
    listing
}

/// Parse a 1-based answer into an index below `count`.
pub fn parse_selection(input: &str, count: usize) -> Result<usize> {
    let invalid = || ResolveError::InvalidSelectionInput {
        input: input.to_string(),
        max: count,
    };

    let number: usize = input.trim().parse().map_err(|_| invalid())?;
    if number == 0 || number > count {
        return Err(invalid());
    }
    Ok(number - 1)
}

/// Pick the variant to fetch.
///
/// A single candidate is taken as is. Otherwise an exact bitrate match wins,
/// and failing that the operator is asked until they give a valid index.
pub fn select_variant(
    catalog: &StreamCatalog,
    constraint: &QualityConstraint,
    prompter: &mut dyn Prompter,
) -> Result<StreamVariant> {
    let streams = candidates(catalog, constraint);

    if streams.is_empty() {
        return Err(ResolveError::NoVariantsAvailable);
    }
    if streams.len() == 1 {
        return Ok(streams[0].clone());
    }

    let desired = constraint.desired_bitrate_kbps.filter(|&b| b != 0);
    if let Some(bitrate) = desired {
        if let Some(stream) = streams.iter().find(|v| v.bitrate_kbps == bitrate) {
            tracing::info!("Selected {} kbps stream {}", bitrate, stream.label);
            return Ok((*stream).clone());
        }
        tracing::info!("No {} kbps stream available, asking", bitrate);
    }

    let listing = format_listing(&streams);
    loop {
        prompter.show(&listing)?;
        let answer = prompter.ask(SELECTION_QUESTION)?;
        match parse_selection(&answer, streams.len()) {
            Ok(index) => return Ok(streams[index].clone()),
            Err(e) => tracing::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::{ConsolePrompter, NoPrompt};
    use crate::core::PlayerType;
    use std::io::Cursor;

    fn flash(bitrate: u32) -> StreamVariant {
        StreamVariant::new(
            format!("rtmp://fl.example.com/app/film-{}.mp4", bitrate),
            bitrate,
            PlayerType::Flash,
        )
    }

    fn catalog(variants: Vec<StreamVariant>) -> StreamCatalog {
        StreamCatalog {
            variants,
            subtitle_url: None,
        }
    }

    fn download_mode(bitrate: Option<u32>) -> QualityConstraint {
        QualityConstraint {
            desired_bitrate_kbps: bitrate,
            flash_only: true,
        }
    }

    #[test]
    fn test_single_variant_ignores_constraint() {
        let catalog = catalog(vec![flash(850)]);
        let chosen = select_variant(&catalog, &download_mode(Some(2400)), &mut NoPrompt).unwrap();
        assert_eq!(chosen.bitrate_kbps, 850);
    }

    #[test]
    fn test_exact_bitrate_match_skips_prompt() {
        let catalog = catalog(vec![flash(2400), flash(340), flash(1400), flash(850)]);
        let chosen = select_variant(&catalog, &download_mode(Some(850)), &mut NoPrompt).unwrap();
        assert_eq!(chosen.bitrate_kbps, 850);
    }

    #[test]
    fn test_empty_candidates_fail_without_prompt() {
        let ios = StreamVariant::new("http://x/y.m3u8", 0, PlayerType::Ios);
        let catalog = catalog(vec![ios]);
        let err = select_variant(&catalog, &download_mode(None), &mut NoPrompt).unwrap_err();
        assert!(matches!(err, ResolveError::NoVariantsAvailable));
    }

    #[test]
    fn test_flash_filter_only_in_download_mode() {
        let ios = StreamVariant::new("http://x/y.m3u8", 0, PlayerType::Ios);
        let catalog = catalog(vec![flash(850), ios, flash(340)]);

        let flash_only = candidates(&catalog, &download_mode(None));
        let bitrates: Vec<_> = flash_only.iter().map(|v| v.bitrate_kbps).collect();
        assert_eq!(bitrates, [340, 850]);

        let all = candidates(
            &catalog,
            &QualityConstraint {
                desired_bitrate_kbps: None,
                flash_only: false,
            },
        );
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].player_type, PlayerType::Ios);
    }

    #[test]
    fn test_sort_is_stable() {
        let a = StreamVariant::new("rtmp://x/a.mp4", 850, PlayerType::Flash);
        let b = StreamVariant::new("rtmp://x/b.mp4", 850, PlayerType::Flash);
        let catalog = catalog(vec![flash(2400), a, b]);
        let labels: Vec<_> = candidates(&catalog, &download_mode(None))
            .iter()
            .map(|v| v.label.clone())
            .collect();
        assert_eq!(labels, ["a.mp4", "b.mp4", "film-2400.mp4"]);
    }

    #[test]
    fn test_prompt_reasks_on_out_of_range() {
        let ios = StreamVariant::new("http://x/y.m3u8", 0, PlayerType::Ios);
        let catalog = catalog(vec![flash(2400), ios, flash(340)]);
        let mut prompter = ConsolePrompter::new(Cursor::new("5\nabc\n2\n"), Vec::new());

        let chosen = select_variant(&catalog, &download_mode(Some(850)), &mut prompter).unwrap();
        assert_eq!(chosen.bitrate_kbps, 2400);

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output.matches("Which file do you want?").count(), 3);
        // The listing only ever shows the flash subset, lowest bitrate first
        assert!(!output.contains("ios"));
        let first = output.find("340 kbps").unwrap();
        let second = output.find("2400 kbps").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_prompt_fails_when_input_closes() {
        let catalog = catalog(vec![flash(340), flash(2400)]);
        let mut prompter = ConsolePrompter::new(Cursor::new("9\n"), Vec::new());
        let err = select_variant(&catalog, &download_mode(None), &mut prompter).unwrap_err();
        assert!(matches!(err, ResolveError::InputClosed));
    }

    #[test]
    fn test_zero_bitrate_never_matches() {
        let catalog = catalog(vec![flash(0), flash(340)]);
        let err = select_variant(&catalog, &download_mode(Some(0)), &mut NoPrompt).unwrap_err();
        assert!(matches!(err, ResolveError::PromptUnavailable(_)));
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1", 2).unwrap(), 0);
        assert_eq!(parse_selection(" 2 ", 2).unwrap(), 1);
        assert!(parse_selection("0", 2).is_err());
        assert!(parse_selection("3", 2).is_err());
        assert!(parse_selection("", 2).is_err());
        assert!(parse_selection("-1", 2).unwrap_err().is_recoverable());
    }

    #[test]
    fn test_listing_layout() {
        let variants = [flash(850)];
        let refs: Vec<_> = variants.iter().collect();
        let listing = format_listing(&refs);
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" #  Bitrate "));
        assert!(lines[1].starts_with(" 1.  850 kbps\tfilm-850.mp4"));
        assert!(lines[1].ends_with("flash"));
    }
}
