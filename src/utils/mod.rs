use crate::core::error::{ResolveError, Result};
use crate::core::PageMetadata;

/// Keep a title usable as a single path component.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// `<program> <episode>`, trimmed, with whitespace runs joined by `_`.
/// Empty when both titles are missing.
pub fn base_file_name(metadata: &PageMetadata) -> String {
    let name = format!(
        "{} {}",
        metadata.program_title.as_deref().unwrap_or(""),
        metadata.episode_title.as_deref().unwrap_or("")
    );
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    sanitize_filename(&joined)
}

/// Split a pass-through argument string into tokens using shell quoting rules.
pub fn split_args(args: &str) -> Result<Vec<String>> {
    shlex::split(args).ok_or_else(|| ResolveError::InvalidExtraArgs(args.to_string()))
}
